//! Shared configuration enums and rotation helpers

use crate::error::{HiltError, Result};
use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Surface treatment of a hilt part
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finish {
    #[default]
    Metal,
    Matte,
}

/// Global orientation of the whole assembly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Single or dual-wielded configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    #[default]
    Single,
    Dual,
}

impl WeaponType {
    /// Number of instruments rendered for this weapon type
    pub fn instrument_count(&self) -> usize {
        match self {
            WeaponType::Single => 1,
            WeaponType::Dual => 2,
        }
    }
}

impl FromStr for Finish {
    type Err = HiltError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "metal" => Ok(Finish::Metal),
            "matte" | "mat" => Ok(Finish::Matte),
            _ => Err(HiltError::ParseError(format!(
                "unknown finish '{}'; valid values: metal, matte",
                s
            ))),
        }
    }
}

impl FromStr for Orientation {
    type Err = HiltError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "vertical" => Ok(Orientation::Vertical),
            "horizontal" => Ok(Orientation::Horizontal),
            _ => Err(HiltError::ParseError(format!(
                "unknown orientation '{}'; valid values: vertical, horizontal",
                s
            ))),
        }
    }
}

impl FromStr for WeaponType {
    type Err = HiltError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(WeaponType::Single),
            "dual" => Ok(WeaponType::Dual),
            _ => Err(HiltError::ParseError(format!(
                "unknown weapon type '{}'; valid values: single, dual",
                s
            ))),
        }
    }
}

impl fmt::Display for Finish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finish::Metal => write!(f, "metal"),
            Finish::Matte => write!(f, "matte"),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeaponType::Single => write!(f, "single"),
            WeaponType::Dual => write!(f, "dual"),
        }
    }
}

/// Convert authored Euler angles in degrees (XYZ order) to a quaternion
pub fn euler_deg_to_quat(rotation_deg: [f32; 3]) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        rotation_deg[0].to_radians(),
        rotation_deg[1].to_radians(),
        rotation_deg[2].to_radians(),
    )
}
