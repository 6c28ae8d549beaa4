//! Hilt Core - Foundational types for the Hiltsmith configurator
//!
//! This crate provides the types that all other Hiltsmith crates depend on:
//! - `HexColor`, `Color` - Persisted color values and their linear form
//! - `Finish`, `Orientation`, `WeaponType` - Shared configuration enums
//! - `euler_deg_to_quat` - Rotation helper for authored Euler angles
//! - Error types and Result alias

mod color;
mod error;
mod types;

pub use color::{Color, HexColor, ALUMINIUM};
pub use error::{HiltError, Result};
pub use types::{euler_deg_to_quat, Finish, Orientation, WeaponType};
