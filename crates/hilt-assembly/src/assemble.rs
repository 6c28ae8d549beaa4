//! One full resolution pass: config in, render parts out

use crate::layout::PlacedSlot;
use crate::placement::{place_instruments, InstrumentPlacement};
use crate::resolver::{PartResolver, ResolutionKey};
use crate::size::{validate_size, SizeReport};
use glam::Mat4;
use hilt_catalog::{DimensionTable, Slot};
use hilt_config::AssemblyConfig;
use hilt_import::{resolve_part, AssetSource, AssetState, NormalizedGeometry};
use hilt_material::{placeholder_material, resolve_material, PlaceholderMaterial, RenderMaterial};
use std::sync::Arc;

/// How a resolved part is shaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartMaterial {
    Render(RenderMaterial),
    /// Wireframe stand-in for an asset without meshes
    Placeholder(PlaceholderMaterial),
}

/// Geometry and appearance of one slot
#[derive(Debug, Clone)]
pub struct ResolvedPart {
    pub geometry: NormalizedGeometry,
    pub material: PartMaterial,
}

#[derive(Debug, Clone)]
pub enum PartStatus {
    Ready(Arc<ResolvedPart>),
    /// The asset is still loading; the slot keeps its place in the stack
    Pending,
    Failed(String),
}

impl PartStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, PartStatus::Ready(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartStatus::Ready(_) => "ready",
            PartStatus::Pending => "pending",
            PartStatus::Failed(_) => "failed",
        }
    }
}

/// A slot ready to hand to a renderer
#[derive(Debug, Clone)]
pub struct RenderPart {
    pub instrument: usize,
    pub slot: Slot,
    pub asset_id: String,
    /// World transform of the part origin; the geometry's own root transform
    /// applies below it
    pub transform: Mat4,
    pub status: PartStatus,
}

/// Output of one pass
#[derive(Debug, Clone)]
pub struct Assembly {
    pub placements: Vec<InstrumentPlacement>,
    /// One report per active instrument
    pub sizes: Vec<SizeReport>,
    pub parts: Vec<RenderPart>,
}

impl Assembly {
    pub fn pending_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p.status, PartStatus::Pending))
            .count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &RenderPart> {
        self.parts
            .iter()
            .filter(|p| matches!(p.status, PartStatus::Failed(_)))
    }

    /// Every part resolved
    pub fn is_complete(&self) -> bool {
        self.parts.iter().all(|p| p.status.is_ready())
    }

    pub fn part(&self, instrument: usize, slot: Slot) -> Option<&RenderPart> {
        self.parts
            .iter()
            .find(|p| p.instrument == instrument && p.slot == slot)
    }
}

/// Drives passes while keeping resolved parts between them
#[derive(Debug, Default)]
pub struct Assembler {
    resolver: PartResolver,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolver(&self) -> &PartResolver {
        &self.resolver
    }

    /// Run one pass.
    ///
    /// Slots whose key did not change since the last pass reuse their
    /// resolved part. A pending asset is asked for again on the next pass.
    pub fn assemble(
        &mut self,
        config: &AssemblyConfig,
        table: &DimensionTable,
        source: &mut dyn AssetSource,
    ) -> Assembly {
        let placements = place_instruments(config, table);
        self.resolver.retain_instruments(placements.len());

        let sizes = config
            .active_instruments()
            .iter()
            .map(|inst| validate_size(inst, config.weapon_type, table))
            .collect();

        let mut parts = Vec::new();
        for (placement, instrument) in placements.iter().zip(config.active_instruments()) {
            for placed in placement.layout.placed() {
                let slot = placed.slot;
                let choice = instrument.slot(slot);
                let key = ResolutionKey::new(
                    placed.spec.asset_id.clone(),
                    choice.color.clone(),
                    choice.finish,
                    slot.is_blade(),
                );

                let status = match self.resolver.cached(placement.index, slot, &key) {
                    Some(part) => PartStatus::Ready(part),
                    None => self.resolve(placement.index, slot, key, placed, source),
                };

                parts.push(RenderPart {
                    instrument: placement.index,
                    slot,
                    asset_id: placed.spec.asset_id.clone(),
                    transform: placement.part_transform(placed),
                    status,
                });
            }
        }

        Assembly {
            placements,
            sizes,
            parts,
        }
    }

    fn resolve(
        &mut self,
        instrument: usize,
        slot: Slot,
        key: ResolutionKey,
        placed: &PlacedSlot,
        source: &mut dyn AssetSource,
    ) -> PartStatus {
        let ticket = self.resolver.begin(instrument, slot, key.clone());

        let scene = match source.load(&key.asset_id) {
            AssetState::Ready(scene) => scene,
            AssetState::Pending => return PartStatus::Pending,
            AssetState::Failed(message) => {
                log::warn!(
                    "instrument {} {}: {} failed: {}",
                    instrument,
                    slot,
                    key.asset_id,
                    message
                );
                return PartStatus::Failed(message);
            }
        };

        let geometry = resolve_part(&scene, &placed.spec);
        let material = if geometry.is_placeholder() {
            PartMaterial::Placeholder(placeholder_material(&key.color, key.is_blade))
        } else {
            PartMaterial::Render(resolve_material(&key.color, key.finish, key.is_blade))
        };

        self.resolver
            .complete(ticket, ResolvedPart { geometry, material });
        match self.resolver.cached(instrument, slot, &key) {
            Some(part) => PartStatus::Ready(part),
            None => PartStatus::Pending,
        }
    }
}

/// Run a single pass with no state kept between passes
pub fn assemble(
    config: &AssemblyConfig,
    table: &DimensionTable,
    source: &mut dyn AssetSource,
) -> Assembly {
    Assembler::new().assemble(config, table, source)
}
