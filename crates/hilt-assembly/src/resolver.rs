//! Keyed per-slot resolution with stale-result rejection

use crate::assemble::ResolvedPart;
use hilt_catalog::Slot;
use hilt_core::{Finish, HexColor};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything a slot's resolved part depends on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionKey {
    pub asset_id: String,
    pub color: HexColor,
    pub finish: Finish,
    pub is_blade: bool,
}

impl ResolutionKey {
    /// Finishes that cannot change the result (blade, aluminium) are folded
    /// to metal so they do not trigger a new resolution.
    pub fn new(
        asset_id: impl Into<String>,
        color: HexColor,
        finish: Finish,
        is_blade: bool,
    ) -> Self {
        let finish = if is_blade || color.is_aluminium() {
            Finish::Metal
        } else {
            finish
        };
        Self {
            asset_id: asset_id.into(),
            color,
            finish,
            is_blade,
        }
    }
}

/// Proof that a resolution was started for a slot at a given generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub instrument: usize,
    pub slot: Slot,
    pub generation: u64,
}

#[derive(Debug)]
struct SlotEntry {
    key: ResolutionKey,
    generation: u64,
    result: Option<Arc<ResolvedPart>>,
}

/// Tracks the latest requested key of every slot.
///
/// A result is only accepted for the generation that is current when it
/// arrives, so a slow resolution for a superseded key can never overwrite the
/// part that replaced it.
#[derive(Debug, Default)]
pub struct PartResolver {
    slots: HashMap<(usize, Slot), SlotEntry>,
}

impl PartResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start resolving `key` for a slot.
    ///
    /// Asking again for the key already in flight keeps its generation, so an
    /// outstanding ticket stays valid. A different key bumps the generation and
    /// drops the previous result.
    pub fn begin(&mut self, instrument: usize, slot: Slot, key: ResolutionKey) -> Ticket {
        let entry = self
            .slots
            .entry((instrument, slot))
            .or_insert_with(|| SlotEntry {
                key: key.clone(),
                generation: 0,
                result: None,
            });

        if entry.generation == 0 || entry.key != key {
            entry.generation += 1;
            entry.key = key;
            entry.result = None;
        }

        Ticket {
            instrument,
            slot,
            generation: entry.generation,
        }
    }

    /// Store a result. Returns `false` and discards it if the ticket is stale.
    pub fn complete(&mut self, ticket: Ticket, part: ResolvedPart) -> bool {
        match self.slots.get_mut(&(ticket.instrument, ticket.slot)) {
            Some(entry) if entry.generation == ticket.generation => {
                entry.result = Some(Arc::new(part));
                true
            }
            _ => {
                log::debug!(
                    "discarding stale result for instrument {} {} (generation {})",
                    ticket.instrument,
                    ticket.slot,
                    ticket.generation
                );
                false
            }
        }
    }

    /// The stored result, if it was resolved for exactly this key
    pub fn cached(
        &self,
        instrument: usize,
        slot: Slot,
        key: &ResolutionKey,
    ) -> Option<Arc<ResolvedPart>> {
        self.slots
            .get(&(instrument, slot))
            .filter(|entry| &entry.key == key)
            .and_then(|entry| entry.result.clone())
    }

    /// Current generation of a slot; 0 if it was never requested
    pub fn generation(&self, instrument: usize, slot: Slot) -> u64 {
        self.slots
            .get(&(instrument, slot))
            .map_or(0, |entry| entry.generation)
    }

    /// Forget instruments at or above `count`
    pub fn retain_instruments(&mut self, count: usize) {
        self.slots.retain(|(instrument, _), _| *instrument < count);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
