//! Per-turn registry of bombs and pickups.

use std::collections::HashMap;

use hypersonic_core::{BonusItem, Hazard, Position};

/// Bombs and pickups reported by the latest snapshot.
///
/// The ledger is cleared wholesale before each snapshot is replayed into it.
#[derive(Clone, Debug, Default)]
pub(crate) struct Ledger {
    /// Bombs placed by the controlled actor.
    pub(crate) player_hazards: Vec<Hazard>,
    /// Bombs placed by the opponent.
    pub(crate) opponent_hazards: Vec<Hazard>,
    /// Pickups keyed by the coordinate they occupy.
    pub(crate) items: HashMap<Position, BonusItem>,
}

impl Ledger {
    pub(crate) fn clear(&mut self) {
        self.player_hazards.clear();
        self.opponent_hazards.clear();
        self.items.clear();
    }

    pub(crate) fn record_hazard(&mut self, hazard: Hazard, owned_by_player: bool) {
        if owned_by_player {
            self.player_hazards.push(hazard);
        } else {
            self.opponent_hazards.push(hazard);
        }
    }

    pub(crate) fn record_item(&mut self, item: BonusItem) {
        let _ = self.items.insert(item.position, item);
    }

    pub(crate) fn hazard_count(&self) -> usize {
        self.player_hazards.len() + self.opponent_hazards.len()
    }
}
