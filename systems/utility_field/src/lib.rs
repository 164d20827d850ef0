#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that scores every board cell for the current turn.

use hypersonic_core::{Actor, Cell, CellKind, Grid, Tuning};
use hypersonic_system_blast_reach::{blast_reach, Exclusions};

/// Utility field builder that reuses a scratch buffer between turns.
#[derive(Debug, Default)]
pub struct UtilityField {
    tuning: Tuning,
    scores: Vec<i32>,
}

impl UtilityField {
    /// Creates a builder using the provided heuristics.
    #[must_use]
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            scores: Vec::new(),
        }
    }

    /// Overwrites the utility of every cell on the board.
    ///
    /// Floor cells score the number of boxes a bomb placed there would
    /// destroy, ignoring boxes listed in `excluded`. Bonus cells score a flat
    /// bonus while the actor is close and the bonus is not saturated. Every
    /// other cell scores zero.
    pub fn build(&mut self, grid: &mut Grid, actor: &Actor, excluded: &Exclusions) {
        let scoring_range = actor.blast_range - self.tuning.blast_range_offset;

        self.scores.clear();
        self.scores
            .reserve(grid.width() as usize * grid.height() as usize);
        for cell in grid.iter() {
            let score = match cell.kind() {
                CellKind::Floor => {
                    let reach = blast_reach(grid, cell.position(), scoring_range, Some(excluded));
                    i32::try_from(reach.len()).unwrap_or(i32::MAX)
                }
                CellKind::ExtraRangeItem | CellKind::ExtraBombItem => self.bonus_score(cell, actor),
                CellKind::Box | CellKind::BoxWithExtraRange | CellKind::BoxWithExtraBomb => 0,
            };
            self.scores.push(score);
        }

        for (cell, score) in grid.iter_mut().zip(self.scores.iter()) {
            cell.utility = *score;
        }
    }

    fn bonus_score(&self, cell: &Cell, actor: &Actor) -> i32 {
        let saturated = match cell.kind() {
            CellKind::ExtraRangeItem => actor.blast_range > self.tuning.range_saturation,
            CellKind::ExtraBombItem => actor.max_bombs > self.tuning.bomb_saturation,
            _ => true,
        };
        if saturated {
            return 0;
        }

        if actor.position.manhattan_distance(cell.position()) <= self.tuning.bonus_proximity {
            self.tuning.bonus_utility
        } else {
            0
        }
    }
}
