#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks the nearest cell with the highest utility.

use hypersonic_core::{Grid, Position, Target, TargetKind};
use hypersonic_system_blast_reach::Exclusions;

/// Target selector scanning a Manhattan diamond around the actor.
#[derive(Clone, Copy, Debug, Default)]
pub struct TargetSelector;

impl TargetSelector {
    /// Creates a new target selector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Selects the best destination within `scan_range` of `origin`.
    ///
    /// Cells outside the board or listed in `excluded` are skipped. Higher
    /// utility always wins; among equal utility the closer cell wins, and
    /// remaining ties go to the smaller row, then the smaller column.
    /// Returns `None` when no scanned cell carries positive utility.
    #[must_use]
    pub fn select(
        &self,
        grid: &Grid,
        origin: Position,
        scan_range: i32,
        excluded: &Exclusions,
    ) -> Option<Target> {
        if scan_range < 0 {
            return None;
        }

        let max_column = i32::try_from(grid.width()).unwrap_or(i32::MAX) - 1;
        let max_row = i32::try_from(grid.height()).unwrap_or(i32::MAX) - 1;
        let mut best: Option<BestCandidate> = None;

        let rows = origin.y().saturating_sub(scan_range).max(0)
            ..=origin.y().saturating_add(scan_range).min(max_row);
        for row in rows {
            let span = scan_range - (row - origin.y()).abs();
            let columns = origin.x().saturating_sub(span).max(0)
                ..=origin.x().saturating_add(span).min(max_column);
            for column in columns {
                let position = Position::new(column, row);
                if excluded.contains(&position) {
                    continue;
                }

                let Some(cell) = grid.cell(position) else {
                    continue;
                };
                if cell.utility <= 0 {
                    continue;
                }

                let current = BestCandidate {
                    utility: cell.utility,
                    distance: origin.manhattan_distance(position),
                    position,
                    bonus: cell.kind().is_bonus(),
                };

                match &mut best {
                    Some(existing) => {
                        if current.precedes(existing) {
                            *existing = current;
                        }
                    }
                    None => best = Some(current),
                }
            }
        }

        best.map(BestCandidate::into_target)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    utility: i32,
    distance: u32,
    position: Position,
    bonus: bool,
}

impl BestCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.utility != other.utility {
            return self.utility > other.utility;
        }

        if self.distance != other.distance {
            return self.distance < other.distance;
        }

        if self.position.y() != other.position.y() {
            return self.position.y() < other.position.y();
        }

        self.position.x() < other.position.x()
    }

    fn into_target(self) -> Target {
        Target {
            position: self.position,
            distance: self.distance,
            utility: self.utility,
            kind: if self.bonus {
                TargetKind::BonusPickup
            } else {
                TargetKind::BombPlacement
            },
        }
    }
}
