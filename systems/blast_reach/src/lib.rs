#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that ray-casts bomb blasts across the board.
//!
//! A blast travels along the four axis directions from its origin. Each ray
//! stops at the first non-floor cell it meets: bonus items absorb the blast,
//! boxes are hit and absorb it as well. Only the first box on each ray is
//! ever affected, so a single blast reaches at most four cells.

use std::collections::HashSet;

use hypersonic_core::{Cell, Direction, Grid, Hazard, Position};

/// Positions that pending explosions already account for this turn.
pub type Exclusions = HashSet<Position>;

/// Boxes a blast would destroy, at most one per direction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlastReach {
    cells: Vec<Cell>,
}

impl BlastReach {
    /// Number of boxes reached by the blast.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the blast reaches no box at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the blast reaches the box at the coordinate.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.iter().any(|cell| cell.position() == position)
    }

    /// Iterator over the reached boxes.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterator over the coordinates of the reached boxes.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().map(Cell::position)
    }
}

/// Computes the boxes a bomb at `origin` with the provided `range` would hit.
///
/// Rays are clipped at the board edge. A non-positive `range` reaches
/// nothing. Boxes whose coordinate appears in `excluded` stop the ray but are
/// not reported.
#[must_use]
pub fn blast_reach(
    grid: &Grid,
    origin: Position,
    range: i32,
    excluded: Option<&Exclusions>,
) -> BlastReach {
    let mut cells = Vec::with_capacity(Direction::ALL.len());

    for direction in Direction::ALL {
        if let Some(cell) = first_obstacle(grid, origin, direction, range) {
            if !cell.kind().is_box() {
                continue;
            }
            if excluded.map_or(false, |excluded| excluded.contains(&cell.position())) {
                continue;
            }
            cells.push(*cell);
        }
    }

    BlastReach { cells }
}

/// Collects every coordinate already claimed by a pending explosion.
///
/// The zone contains each hazard's own cell and every box its blast reaches
/// at the hazard's full range.
#[must_use]
pub fn exclusion_zone<'a, I>(grid: &Grid, hazards: I) -> Exclusions
where
    I: IntoIterator<Item = &'a Hazard>,
{
    let mut zone = Exclusions::new();
    for hazard in hazards {
        let _ = zone.insert(hazard.position);
        zone.extend(blast_reach(grid, hazard.position, hazard.blast_range, None).positions());
    }
    zone
}

fn first_obstacle(
    grid: &Grid,
    origin: Position,
    direction: Direction,
    range: i32,
) -> Option<&Cell> {
    for steps in 1..=range {
        let cell = grid.cell(origin.step(direction, steps))?;
        if cell.kind().is_bonus() || cell.kind().is_box() {
            return Some(cell);
        }
    }
    None
}
