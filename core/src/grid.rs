//! Dense board representation rebuilt from every turn snapshot.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::Position;

/// Classification of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Walkable empty floor.
    Floor,
    /// Destructible box without loot.
    Box,
    /// Destructible box that drops an extra range item.
    BoxWithExtraRange,
    /// Destructible box that drops an extra bomb item.
    BoxWithExtraBomb,
    /// Pickup that increases the blast range stat.
    ExtraRangeItem,
    /// Pickup that increases the number of placeable bombs.
    ExtraBombItem,
}

impl CellKind {
    /// Maps a board symbol from the turn input onto a cell kind.
    ///
    /// Only floor and box symbols appear in the board rows; item kinds are
    /// derived from item entities instead.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Floor),
            '0' => Some(Self::Box),
            '1' => Some(Self::BoxWithExtraRange),
            '2' => Some(Self::BoxWithExtraBomb),
            'R' => Some(Self::ExtraRangeItem),
            'B' => Some(Self::ExtraBombItem),
            _ => None,
        }
    }

    /// Symbol used when rendering the board.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Floor => '.',
            Self::Box => '0',
            Self::BoxWithExtraRange => '1',
            Self::BoxWithExtraBomb => '2',
            Self::ExtraRangeItem => 'R',
            Self::ExtraBombItem => 'B',
        }
    }

    /// Reports whether the cell is any of the destructible box subtypes.
    #[must_use]
    pub const fn is_box(self) -> bool {
        matches!(
            self,
            Self::Box | Self::BoxWithExtraRange | Self::BoxWithExtraBomb
        )
    }

    /// Reports whether the cell holds a bonus item.
    #[must_use]
    pub const fn is_bonus(self) -> bool {
        matches!(self, Self::ExtraRangeItem | Self::ExtraBombItem)
    }
}

/// Single board cell together with the utility computed for the current turn.
///
/// Equality and hashing only consider the position and kind; the utility is
/// scratch data owned by the turn that computed it.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    position: Position,
    kind: CellKind,
    /// Score assigned by the utility field for the current turn.
    pub utility: i32,
}

impl Cell {
    /// Creates a cell with zero utility.
    #[must_use]
    pub const fn new(position: Position, kind: CellKind) -> Self {
        Self {
            position,
            kind,
            utility: 0,
        }
    }

    /// Board coordinate of the cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Classification of the cell.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.kind == other.kind
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
        self.kind.hash(state);
    }
}

/// Fixed-size board holding exactly one [`Cell`] per coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a board of the provided dimensions filled with floor.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(
                    Position::new(x as i32, y as i32),
                    CellKind::Floor,
                ));
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a board from row-major cell kinds.
    ///
    /// Returns `None` when the rows are ragged. An empty slice produces an
    /// empty board.
    #[must_use]
    pub fn from_rows(rows: &[Vec<CellKind>]) -> Option<Self> {
        let height = u32::try_from(rows.len()).ok()?;
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut grid = Self::new(u32::try_from(width).ok()?, height);
        for (cell, kind) in grid.cells.iter_mut().zip(rows.iter().flatten()) {
            cell.kind = *kind;
        }
        Some(grid)
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the coordinate lies on the board.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Returns the cell at the coordinate, if it lies on the board.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.index(position).and_then(|index| self.cells.get(index))
    }

    /// Returns a mutable cell at the coordinate, if it lies on the board.
    pub fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.index(position)
            .and_then(move |index| self.cells.get_mut(index))
    }

    /// Replaces the kind of the cell at the coordinate.
    ///
    /// Returns `false` when the coordinate lies outside the board.
    pub fn set_kind(&mut self, position: Position, kind: CellKind) -> bool {
        match self.cell_mut(position) {
            Some(cell) => {
                cell.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Utility of the cell at the coordinate, or zero outside the board.
    #[must_use]
    pub fn utility(&self, position: Position) -> i32 {
        self.cell(position).map_or(0, |cell| cell.utility)
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterates mutably over all cells in row-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Renders the cell kinds as one line of symbols per row.
    #[must_use]
    pub fn render_kinds(&self) -> String {
        self.render("", |cell| cell.kind.symbol().to_string())
    }

    /// Renders the utility field as one line per row, cells separated by spaces.
    #[must_use]
    pub fn render_utility(&self) -> String {
        self.render(" ", |cell| format!("{:>2}", cell.utility))
    }

    fn render<F>(&self, separator: &str, mut describe: F) -> String
    where
        F: FnMut(&Cell) -> String,
    {
        let width = self.width as usize;
        if width == 0 {
            return String::new();
        }

        let mut lines = Vec::with_capacity(self.height as usize);
        for row in self.cells.chunks(width) {
            let line: Vec<String> = row.iter().map(&mut describe).collect();
            lines.push(line.join(separator));
        }
        lines.join("\n")
    }

    fn index(&self, position: Position) -> Option<usize> {
        let x = u32::try_from(position.x()).ok()?;
        let y = u32::try_from(position.y()).ok()?;
        if x < self.width && y < self.height {
            let row = usize::try_from(y).ok()?;
            let column = usize::try_from(x).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_floor_with_unique_positions() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.iter().count(), 12);
        assert!(grid.iter().all(|cell| cell.kind() == CellKind::Floor));

        for y in 0..3 {
            for x in 0..4 {
                let position = Position::new(x, y);
                assert_eq!(grid.cell(position).map(Cell::position), Some(position));
            }
        }
    }

    #[test]
    fn out_of_bounds_lookups_return_none() {
        let grid = Grid::new(2, 2);
        assert!(grid.cell(Position::new(-1, 0)).is_none());
        assert!(grid.cell(Position::new(0, 2)).is_none());
        assert!(grid.cell(Position::new(2, 0)).is_none());
        assert_eq!(grid.utility(Position::new(5, 5)), 0);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows = vec![
            vec![CellKind::Floor, CellKind::Box],
            vec![CellKind::Floor],
        ];
        assert!(Grid::from_rows(&rows).is_none());
    }

    #[test]
    fn from_rows_preserves_row_major_layout() {
        let rows = vec![
            vec![CellKind::Floor, CellKind::Box, CellKind::Floor],
            vec![CellKind::BoxWithExtraBomb, CellKind::Floor, CellKind::Floor],
        ];
        let grid = Grid::from_rows(&rows).expect("rows are rectangular");
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.render_kinds(), ".0.\n2..");
    }

    #[test]
    fn cell_equality_ignores_utility() {
        let mut first = Cell::new(Position::new(1, 1), CellKind::Floor);
        let second = Cell::new(Position::new(1, 1), CellKind::Floor);
        first.utility = 3;
        assert_eq!(first, second);

        let box_cell = Cell::new(Position::new(1, 1), CellKind::Box);
        assert_ne!(second, box_cell);
    }

    #[test]
    fn symbols_round_trip_for_every_kind() {
        for kind in [
            CellKind::Floor,
            CellKind::Box,
            CellKind::BoxWithExtraRange,
            CellKind::BoxWithExtraBomb,
            CellKind::ExtraRangeItem,
            CellKind::ExtraBombItem,
        ] {
            assert_eq!(CellKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(CellKind::from_symbol('X'), None);
    }

    #[test]
    fn box_and_bonus_predicates_are_disjoint() {
        assert!(CellKind::BoxWithExtraRange.is_box());
        assert!(!CellKind::BoxWithExtraRange.is_bonus());
        assert!(CellKind::ExtraBombItem.is_bonus());
        assert!(!CellKind::ExtraBombItem.is_box());
        assert!(!CellKind::Floor.is_box());
        assert!(!CellKind::Floor.is_bonus());
    }

    #[test]
    fn utility_map_renders_per_row() {
        let mut grid = Grid::new(2, 2);
        if let Some(cell) = grid.cell_mut(Position::new(1, 0)) {
            cell.utility = 12;
        }
        assert_eq!(grid.render_utility(), " 0 12\n 0  0");
    }
}
