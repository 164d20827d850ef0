#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hypersonic bot.
//!
//! This crate defines the data model and the message surface that connects
//! the protocol adapter, the authoritative world, and the pure decision
//! systems. The adapter submits [`Command`] values describing the latest turn
//! snapshot, the world executes those commands via its `apply` entry point,
//! and then reports [`Event`] values. Systems query the rebuilt world, score
//! the board, and answer with a single [`Action`] per turn.

use std::fmt;

use serde::{Deserialize, Serialize};

mod grid;

pub use grid::{Cell, CellKind, Grid};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Configures the arena once, before the first turn.
    ConfigureArena {
        /// Number of board columns.
        width: u32,
        /// Number of board rows.
        height: u32,
        /// Owner identifier of the controlled actor.
        player: PlayerId,
    },
    /// Replaces the per-turn state with a freshly parsed snapshot.
    ObserveTurn {
        /// Complete board and entity state for the turn.
        snapshot: TurnSnapshot,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the arena dimensions and owner were configured.
    ArenaConfigured {
        /// Number of board columns.
        width: u32,
        /// Number of board rows.
        height: u32,
        /// Owner identifier of the controlled actor.
        player: PlayerId,
    },
    /// Confirms that a turn snapshot replaced the previous state.
    TurnObserved {
        /// Zero-based index of the observed turn.
        turn: u32,
        /// Number of hazards currently ticking on the board.
        hazards: usize,
        /// Number of bonus items lying on the board.
        items: usize,
    },
    /// Reports that a snapshot was discarded without touching the world.
    TurnRejected {
        /// Specific reason the snapshot was rejected.
        reason: SnapshotError,
    },
}

/// Reasons a turn snapshot may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapshotError {
    /// The board rows do not match the configured arena dimensions.
    DimensionMismatch,
    /// An entity was reported outside the configured arena.
    OutOfBounds,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch => f.write_str("board rows do not match the arena dimensions"),
            Self::OutOfBounds => f.write_str("an entity lies outside the arena"),
        }
    }
}

/// Cardinal directions used by blast rays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All four directions in a fixed order.
    pub const ALL: [Self; 4] = [Self::West, Self::East, Self::North, Self::South];

    /// Unit offset `(dx, dy)` of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Board coordinate expressed as column `x` and row `y`.
///
/// Coordinates are signed so that rays may step past the board edge before
/// being clipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new board coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Coordinate reached after `steps` moves in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction, steps: i32) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx * steps, self.y + dy * steps)
    }

    /// Computes the obstacle-free Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Owner identifier assigned by the game to each player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new owner identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Bomb-placing actor controlled by one of the players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Current board coordinate.
    pub position: Position,
    /// Bombs that may be placed right now.
    pub bombs_available: u32,
    /// Largest number of bombs the actor has ever been able to hold.
    pub max_bombs: u32,
    /// Blast range stat applied to newly placed bombs.
    pub blast_range: i32,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            position: Position::new(0, 0),
            bombs_available: 0,
            max_bombs: 1,
            blast_range: 0,
        }
    }
}

/// Bomb ticking on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hazard {
    /// Board coordinate of the bomb.
    pub position: Position,
    /// Turns remaining until detonation.
    pub timer: u32,
    /// Blast range captured when the bomb was placed.
    pub blast_range: i32,
}

/// Kinds of pickups that may lie on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Increases the blast range stat.
    ExtraRange,
    /// Increases the number of placeable bombs.
    ExtraBomb,
}

impl ItemKind {
    /// Maps the numeric item code used by the game onto an item kind.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::ExtraRange),
            2 => Some(Self::ExtraBomb),
            _ => None,
        }
    }

    /// Cell kind that represents this item on the board.
    #[must_use]
    pub const fn cell_kind(self) -> CellKind {
        match self {
            Self::ExtraRange => CellKind::ExtraRangeItem,
            Self::ExtraBomb => CellKind::ExtraBombItem,
        }
    }
}

/// Pickup currently lying on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BonusItem {
    /// Board coordinate of the pickup.
    pub position: Position,
    /// Effect granted by the pickup.
    pub kind: ItemKind,
}

/// Entity as reported in a single turn snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntitySnapshot {
    /// A player's actor.
    Actor {
        /// Owner of the actor.
        owner: PlayerId,
        /// Current board coordinate.
        position: Position,
        /// Bombs that may be placed right now.
        bombs_available: u32,
        /// Blast range stat.
        blast_range: i32,
    },
    /// A bomb placed by one of the players.
    Hazard {
        /// Owner of the bomb.
        owner: PlayerId,
        /// Bomb state.
        hazard: Hazard,
    },
    /// A pickup lying on the board.
    Item(BonusItem),
}

impl EntitySnapshot {
    /// Board coordinate the entity occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Actor { position, .. } => *position,
            Self::Hazard { hazard, .. } => hazard.position,
            Self::Item(item) => item.position,
        }
    }
}

/// Complete board and entity state for a single turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnSnapshot {
    /// Board rows in top-to-bottom order, each listing cells left to right.
    pub rows: Vec<Vec<CellKind>>,
    /// Entities in the order they were reported.
    pub entities: Vec<EntitySnapshot>,
}

/// Reason a cell was chosen as the next destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Floor cell from which a bomb would destroy boxes.
    BombPlacement,
    /// Cell holding a bonus item worth picking up.
    BonusPickup,
}

/// Destination selected for the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Board coordinate of the destination.
    pub position: Position,
    /// Manhattan distance from the actor to the destination.
    pub distance: u32,
    /// Utility of the destination cell.
    pub utility: i32,
    /// Reason the destination was chosen.
    pub kind: TargetKind,
}

/// Command sent back to the game for a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Walk toward the coordinate.
    Move(Position),
    /// Place a bomb on the current cell, then walk toward the coordinate.
    Bomb(Position),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(position) => write!(f, "MOVE {position}"),
            Self::Bomb(position) => write!(f, "BOMB {position}"),
        }
    }
}

/// Constants steering the decision heuristics.
///
/// Every field has a default, so a partial configuration file only overrides
/// the values it names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scan radius used while a bomb can be placed.
    pub scan_range: i32,
    /// Countdown of a freshly placed bomb, used as the scan radius otherwise.
    pub hazard_countdown: i32,
    /// Number of times the scan radius is doubled before giving up.
    pub scan_escalations: u32,
    /// Maximum distance at which a bonus item carries utility.
    pub bonus_proximity: u32,
    /// Utility assigned to a nearby bonus item.
    pub bonus_utility: i32,
    /// Blast range above which extra range items are worthless.
    pub range_saturation: i32,
    /// Bomb capacity above which extra bomb items are worthless.
    pub bomb_saturation: u32,
    /// Subtracted from the blast range stat to obtain the scoring radius.
    pub blast_range_offset: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scan_range: 4,
            hazard_countdown: 8,
            scan_escalations: 2,
            bonus_proximity: 2,
            bonus_utility: 5,
            range_saturation: 4,
            bomb_saturation: 2,
            blast_range_offset: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Direction, ItemKind, Position, SnapshotError, Target, TargetKind, Tuning};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Position::new(1, 1);
        let destination = Position::new(4, -1);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn step_moves_along_direction_offsets() {
        let origin = Position::new(3, 3);
        assert_eq!(origin.step(Direction::North, 2), Position::new(3, 1));
        assert_eq!(origin.step(Direction::East, 1), Position::new(4, 3));
        assert_eq!(origin.step(Direction::South, 3), Position::new(3, 6));
        assert_eq!(origin.step(Direction::West, 4), Position::new(-1, 3));
    }

    #[test]
    fn actions_render_protocol_lines() {
        assert_eq!(Action::Move(Position::new(3, 7)).to_string(), "MOVE 3 7");
        assert_eq!(Action::Bomb(Position::new(0, 12)).to_string(), "BOMB 0 12");
    }

    #[test]
    fn item_codes_map_to_bonus_cells() {
        assert_eq!(ItemKind::from_code(1), Some(ItemKind::ExtraRange));
        assert_eq!(ItemKind::from_code(2), Some(ItemKind::ExtraBomb));
        assert_eq!(ItemKind::from_code(3), None);
        assert!(ItemKind::ExtraRange.cell_kind().is_bonus());
        assert!(ItemKind::ExtraBomb.cell_kind().is_bonus());
    }

    #[test]
    fn default_tuning_matches_game_constants() {
        let tuning = Tuning::default();
        assert_eq!(tuning.scan_range, 4);
        assert_eq!(tuning.hazard_countdown, 8);
        assert_eq!(tuning.scan_escalations, 2);
        assert_eq!(tuning.bonus_proximity, 2);
        assert_eq!(tuning.bonus_utility, 5);
        assert_eq!(tuning.range_saturation, 4);
        assert_eq!(tuning.bomb_saturation, 2);
        assert_eq!(tuning.blast_range_offset, 1);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn target_round_trips_through_bincode() {
        assert_round_trip(&Target {
            position: Position::new(-2, 9),
            distance: 11,
            utility: 3,
            kind: TargetKind::BonusPickup,
        });
    }

    #[test]
    fn snapshot_errors_describe_the_rejection() {
        assert_eq!(
            SnapshotError::OutOfBounds.to_string(),
            "an entity lies outside the arena"
        );
        assert!(SnapshotError::DimensionMismatch
            .to_string()
            .contains("arena dimensions"));
    }

    #[test]
    fn snapshot_error_round_trips_through_bincode() {
        assert_round_trip(&SnapshotError::OutOfBounds);
    }
}
