#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative per-turn world state for the Hypersonic bot.

mod ledger;

use hypersonic_core::{
    Actor, Command, EntitySnapshot, Event, Grid, PlayerId, SnapshotError, TurnSnapshot,
};

use crate::ledger::Ledger;

/// Represents the authoritative board and entity state.
///
/// Everything except the controlled actor is rebuilt from scratch whenever a
/// turn is observed. The actor is updated in place so that the largest bomb
/// capacity ever seen survives between turns.
#[derive(Debug)]
pub struct World {
    width: u32,
    height: u32,
    player_id: PlayerId,
    grid: Grid,
    player: Actor,
    ledger: Ledger,
    turns_observed: u32,
}

impl World {
    /// Creates an empty world awaiting arena configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            player_id: PlayerId::new(0),
            grid: Grid::new(0, 0),
            player: Actor::default(),
            ledger: Ledger::default(),
            turns_observed: 0,
        }
    }

    fn validate(&self, snapshot: &TurnSnapshot) -> Result<(), SnapshotError> {
        let width = usize::try_from(self.width).map_err(|_| SnapshotError::DimensionMismatch)?;
        let height =
            usize::try_from(self.height).map_err(|_| SnapshotError::DimensionMismatch)?;
        if snapshot.rows.len() != height || snapshot.rows.iter().any(|row| row.len() != width) {
            return Err(SnapshotError::DimensionMismatch);
        }

        if snapshot
            .entities
            .iter()
            .any(|entity| !self.grid.contains(entity.position()))
        {
            return Err(SnapshotError::OutOfBounds);
        }

        Ok(())
    }

    fn observe(&mut self, snapshot: &TurnSnapshot) -> Result<(), SnapshotError> {
        self.validate(snapshot)?;
        self.grid = Grid::from_rows(&snapshot.rows).ok_or(SnapshotError::DimensionMismatch)?;
        self.ledger.clear();

        for entity in &snapshot.entities {
            match *entity {
                EntitySnapshot::Actor {
                    owner,
                    position,
                    bombs_available,
                    blast_range,
                } => {
                    if owner == self.player_id {
                        self.player.position = position;
                        self.player.bombs_available = bombs_available;
                        self.player.blast_range = blast_range;
                    }
                }
                EntitySnapshot::Hazard { owner, hazard } => {
                    self.ledger.record_hazard(hazard, owner == self.player_id);
                }
                EntitySnapshot::Item(item) => {
                    let _ = self.grid.set_kind(item.position, item.kind.cell_kind());
                    self.ledger.record_item(item);
                }
            }
        }

        track_capacity(&mut self.player, self.ledger.player_hazards.len());
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureArena {
            width,
            height,
            player,
        } => {
            *world = World::new();
            world.width = width;
            world.height = height;
            world.player_id = player;
            world.grid = Grid::new(width, height);
            out_events.push(Event::ArenaConfigured {
                width,
                height,
                player,
            });
        }
        Command::ObserveTurn { snapshot } => match world.observe(&snapshot) {
            Ok(()) => {
                let turn = world.turns_observed;
                world.turns_observed = world.turns_observed.saturating_add(1);
                out_events.push(Event::TurnObserved {
                    turn,
                    hazards: world.ledger.hazard_count(),
                    items: world.ledger.items.len(),
                });
            }
            Err(reason) => out_events.push(Event::TurnRejected { reason }),
        },
    }
}

/// Exposes the board so the utility field for the current turn can be written.
pub fn grid_mut(world: &mut World) -> &mut Grid {
    &mut world.grid
}

fn track_capacity(actor: &mut Actor, placed: usize) {
    let placed = u32::try_from(placed).unwrap_or(u32::MAX);
    let held = actor.bombs_available.saturating_add(placed);
    actor.max_bombs = actor.max_bombs.max(held);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use hypersonic_core::{Actor, Grid, Hazard};

    /// Number of snapshots accepted since the arena was configured.
    #[must_use]
    pub fn turns_observed(world: &World) -> u32 {
        world.turns_observed
    }

    /// Provides read-only access to the board.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Controlled actor.
    #[must_use]
    pub fn player(world: &World) -> &Actor {
        &world.player
    }

    /// Every bomb on the board regardless of owner.
    pub fn hazards(world: &World) -> impl Iterator<Item = &Hazard> {
        world
            .ledger
            .player_hazards
            .iter()
            .chain(world.ledger.opponent_hazards.iter())
    }
}
