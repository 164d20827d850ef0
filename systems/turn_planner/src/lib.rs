#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-turn decision step that turns the observed world into one action.
//!
//! Each turn the planner claims every cell already covered by pending bombs,
//! rescores the board for the controlled actor, and searches for the best
//! destination. The search radius starts small when a bomb is ready and is
//! doubled a bounded number of times before falling back to standing still.

use hypersonic_core::{Action, Actor, Grid, Position, Target, TargetKind, Tuning};
use hypersonic_system_blast_reach::{exclusion_zone, Exclusions};
use hypersonic_system_target_selection::TargetSelector;
use hypersonic_system_utility_field::UtilityField;
use hypersonic_world::{self as world, query, World};

/// Outcome of planning a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// Destination chosen for the turn.
    pub target: Target,
    /// Command to send back to the game.
    pub action: Action,
    /// Scan radius that produced the target.
    pub scan_range: i32,
    /// Indicates that no cell carried utility and the actor stays put.
    pub fallback: bool,
}

/// Turn planner that owns the scoring systems between turns.
#[derive(Debug, Default)]
pub struct TurnPlanner {
    tuning: Tuning,
    utility: UtilityField,
    selector: TargetSelector,
    previous_target: Option<Target>,
}

impl TurnPlanner {
    /// Creates a planner using the provided heuristics.
    #[must_use]
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            utility: UtilityField::new(tuning),
            selector: TargetSelector::new(),
            previous_target: None,
        }
    }

    /// Plans the action for the turn most recently observed by `world`.
    ///
    /// Rewrites the utility of every board cell before searching.
    pub fn plan(&mut self, world: &mut World) -> Decision {
        let actor = *query::player(world);
        let exclusions = exclusion_zone(query::grid(world), query::hazards(world));
        self.utility
            .build(world::grid_mut(world), &actor, &exclusions);

        let grid = query::grid(world);
        tracing::trace!("board:\n{}", grid.render_kinds());
        tracing::trace!("utility field:\n{}", grid.render_utility());
        if let Some(previous) = self.previous_target {
            tracing::debug!(?previous, "previous target");
        }

        let decision = self.decide(grid, &actor, &exclusions);
        tracing::debug!(
            turn = query::turns_observed(world),
            target = ?decision.target,
            scan_range = decision.scan_range,
            fallback = decision.fallback,
            "{}",
            decision.action
        );

        self.previous_target = if decision.target.position == actor.position {
            None
        } else {
            Some(decision.target)
        };
        decision
    }

    fn decide(&self, grid: &Grid, actor: &Actor, exclusions: &Exclusions) -> Decision {
        let mut scan_range = if actor.bombs_available > 0 {
            self.tuning.scan_range
        } else {
            self.tuning.hazard_countdown
        };

        let mut found = self
            .selector
            .select(grid, actor.position, scan_range, exclusions);
        let mut escalations = 0;
        while found.is_none() && escalations < self.tuning.scan_escalations {
            escalations += 1;
            scan_range = scan_range.saturating_mul(2);
            tracing::debug!(scan_range, "no target in range, widening scan");
            found = self
                .selector
                .select(grid, actor.position, scan_range, exclusions);
        }

        match found {
            Some(target) => Decision {
                target,
                action: action_for(&target, actor.position),
                scan_range,
                fallback: false,
            },
            None => Decision {
                target: standstill_target(grid, actor.position),
                action: Action::Move(actor.position),
                scan_range,
                fallback: true,
            },
        }
    }
}

fn action_for(target: &Target, position: Position) -> Action {
    if target.position == position && target.kind == TargetKind::BombPlacement {
        Action::Bomb(target.position)
    } else {
        Action::Move(target.position)
    }
}

fn standstill_target(grid: &Grid, position: Position) -> Target {
    let bonus = grid
        .cell(position)
        .map_or(false, |cell| cell.kind().is_bonus());
    Target {
        position,
        distance: 0,
        utility: 0,
        kind: if bonus {
            TargetKind::BonusPickup
        } else {
            TargetKind::BombPlacement
        },
    }
}
