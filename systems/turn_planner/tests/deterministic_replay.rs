use hypersonic_core::{
    Action, CellKind, Command, EntitySnapshot, Event, Hazard, PlayerId, Position, TurnSnapshot,
};
use hypersonic_system_turn_planner::{Decision, TurnPlanner};
use hypersonic_world::{self as world, query, World};

const PLAYER: PlayerId = PlayerId::new(1);
const OPPONENT: PlayerId = PlayerId::new(0);

const BOARD: [&str; 3] = [
    "..0....",
    "......0",
    "....0..",
];

#[test]
fn deterministic_replay_walks_bombs_and_retargets() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");

    let actions: Vec<Action> = first.decisions.iter().map(|decision| decision.action).collect();
    assert_eq!(
        actions,
        vec![
            Action::Move(Position::new(2, 2)),
            Action::Bomb(Position::new(2, 2)),
            Action::Move(Position::new(4, 1)),
        ]
    );

    let retarget = &first.decisions[2];
    assert_eq!(retarget.scan_range, 8, "no bomb in hand widens the scan");
    assert_eq!(retarget.target.utility, 1);
    assert!(first.decisions.iter().all(|decision| !decision.fallback));
}

#[test]
fn planning_rewrites_utility_from_scratch_each_turn() {
    let commands = scripted_commands();
    let mut world = World::new();
    let mut planner = TurnPlanner::default();
    let mut events = Vec::new();
    let mut utility_maps = Vec::new();

    for command in commands {
        let observed = matches!(command, Command::ObserveTurn { .. });
        world::apply(&mut world, command, &mut events);
        if observed {
            let _ = planner.plan(&mut world);
            utility_maps.push(query::grid(&world).render_utility());
        }
    }

    assert_eq!(utility_maps.len(), 3);
    assert_eq!(utility_maps[0], utility_maps[1]);
    assert_ne!(utility_maps[1], utility_maps[2]);
    assert_eq!(query::grid(&world).utility(Position::new(2, 2)), 0);
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    events: Vec<Event>,
    decisions: Vec<Decision>,
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new();
    let mut planner = TurnPlanner::default();
    let mut events = Vec::new();
    let mut decisions = Vec::new();

    for command in commands {
        let mut generated = Vec::new();
        let observed = matches!(command, Command::ObserveTurn { .. });
        world::apply(&mut world, command, &mut generated);
        assert!(
            !generated
                .iter()
                .any(|event| matches!(event, Event::TurnRejected { .. })),
            "scripted snapshot rejected: {generated:?}"
        );
        events.extend(generated);

        if observed {
            decisions.push(planner.plan(&mut world));
        }
    }

    ReplayOutcome { events, decisions }
}

fn scripted_commands() -> Vec<Command> {
    let rows: Vec<Vec<CellKind>> = BOARD
        .iter()
        .map(|row| {
            row.chars()
                .map(|symbol| CellKind::from_symbol(symbol).expect("known symbol"))
                .collect()
        })
        .collect();

    let opponent = actor(OPPONENT, 6, 0, 1);
    vec![
        Command::ConfigureArena {
            width: 7,
            height: 3,
            player: PLAYER,
        },
        Command::ObserveTurn {
            snapshot: TurnSnapshot {
                rows: rows.clone(),
                entities: vec![opponent, actor(PLAYER, 0, 1, 1)],
            },
        },
        Command::ObserveTurn {
            snapshot: TurnSnapshot {
                rows: rows.clone(),
                entities: vec![opponent, actor(PLAYER, 2, 2, 1)],
            },
        },
        Command::ObserveTurn {
            snapshot: TurnSnapshot {
                rows,
                entities: vec![
                    opponent,
                    actor(PLAYER, 2, 1, 0),
                    EntitySnapshot::Hazard {
                        owner: PLAYER,
                        hazard: Hazard {
                            position: Position::new(2, 2),
                            timer: 7,
                            blast_range: 3,
                        },
                    },
                ],
            },
        },
    ]
}

fn actor(owner: PlayerId, x: i32, y: i32, bombs_available: u32) -> EntitySnapshot {
    EntitySnapshot::Actor {
        owner,
        position: Position::new(x, y),
        bombs_available,
        blast_range: 3,
    }
}
