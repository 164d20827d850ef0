//! Game loop that feeds observed turns through the planner.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use hypersonic_core::{Command, Event, Tuning};
use hypersonic_system_turn_planner::TurnPlanner;
use hypersonic_world::{self as world, World};

use crate::protocol::ProtocolReader;

/// Plays every turn available on `input`, writing one action per turn to `output`.
///
/// Returns the number of turns answered once the input ends between turns.
pub(crate) fn run<R, W>(input: R, mut output: W, tuning: Tuning) -> Result<u32>
where
    R: BufRead,
    W: Write,
{
    let mut reader = ProtocolReader::new(input);
    let mut world = World::new();
    let mut planner = TurnPlanner::new(tuning);
    let mut events = Vec::new();

    let header = reader.read_header().context("failed to read arena header")?;
    world::apply(
        &mut world,
        Command::ConfigureArena {
            width: header.width,
            height: header.height,
            player: header.player,
        },
        &mut events,
    );
    log_events(&mut events)?;

    let mut answered = 0;
    loop {
        let turn = answered + 1;
        let Some(snapshot) = reader
            .read_turn(&header)
            .with_context(|| format!("failed to read turn {turn}"))?
        else {
            break;
        };

        world::apply(&mut world, Command::ObserveTurn { snapshot }, &mut events);
        log_events(&mut events)?;

        let decision = planner.plan(&mut world);
        writeln!(output, "{}", decision.action)
            .and_then(|()| output.flush())
            .with_context(|| format!("failed to send action for turn {turn}"))?;
        answered = turn;
    }

    Ok(answered)
}

fn log_events(events: &mut Vec<Event>) -> Result<()> {
    for event in events.drain(..) {
        match event {
            Event::ArenaConfigured {
                width,
                height,
                player,
            } => tracing::info!(width, height, ?player, "arena configured"),
            Event::TurnObserved {
                turn,
                hazards,
                items,
            } => tracing::debug!(turn, hazards, items, "turn observed"),
            Event::TurnRejected { reason } => bail!("turn rejected: {reason}"),
        }
    }
    Ok(())
}
