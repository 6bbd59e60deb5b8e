//! Simulation loop runner.
//!
//! This module provides [`run_simulation`], the top-level async function
//! that drives the controller tick by tick:
//!
//! 1. fetch the next [`Snapshot`] from the [`Transport`]
//! 2. run the dispatch pass over it
//! 3. submit the tick's commands in one batch
//!
//! until the server reports the end of the simulation or the configured
//! tick bound is hit. The dispatcher itself never blocks; the only
//! suspension points are the two transport calls.

use std::future::Future;

use lift_types::{Command, Snapshot};
use tracing::{debug, info, trace, warn};

use crate::config::SimulationBoundsConfig;
use crate::dispatch::Dispatcher;

/// The boundary between the dispatcher and the scoring server.
///
/// Implementations own the network session. The runner calls
/// [`fetch`](Self::fetch) and [`submit`](Self::submit) exactly once per
/// tick, in that order.
pub trait Transport {
    /// Error raised by the transport.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the world state for the next tick.
    fn fetch(&mut self) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send;

    /// Submit the tick's commands. Resolves to `true` once the server
    /// reports that the simulation has ended.
    fn submit(
        &mut self,
        commands: &[Command],
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// Fetching a snapshot or submitting commands failed.
    #[error("transport error at tick {tick}: {source}")]
    Transport {
        /// The tick during which the failure happened (1-based).
        tick: u64,
        /// The underlying transport error.
        source: E,
    },
}

/// Reason why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// The server reported the end of the simulation.
    ServerEnded,
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
}

/// Summary of a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// Tick counter (1-based, counted by this controller).
    pub tick: u64,
    /// Server simulation time of the snapshot the tick was decided on.
    pub timestamp: u64,
    /// Number of commands submitted.
    pub commands: usize,
    /// Passengers waiting at floors when the tick started.
    pub waiting: usize,
    /// Passengers riding in cars when the tick started.
    pub carrying: usize,
}

/// Result of the simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Run the controller until the server ends the simulation or a bound is hit.
///
/// # Errors
///
/// Returns [`RunnerError::Transport`] as soon as a fetch or submit fails.
/// The runner does not retry.
pub async fn run_simulation<T: Transport>(
    dispatcher: &mut Dispatcher,
    transport: &mut T,
    bounds: &SimulationBoundsConfig,
) -> Result<SimulationResult, RunnerError<T::Error>> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        elevators = dispatcher.limits().elevator_count,
        max_floor = dispatcher.limits().max_floor,
        max_carrying = dispatcher.limits().max_carrying,
        max_ticks = bounds.max_ticks,
        "Simulation starting"
    );

    loop {
        let tick = total_ticks.saturating_add(1);

        // --- Fetch ---
        let snapshot = transport
            .fetch()
            .await
            .map_err(|source| RunnerError::Transport { tick, source })?;
        log_status(&snapshot);

        if snapshot.is_end {
            info!(timestamp = snapshot.timestamp, "Server reports simulation end");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::ServerEnded,
                final_summary: last_summary,
                total_ticks,
            });
        }

        // --- Dispatch ---
        let commands = dispatcher.dispatch(&snapshot);
        for command in &commands {
            debug!(
                tick,
                elevator = %command.elevator_id,
                command = ?command.command,
                call_ids = ?command.call_ids,
                "Command issued"
            );
        }

        // --- Submit ---
        let ended = transport
            .submit(&commands)
            .await
            .map_err(|source| RunnerError::Transport { tick, source })?;

        total_ticks = tick;
        let summary = TickSummary {
            tick,
            timestamp: snapshot.timestamp,
            commands: commands.len(),
            waiting: snapshot.calls.len(),
            carrying: snapshot.elevators.iter().map(|e| e.carrying()).sum(),
        };
        debug!(
            tick,
            timestamp = summary.timestamp,
            commands = summary.commands,
            waiting = summary.waiting,
            carrying = summary.carrying,
            "Tick complete"
        );

        if ended {
            info!(tick, timestamp = summary.timestamp, "Server reports simulation end");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::ServerEnded,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        if bounds.max_ticks > 0 && total_ticks >= bounds.max_ticks {
            info!(tick, max_ticks = bounds.max_ticks, "Tick limit reached");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        last_summary = Some(summary);
    }
}

/// Dump one snapshot at debug level: every car with its riders, then every
/// waiting call at trace level.
pub fn log_status(snapshot: &Snapshot) {
    debug!(
        timestamp = snapshot.timestamp,
        is_end = snapshot.is_end,
        elevators = snapshot.elevators.len(),
        calls = snapshot.calls.len(),
        "Snapshot received"
    );
    for elevator in &snapshot.elevators {
        debug!(
            elevator = %elevator.id,
            status = ?elevator.status,
            floor = elevator.floor,
            carrying = elevator.carrying(),
            "Elevator status"
        );
        for rider in &elevator.passengers {
            trace!(
                elevator = %elevator.id,
                passenger = %rider.id,
                start = rider.start,
                end = rider.end,
                timestamp = rider.timestamp,
                "Riding"
            );
        }
    }
    for call in &snapshot.calls {
        trace!(
            passenger = %call.id,
            start = call.start,
            end = call.end,
            timestamp = call.timestamp,
            "Waiting"
        );
    }
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        final_timestamp = result.final_summary.as_ref().map(|s| s.timestamp),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            waiting = summary.waiting,
            carrying = summary.carrying,
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}
