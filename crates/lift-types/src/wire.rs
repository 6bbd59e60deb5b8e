//! Payloads exchanged with the scoring server.
//!
//! The server exposes three endpoints:
//!
//! - `POST /start/{user}/{problem}/{count}` answers with a [`SessionResponse`]
//!   carrying the session token.
//! - `GET /oncalls` answers with a [`Snapshot`] of the current tick.
//! - `POST /action` takes an [`ActionRequest`] and answers with a
//!   [`SessionResponse`].

use serde::{Deserialize, Serialize};

use crate::enums::CommandKind;
use crate::ids::{ElevatorId, PassengerId};
use crate::structs::{Elevator, Passenger};

/// Response to session start and to each action submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session token. Present on start; may be echoed on later responses.
    #[serde(default)]
    pub token: String,
    /// Simulation time.
    pub timestamp: u64,
    /// Elevator states after the request was applied.
    #[serde(default)]
    pub elevators: Vec<Elevator>,
    /// Whether the simulation has finished.
    pub is_end: bool,
}

/// World state for one tick, fetched from `/oncalls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Session token echoed by the server.
    #[serde(default)]
    pub token: String,
    /// Simulation time.
    pub timestamp: u64,
    /// Every elevator in the fleet.
    #[serde(default)]
    pub elevators: Vec<Elevator>,
    /// Every passenger still waiting at a floor, in arrival order.
    #[serde(default)]
    pub calls: Vec<Passenger>,
    /// Whether the simulation has finished.
    pub is_end: bool,
}

/// A single command addressed to one elevator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Target elevator.
    pub elevator_id: ElevatorId,
    /// What the elevator should do.
    pub command: CommandKind,
    /// Passengers involved. `null` on the wire unless boarding or alighting.
    pub call_ids: Option<Vec<PassengerId>>,
}

impl Command {
    /// Build a command that involves no passengers.
    pub const fn bare(elevator_id: ElevatorId, command: CommandKind) -> Self {
        Self {
            elevator_id,
            command,
            call_ids: None,
        }
    }

    /// Build a boarding or alighting command.
    ///
    /// The id list is dropped for commands that do not carry passengers.
    pub fn with_passengers(
        elevator_id: ElevatorId,
        command: CommandKind,
        call_ids: Vec<PassengerId>,
    ) -> Self {
        Self {
            elevator_id,
            command,
            call_ids: command.carries_passengers().then_some(call_ids),
        }
    }
}

/// Body of `POST /action`: the whole tick's commands in one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// One command per elevator at most.
    pub commands: Vec<Command>,
}
