//! Enumeration types for the lift dispatch controller.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Elevator status
// ---------------------------------------------------------------------------

/// Mechanical state of an elevator car as reported by the server.
///
/// The server spells these `STOPPED`, `OPENED`, `UPWARD` and `DOWNWARD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElevatorStatus {
    /// Halted between moves with the doors closed.
    #[serde(rename = "STOPPED")]
    Stopped,
    /// Halted with the doors open. Passengers can board or alight.
    #[serde(rename = "OPENED")]
    Open,
    /// Travelling upward.
    #[serde(rename = "UPWARD")]
    MovingUp,
    /// Travelling downward.
    #[serde(rename = "DOWNWARD")]
    MovingDown,
}

impl ElevatorStatus {
    /// Whether the car is standing still (stopped or doors open).
    pub const fn is_halted(self) -> bool {
        matches!(self, Self::Stopped | Self::Open)
    }

    /// Whether the doors are open.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

// ---------------------------------------------------------------------------
// Sweep direction
// ---------------------------------------------------------------------------

/// The direction an elevator is committed to sweep in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Sweeping toward the top floor.
    Up,
    /// Sweeping toward floor 1.
    Down,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Initial direction for the car at `index` in the fleet.
    ///
    /// Even indices start upward, odd indices start downward.
    pub const fn alternating(index: usize) -> Self {
        if index % 2 == 0 { Self::Up } else { Self::Down }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Kind of command sent to the server for one elevator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandKind {
    /// Halt at the current floor.
    Stop,
    /// Open the doors.
    Open,
    /// Close the doors.
    Close,
    /// Move one floor up.
    Up,
    /// Move one floor down.
    Down,
    /// Board the listed waiting passengers.
    Enter,
    /// Let the listed passengers alight.
    Exit,
}

impl CommandKind {
    /// Whether this command carries a list of passenger ids.
    pub const fn carries_passengers(self) -> bool {
        matches!(self, Self::Enter | Self::Exit)
    }
}
