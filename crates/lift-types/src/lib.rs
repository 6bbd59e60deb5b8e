//! Shared type definitions for the lift dispatch controller.
//!
//! This crate is the single source of truth for the types that cross the
//! boundary between the scoring server, the HTTP transport, and the
//! dispatch core.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for elevator and passenger identifiers
//! - [`enums`] -- Elevator status, sweep direction, and command kinds
//! - [`structs`] -- Elevators and passengers as the server reports them
//! - [`wire`] -- Request and response payloads of the scoring server API

pub mod enums;
pub mod ids;
pub mod structs;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use enums::{CommandKind, Direction, ElevatorStatus};
pub use ids::{ElevatorId, Floor, PassengerId};
pub use structs::{Elevator, Passenger};
pub use wire::{ActionRequest, Command, SessionResponse, Snapshot};
