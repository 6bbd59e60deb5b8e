//! The per-elevator step function.
//!
//! Given one car, its committed direction, and the passengers waiting at its
//! floor, [`step`] picks the single command that car gets this tick. The
//! rules are evaluated in strict priority order:
//!
//! 1. If someone must alight here, or someone waiting here wants to travel
//!    in the car's direction and fits, the car stops, then opens, then lets
//!    passengers out, and only then lets passengers in.
//! 2. Otherwise open doors are closed first.
//! 3. Otherwise the [move rule](crate::sweep::move_rule) applies.
//!
//! Every branch returns, so a car can never receive two commands in one
//! tick. Commands that would break a mechanical constraint are never built:
//! alighting is limited to passengers whose destination is this floor, and
//! boarding is limited to matching passengers that fit.

use lift_types::{Direction, Elevator, ElevatorId, Floor, Passenger, PassengerId};

use crate::actions::{AccumulatorError, Action};
use crate::config::DispatchLimits;
use crate::sweep::{self, Movement};

/// A car whose snapshot breaks the dispatcher's input contract.
///
/// The car is skipped for the tick; the rest of the fleet is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    /// The car is not part of the configured fleet.
    #[error("elevator {elevator_id} has no sweep direction assigned")]
    Unassigned {
        /// The unknown car.
        elevator_id: ElevatorId,
    },

    /// The car reports a floor outside `1..=max_floor`.
    #[error("elevator {elevator_id} is at floor {floor}, outside 1..={max_floor}")]
    FloorOutOfRange {
        /// The offending car.
        elevator_id: ElevatorId,
        /// The reported floor.
        floor: Floor,
        /// The configured top floor.
        max_floor: Floor,
    },

    /// The car already carries more passengers than it may.
    #[error("elevator {elevator_id} carries {carrying} passengers, capacity is {max_carrying}")]
    OverCapacity {
        /// The offending car.
        elevator_id: ElevatorId,
        /// Passengers aboard.
        carrying: usize,
        /// The configured capacity.
        max_carrying: usize,
    },

    /// The same car appears more than once in the snapshot.
    #[error("elevator {elevator_id} appears more than once in the snapshot")]
    Duplicate {
        /// The repeated car.
        elevator_id: ElevatorId,
    },

    /// The decided action could not be recorded.
    #[error("action slot error: {source}")]
    Slot {
        /// The underlying accumulator error.
        #[from]
        source: AccumulatorError,
    },
}

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepDecision {
    /// Send this command to the car.
    Issue(Action),
    /// The car is halted at its boundary floor: flip its direction and send
    /// nothing this tick.
    Reverse,
}

/// Who would board or alight at the car's current floor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Passengers aboard whose destination is this floor.
    pub exiting: Vec<PassengerId>,
    /// Waiting passengers travelling the car's way, oldest first, capped at
    /// the car's free capacity.
    pub entering: Vec<PassengerId>,
}

impl Candidates {
    /// Whether nobody needs the doors opened here.
    pub fn is_empty(&self) -> bool {
        self.exiting.is_empty() && self.entering.is_empty()
    }
}

/// Check a car against the dispatcher's input contract.
///
/// Returns the car's committed direction when the car can be stepped.
///
/// # Errors
///
/// Returns [`StepError::Unassigned`], [`StepError::FloorOutOfRange`] or
/// [`StepError::OverCapacity`] describing the first breach found.
pub fn validate(
    elevator: &Elevator,
    direction: Option<Direction>,
    limits: &DispatchLimits,
) -> Result<Direction, StepError> {
    let direction = direction.ok_or(StepError::Unassigned {
        elevator_id: elevator.id,
    })?;
    if elevator.floor < 1 || elevator.floor > limits.max_floor {
        return Err(StepError::FloorOutOfRange {
            elevator_id: elevator.id,
            floor: elevator.floor,
            max_floor: limits.max_floor,
        });
    }
    if elevator.carrying() > limits.max_carrying {
        return Err(StepError::OverCapacity {
            elevator_id: elevator.id,
            carrying: elevator.carrying(),
            max_carrying: limits.max_carrying,
        });
    }
    Ok(direction)
}

/// Work out who would alight and who would board at the car's floor.
///
/// `waiting` is the call pool's list for the car's floor.
pub fn candidates(
    elevator: &Elevator,
    direction: Direction,
    waiting: &[Passenger],
    max_carrying: usize,
) -> Candidates {
    let exiting = elevator
        .passengers
        .iter()
        .filter(|p| p.end == elevator.floor)
        .map(|p| p.id)
        .collect();

    let free = max_carrying.saturating_sub(elevator.carrying());
    let entering = waiting
        .iter()
        .filter(|p| p.direction() == Some(direction))
        .take(free)
        .map(|p| p.id)
        .collect();

    Candidates { exiting, entering }
}

/// Decide the single next command for one car.
///
/// The caller is expected to have run [`validate`] first.
pub fn step(
    elevator: &Elevator,
    direction: Direction,
    waiting: &[Passenger],
    limits: &DispatchLimits,
) -> StepDecision {
    let Candidates { exiting, entering } =
        candidates(elevator, direction, waiting, limits.max_carrying);

    if !exiting.is_empty() || !entering.is_empty() {
        if let Some(stop) = sweep::request_stop(elevator.status) {
            return StepDecision::Issue(stop);
        }
        if !elevator.status.is_open() {
            return StepDecision::Issue(Action::Open);
        }
        if !exiting.is_empty() {
            return StepDecision::Issue(Action::Exit(exiting));
        }
        return StepDecision::Issue(Action::Enter(entering));
    }

    if elevator.status.is_open() {
        return StepDecision::Issue(Action::Close);
    }

    match sweep::move_rule(direction, elevator.floor, elevator.status, limits.max_floor) {
        Movement::Issue(action) => StepDecision::Issue(action),
        Movement::Reverse => StepDecision::Reverse,
    }
}
