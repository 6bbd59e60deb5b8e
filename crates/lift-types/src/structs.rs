//! Elevators and passengers as reported by the scoring server.

use serde::{Deserialize, Serialize};

use crate::enums::{Direction, ElevatorStatus};
use crate::ids::{ElevatorId, Floor, PassengerId};

/// A passenger, either waiting at a floor or riding inside a car.
///
/// The server calls waiting passengers "calls". Travel direction is never
/// sent; it is derived from the origin and destination floors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    /// Passenger identifier.
    pub id: PassengerId,
    /// Simulation time at which the passenger arrived.
    pub timestamp: u64,
    /// Origin floor.
    pub start: Floor,
    /// Destination floor.
    pub end: Floor,
}

impl Passenger {
    /// Whether the passenger wants to travel upward.
    pub const fn is_up_going(&self) -> bool {
        self.start < self.end
    }

    /// Whether the passenger wants to travel downward.
    pub const fn is_down_going(&self) -> bool {
        self.start > self.end
    }

    /// Derived travel direction, or `None` when origin equals destination.
    pub const fn direction(&self) -> Option<Direction> {
        if self.is_up_going() {
            Some(Direction::Up)
        } else if self.is_down_going() {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// An elevator car in one tick's snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elevator {
    /// Car identifier.
    pub id: ElevatorId,
    /// Current floor.
    pub floor: Floor,
    /// Passengers currently aboard. Order carries no meaning.
    #[serde(default)]
    pub passengers: Vec<Passenger>,
    /// Mechanical state.
    pub status: ElevatorStatus,
}

impl Elevator {
    /// Number of passengers aboard.
    pub fn carrying(&self) -> usize {
        self.passengers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(start: Floor, end: Floor) -> Passenger {
        Passenger {
            id: PassengerId::new(1),
            timestamp: 0,
            start,
            end,
        }
    }

    #[test]
    fn direction_is_derived_from_floors() {
        assert_eq!(passenger(1, 9).direction(), Some(Direction::Up));
        assert_eq!(passenger(9, 1).direction(), Some(Direction::Down));
        assert_eq!(passenger(4, 4).direction(), None);
    }

    #[test]
    fn elevator_without_passengers_field_parses() {
        let json = r#"{"id": 0, "floor": 1, "status": "STOPPED"}"#;
        let elevator: Result<Elevator, _> = serde_json::from_str(json);
        assert!(elevator.is_ok());
        let elevator = elevator.ok();
        assert_eq!(elevator.map(|e| e.carrying()), Some(0));
    }
}
