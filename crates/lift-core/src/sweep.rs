//! Sweep directions and the move rule.
//!
//! Every car commits to one direction and keeps travelling that way until
//! it reaches the boundary floor for that direction (the top floor when
//! sweeping up, floor 1 when sweeping down). There it stops, and only once
//! it has been observed stopped at the boundary does its direction flip.
//! The stop and the flip therefore always land on different ticks.
//!
//! The per-car direction is the only state the controller carries from one
//! tick to the next.

use lift_types::{Direction, ElevatorId, ElevatorStatus, Floor};

use crate::actions::Action;

/// Sweep state of one car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarSweep {
    /// The car this entry belongs to.
    pub elevator_id: ElevatorId,
    /// The car's committed direction.
    pub direction: Direction,
}

/// Committed sweep direction of every car in the fleet.
///
/// Holds exactly one direction per car for the whole run. Entries are
/// indexed by elevator id, which the server numbers from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepRegistry {
    cars: Vec<CarSweep>,
}

impl SweepRegistry {
    /// Assign initial directions for a fleet of `elevator_count` cars.
    ///
    /// Directions alternate by index starting upward: car 0 sweeps up,
    /// car 1 down, car 2 up, and so on.
    pub fn new(elevator_count: usize) -> Self {
        let cars = (0..elevator_count)
            .filter_map(|index| {
                let raw = u32::try_from(index).ok()?;
                Some(CarSweep {
                    elevator_id: ElevatorId::new(raw),
                    direction: Direction::alternating(index),
                })
            })
            .collect();
        Self { cars }
    }

    /// The committed direction of `elevator_id`, or `None` if the car is
    /// not part of the configured fleet.
    pub fn assign(&self, elevator_id: ElevatorId) -> Option<Direction> {
        self.get(elevator_id).map(|car| car.direction)
    }

    /// Reverse the direction of `elevator_id` and return the new direction.
    pub fn flip(&mut self, elevator_id: ElevatorId) -> Option<Direction> {
        let car = elevator_id
            .index()
            .and_then(|index| self.cars.get_mut(index))?;
        car.direction = car.direction.flipped();
        Some(car.direction)
    }

    /// Number of cars tracked.
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    /// Whether the registry tracks no cars.
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    /// All entries in elevator-id order.
    pub fn iter(&self) -> impl Iterator<Item = &CarSweep> {
        self.cars.iter()
    }

    fn get(&self, elevator_id: ElevatorId) -> Option<&CarSweep> {
        elevator_id.index().and_then(|index| self.cars.get(index))
    }
}

/// What the move rule wants for a car with nobody to serve at its floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Movement {
    /// Send this command.
    Issue(Action),
    /// The car is halted at its boundary floor: reverse its direction and
    /// send nothing this tick.
    Reverse,
}

/// Ask a car to halt.
///
/// Returns the stop command still needed, or `None` when the car is already
/// halted (stopped, or standing with its doors open). Serving a call and
/// turning around at a boundary both go through here.
pub fn request_stop(status: ElevatorStatus) -> Option<Action> {
    if status.is_halted() {
        None
    } else {
        Some(Action::Stop)
    }
}

/// The floor where a car sweeping in `direction` turns around.
pub const fn boundary_floor(direction: Direction, max_floor: Floor) -> Floor {
    match direction {
        Direction::Up => max_floor,
        Direction::Down => 1,
    }
}

/// Decide how a car with closed doors and nobody to serve should move.
pub fn move_rule(
    direction: Direction,
    floor: Floor,
    status: ElevatorStatus,
    max_floor: Floor,
) -> Movement {
    if floor == boundary_floor(direction, max_floor) {
        return match request_stop(status) {
            Some(stop) => Movement::Issue(stop),
            None => Movement::Reverse,
        };
    }
    match direction {
        Direction::Up => Movement::Issue(Action::Up),
        Direction::Down => Movement::Issue(Action::Down),
    }
}
