//! The dispatch pass: one decision per car per tick.
//!
//! [`Dispatcher`] owns everything the controller keeps between ticks: the
//! sweep registry and the (reused) action set. Each tick it rebuilds the
//! call pool from the snapshot, steps every car in elevator-id order, and
//! hands back the tick's commands. Cars do not coordinate. The only
//! interaction between them is that passengers boarded by one car leave the
//! call pool before the next car at the same floor is stepped.
//!
//! A car that breaks the input contract is logged and skipped; the pass
//! carries on with the rest of the fleet.

use lift_types::{Command, Elevator, Snapshot};
use tracing::{debug, warn};

use crate::actions::{Action, ActionSet};
use crate::call_pool::CallPool;
use crate::config::DispatchLimits;
use crate::step::{self, StepDecision, StepError};
use crate::sweep::SweepRegistry;

/// Per-run dispatch state.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    limits: DispatchLimits,
    sweeps: SweepRegistry,
    pool: CallPool,
    actions: ActionSet,
}

impl Dispatcher {
    /// Create a dispatcher with initial sweep directions for the fleet.
    pub fn new(limits: DispatchLimits) -> Self {
        Self {
            limits,
            sweeps: SweepRegistry::new(limits.elevator_count),
            pool: CallPool::new(),
            actions: ActionSet::new(limits.elevator_count),
        }
    }

    /// Run one full tick over `snapshot` and return the commands to submit.
    ///
    /// Rebuilds the call pool from the snapshot's waiting passengers, runs
    /// the dispatch pass over its elevators, and converts the resulting
    /// actions to wire commands in elevator-id order.
    pub fn dispatch(&mut self, snapshot: &Snapshot) -> Vec<Command> {
        self.pool.ingest(snapshot.calls.iter().cloned());
        self.run_pass(&snapshot.elevators).commands()
    }

    /// Step every car once against the current call pool.
    ///
    /// Clears the action set first. Cars are visited in elevator-id order
    /// regardless of the order of `elevators`.
    pub fn run_pass(&mut self, elevators: &[Elevator]) -> &ActionSet {
        self.actions.clear();

        let mut order: Vec<&Elevator> = elevators.iter().collect();
        order.sort_by_key(|elevator| elevator.id);

        let mut previous = None;
        for elevator in order {
            let outcome = if previous == Some(elevator.id) {
                Err(StepError::Duplicate {
                    elevator_id: elevator.id,
                })
            } else {
                self.evaluate(elevator)
            };
            previous = Some(elevator.id);

            if let Err(e) = outcome {
                warn!(
                    elevator = %elevator.id,
                    floor = elevator.floor,
                    status = ?elevator.status,
                    error = %e,
                    "Skipping elevator this tick"
                );
            }
        }

        &self.actions
    }

    /// Step one car and apply the outcome.
    fn evaluate(&mut self, elevator: &Elevator) -> Result<(), StepError> {
        let direction = step::validate(elevator, self.sweeps.assign(elevator.id), &self.limits)?;
        let waiting = self.pool.peek(elevator.floor);

        match step::step(elevator, direction, waiting, &self.limits) {
            StepDecision::Issue(action) => {
                let boarding = match &action {
                    Action::Enter(ids) => Some(ids.clone()),
                    _ => None,
                };
                self.actions.put(elevator.id, action)?;
                if let Some(ids) = boarding {
                    self.pool.consume(elevator.floor, &ids);
                }
            }
            StepDecision::Reverse => {
                let now = self.sweeps.flip(elevator.id);
                debug!(
                    elevator = %elevator.id,
                    floor = elevator.floor,
                    direction = ?now,
                    "Sweep reversed"
                );
            }
        }
        Ok(())
    }

    /// The limits this dispatcher was built with.
    pub const fn limits(&self) -> &DispatchLimits {
        &self.limits
    }

    /// The sweep registry.
    pub const fn sweeps(&self) -> &SweepRegistry {
        &self.sweeps
    }

    /// The call pool as left by the last pass.
    pub const fn pool(&self) -> &CallPool {
        &self.pool
    }

    /// Mutable access to the call pool, for feeding a pass directly.
    pub const fn pool_mut(&mut self) -> &mut CallPool {
        &mut self.pool
    }

    /// The actions decided by the last pass.
    pub const fn actions(&self) -> &ActionSet {
        &self.actions
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use lift_types::{
        CommandKind, Direction, ElevatorId, ElevatorStatus, Floor, Passenger, PassengerId,
    };

    use super::*;

    const LIMITS: DispatchLimits = DispatchLimits {
        elevator_count: 4,
        max_floor: 25,
        max_carrying: 8,
    };

    fn passenger(id: u32, start: Floor, end: Floor) -> Passenger {
        Passenger {
            id: PassengerId::new(id),
            timestamp: u64::from(id),
            start,
            end,
        }
    }

    fn car(id: u32, floor: Floor, status: ElevatorStatus, passengers: Vec<Passenger>) -> Elevator {
        Elevator {
            id: ElevatorId::new(id),
            floor,
            passengers,
            status,
        }
    }

    fn snapshot(elevators: Vec<Elevator>, calls: Vec<Passenger>) -> Snapshot {
        Snapshot {
            token: String::new(),
            timestamp: 0,
            elevators,
            calls,
            is_end: false,
        }
    }

    fn eid(raw: u32) -> ElevatorId {
        ElevatorId::new(raw)
    }

    fn pid(raw: u32) -> PassengerId {
        PassengerId::new(raw)
    }

    #[test]
    fn serving_a_call_walks_stop_open_enter() {
        let mut dispatcher = Dispatcher::new(LIMITS);
        let calls = vec![passenger(1, 5, 10)];

        let moving = snapshot(vec![car(0, 5, ElevatorStatus::MovingUp, vec![])], calls.clone());
        dispatcher.dispatch(&moving);
        assert_eq!(dispatcher.actions().get(eid(0)), Some(&Action::Stop));

        let stopped = snapshot(vec![car(0, 5, ElevatorStatus::Stopped, vec![])], calls.clone());
        dispatcher.dispatch(&stopped);
        assert_eq!(dispatcher.actions().get(eid(0)), Some(&Action::Open));

        let open = snapshot(vec![car(0, 5, ElevatorStatus::Open, vec![])], calls);
        let commands = dispatcher.dispatch(&open);
        assert_eq!(
            dispatcher.actions().get(eid(0)),
            Some(&Action::Enter(vec![pid(1)]))
        );
        assert!(dispatcher.pool().peek(5).is_empty());
        assert_eq!(commands[0].command, CommandKind::Enter);
        assert_eq!(commands[0].call_ids, Some(vec![pid(1)]));
    }

    #[test]
    fn exit_wins_and_leaves_pool_untouched() {
        let mut dispatcher = Dispatcher::new(LIMITS);
        let snap = snapshot(
            vec![car(0, 5, ElevatorStatus::Open, vec![passenger(2, 1, 5)])],
            vec![passenger(3, 5, 8)],
        );

        dispatcher.dispatch(&snap);

        assert_eq!(
            dispatcher.actions().get(eid(0)),
            Some(&Action::Exit(vec![pid(2)]))
        );
        assert_eq!(dispatcher.pool().peek(5).len(), 1);
    }

    #[test]
    fn boundary_stop_then_flip_then_move() {
        let mut dispatcher = Dispatcher::new(LIMITS);

        let arriving = snapshot(vec![car(0, 25, ElevatorStatus::MovingUp, vec![])], vec![]);
        dispatcher.dispatch(&arriving);
        assert_eq!(dispatcher.actions().get(eid(0)), Some(&Action::Stop));
        assert_eq!(dispatcher.sweeps().assign(eid(0)), Some(Direction::Up));

        let halted = snapshot(vec![car(0, 25, ElevatorStatus::Stopped, vec![])], vec![]);
        let commands = dispatcher.dispatch(&halted);
        assert!(commands.is_empty());
        assert_eq!(dispatcher.sweeps().assign(eid(0)), Some(Direction::Down));

        let commands = dispatcher.dispatch(&halted);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].command, CommandKind::Down);
    }

    #[test]
    fn partial_boarding_leaves_rest_waiting() {
        let mut dispatcher = Dispatcher::new(LIMITS);
        let aboard: Vec<Passenger> = (10..17).map(|id| passenger(id, 1, 20)).collect();
        let snap = snapshot(
            vec![car(0, 3, ElevatorStatus::Open, aboard)],
            vec![passenger(4, 3, 9), passenger(5, 3, 12)],
        );

        dispatcher.dispatch(&snap);

        assert_eq!(
            dispatcher.actions().get(eid(0)),
            Some(&Action::Enter(vec![pid(4)]))
        );
        let left: Vec<PassengerId> = dispatcher.pool().peek(3).iter().map(|p| p.id).collect();
        assert_eq!(left, vec![pid(5)]);
    }

    #[test]
    fn two_cars_at_same_floor_do_not_board_the_same_passenger() {
        let mut dispatcher = Dispatcher::new(LIMITS);
        let snap = snapshot(
            vec![
                car(2, 4, ElevatorStatus::Open, vec![]),
                car(0, 4, ElevatorStatus::Open, vec![]),
            ],
            vec![passenger(1, 4, 9)],
        );

        dispatcher.dispatch(&snap);

        // Car 0 is stepped first and takes the only passenger.
        assert_eq!(
            dispatcher.actions().get(eid(0)),
            Some(&Action::Enter(vec![pid(1)]))
        );
        assert_eq!(dispatcher.actions().get(eid(2)), Some(&Action::Close));
    }

    #[test]
    fn commands_come_out_in_elevator_order() {
        let mut dispatcher = Dispatcher::new(LIMITS);
        let snap = snapshot(
            vec![
                car(3, 10, ElevatorStatus::Stopped, vec![]),
                car(1, 10, ElevatorStatus::Stopped, vec![]),
                car(0, 10, ElevatorStatus::Stopped, vec![]),
                car(2, 10, ElevatorStatus::Stopped, vec![]),
            ],
            vec![],
        );

        let commands = dispatcher.dispatch(&snap);

        let order: Vec<(u32, CommandKind)> = commands
            .iter()
            .map(|c| (c.elevator_id.into_inner(), c.command))
            .collect();
        assert_eq!(
            order,
            vec![
                (0, CommandKind::Up),
                (1, CommandKind::Down),
                (2, CommandKind::Up),
                (3, CommandKind::Down),
            ]
        );
    }

    #[test]
    fn broken_car_is_skipped_and_others_still_served() {
        let mut dispatcher = Dispatcher::new(LIMITS);
        let overloaded: Vec<Passenger> = (10..19).map(|id| passenger(id, 1, 20)).collect();
        let snap = snapshot(
            vec![
                car(0, 4, ElevatorStatus::MovingUp, overloaded),
                car(1, 30, ElevatorStatus::Stopped, vec![]),
                car(7, 4, ElevatorStatus::Stopped, vec![]),
                car(2, 4, ElevatorStatus::Stopped, vec![]),
            ],
            vec![],
        );

        let commands = dispatcher.dispatch(&snap);

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].elevator_id, eid(2));
        assert_eq!(commands[0].command, CommandKind::Up);
    }

    #[test]
    fn duplicate_car_gets_one_command() {
        let mut dispatcher = Dispatcher::new(LIMITS);
        let snap = snapshot(
            vec![
                car(0, 4, ElevatorStatus::Stopped, vec![]),
                car(0, 4, ElevatorStatus::Stopped, vec![]),
            ],
            vec![],
        );

        let commands = dispatcher.dispatch(&snap);

        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn action_set_is_reset_between_ticks() {
        let mut dispatcher = Dispatcher::new(LIMITS);
        let first = snapshot(
            vec![
                car(0, 4, ElevatorStatus::Stopped, vec![]),
                car(1, 4, ElevatorStatus::Stopped, vec![]),
            ],
            vec![],
        );
        assert_eq!(dispatcher.dispatch(&first).len(), 2);

        let second = snapshot(vec![car(1, 4, ElevatorStatus::Stopped, vec![])], vec![]);
        let commands = dispatcher.dispatch(&second);

        assert_eq!(commands.len(), 1);
        assert_eq!(dispatcher.actions().get(eid(0)), None);
    }

    #[test]
    fn same_input_same_output() {
        let snap = snapshot(
            vec![
                car(0, 3, ElevatorStatus::Open, vec![passenger(9, 1, 3)]),
                car(1, 6, ElevatorStatus::MovingDown, vec![]),
                car(2, 6, ElevatorStatus::Stopped, vec![]),
            ],
            vec![passenger(1, 6, 2), passenger(2, 6, 11), passenger(3, 3, 8)],
        );

        let mut a = Dispatcher::new(LIMITS);
        let mut b = Dispatcher::new(LIMITS);

        assert_eq!(a.dispatch(&snap), b.dispatch(&snap));
        assert_eq!(a.sweeps(), b.sweeps());
    }

    #[test]
    fn run_pass_uses_pool_fed_directly() {
        let mut dispatcher = Dispatcher::new(LIMITS);
        dispatcher.pool_mut().ingest(vec![passenger(1, 8, 2)]);

        let actions = dispatcher.run_pass(&[car(1, 8, ElevatorStatus::MovingDown, vec![])]);

        assert_eq!(actions.get(eid(1)), Some(&Action::Stop));
        assert_eq!(actions.len(), 1);
    }
}
