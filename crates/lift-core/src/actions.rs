//! Per-elevator actions and the per-tick action set.
//!
//! An [`Action`] is what the step function decides for one car. The
//! [`ActionSet`] holds one slot per car, is reset at the start of every
//! dispatch pass, and is turned into wire [`Command`]s for a single batched
//! submission at the end of the tick.

use lift_types::{Command, CommandKind, ElevatorId, PassengerId};

/// Errors raised when writing into the action set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccumulatorError {
    /// The elevator id has no slot (it is outside the configured fleet).
    #[error("elevator {elevator_id} has no action slot (fleet size {capacity})")]
    UnknownElevator {
        /// The elevator that was addressed.
        elevator_id: ElevatorId,
        /// Number of slots in the set.
        capacity: usize,
    },

    /// The elevator already received an action this tick.
    #[error("elevator {elevator_id} already has an action this tick")]
    SlotTaken {
        /// The elevator that was addressed twice.
        elevator_id: ElevatorId,
    },
}

/// The single command decided for one elevator in one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Halt at the current floor.
    Stop,
    /// Open the doors.
    Open,
    /// Close the doors.
    Close,
    /// Move up one floor.
    Up,
    /// Move down one floor.
    Down,
    /// Board these waiting passengers.
    Enter(Vec<PassengerId>),
    /// Let these passengers alight.
    Exit(Vec<PassengerId>),
}

impl Action {
    /// The wire command kind for this action.
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Stop => CommandKind::Stop,
            Self::Open => CommandKind::Open,
            Self::Close => CommandKind::Close,
            Self::Up => CommandKind::Up,
            Self::Down => CommandKind::Down,
            Self::Enter(_) => CommandKind::Enter,
            Self::Exit(_) => CommandKind::Exit,
        }
    }

    /// Passengers involved; empty for everything except enter and exit.
    pub fn passengers(&self) -> &[PassengerId] {
        match self {
            Self::Enter(ids) | Self::Exit(ids) => ids,
            Self::Stop | Self::Open | Self::Close | Self::Up | Self::Down => &[],
        }
    }

    /// Address this action to `elevator_id` as a wire command.
    pub fn to_command(&self, elevator_id: ElevatorId) -> Command {
        match self {
            Self::Enter(ids) | Self::Exit(ids) => {
                Command::with_passengers(elevator_id, self.kind(), ids.clone())
            }
            Self::Stop | Self::Open | Self::Close | Self::Up | Self::Down => {
                Command::bare(elevator_id, self.kind())
            }
        }
    }
}

/// Fixed-size set of at most one action per elevator.
///
/// Slots are indexed by elevator id and allocated once for the whole fleet;
/// [`clear`](Self::clear) empties them in place at the start of each pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet {
    slots: Vec<Option<Action>>,
}

impl ActionSet {
    /// Create a set with one empty slot for each of `elevator_count` cars.
    pub fn new(elevator_count: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(elevator_count).collect(),
        }
    }

    /// Empty every slot without releasing the allocation.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Record `action` for `elevator_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::UnknownElevator`] if the id has no slot,
    /// or [`AccumulatorError::SlotTaken`] if the car already has an action
    /// this tick.
    pub fn put(&mut self, elevator_id: ElevatorId, action: Action) -> Result<(), AccumulatorError> {
        let capacity = self.slots.len();
        let slot = elevator_id
            .index()
            .and_then(|index| self.slots.get_mut(index))
            .ok_or(AccumulatorError::UnknownElevator {
                elevator_id,
                capacity,
            })?;
        if slot.is_some() {
            return Err(AccumulatorError::SlotTaken { elevator_id });
        }
        *slot = Some(action);
        Ok(())
    }

    /// The action recorded for `elevator_id`, if any.
    pub fn get(&self, elevator_id: ElevatorId) -> Option<&Action> {
        elevator_id
            .index()
            .and_then(|index| self.slots.get(index))
            .and_then(Option::as_ref)
    }

    /// Recorded actions in elevator-id order.
    pub fn iter(&self) -> impl Iterator<Item = (ElevatorId, &Action)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let id = u32::try_from(index).ok().map(ElevatorId::new)?;
            slot.as_ref().map(|action| (id, action))
        })
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no action has been recorded.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of slots (the fleet size).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The recorded actions as wire commands, in elevator-id order.
    pub fn commands(&self) -> Vec<Command> {
        self.iter()
            .map(|(elevator_id, action)| action.to_command(elevator_id))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn eid(raw: u32) -> ElevatorId {
        ElevatorId::new(raw)
    }

    #[test]
    fn put_and_get() {
        let mut set = ActionSet::new(3);
        set.put(eid(1), Action::Open).unwrap();

        assert_eq!(set.get(eid(1)), Some(&Action::Open));
        assert_eq!(set.get(eid(0)), None);
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }

    #[test]
    fn second_write_to_same_slot_is_rejected() {
        let mut set = ActionSet::new(2);
        set.put(eid(0), Action::Up).unwrap();

        let result = set.put(eid(0), Action::Stop);

        assert_eq!(result, Err(AccumulatorError::SlotTaken { elevator_id: eid(0) }));
        assert_eq!(set.get(eid(0)), Some(&Action::Up));
    }

    #[test]
    fn unknown_elevator_is_rejected() {
        let mut set = ActionSet::new(2);
        let result = set.put(eid(2), Action::Up);
        assert!(matches!(result, Err(AccumulatorError::UnknownElevator { .. })));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut set = ActionSet::new(4);
        set.put(eid(0), Action::Up).unwrap();
        set.put(eid(3), Action::Down).unwrap();

        set.clear();

        assert!(set.is_empty());
        assert_eq!(set.capacity(), 4);
        assert!(set.put(eid(0), Action::Close).is_ok());
    }

    #[test]
    fn commands_are_in_elevator_order() {
        let mut set = ActionSet::new(3);
        set.put(eid(2), Action::Down).unwrap();
        set.put(eid(0), Action::Enter(vec![PassengerId::new(8)])).unwrap();

        let commands = set.commands();

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].elevator_id, eid(0));
        assert_eq!(commands[0].command, CommandKind::Enter);
        assert_eq!(commands[0].call_ids, Some(vec![PassengerId::new(8)]));
        assert_eq!(commands[1].elevator_id, eid(2));
        assert_eq!(commands[1].call_ids, None);
    }

    #[test]
    fn only_enter_and_exit_carry_passengers() {
        let exit = Action::Exit(vec![PassengerId::new(1), PassengerId::new(2)]);
        assert_eq!(exit.passengers().len(), 2);
        assert_eq!(exit.kind(), CommandKind::Exit);
        assert!(Action::Close.passengers().is_empty());
    }
}
