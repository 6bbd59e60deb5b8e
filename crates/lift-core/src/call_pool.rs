//! Waiting passengers grouped by the floor they are waiting at.
//!
//! The pool is rebuilt wholesale from every snapshot, so nothing stale can
//! survive from one tick to the next. Within a tick, passengers leave the
//! pool only when a car is told to board them.

use std::collections::BTreeMap;

use lift_types::{Floor, Passenger, PassengerId};

/// Waiting passengers keyed by origin floor, each floor in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallPool {
    floors: BTreeMap<Floor, Vec<Passenger>>,
}

impl CallPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole pool with `calls`, grouped by origin floor.
    ///
    /// Passengers keep the order in which they appear in `calls`.
    pub fn ingest(&mut self, calls: impl IntoIterator<Item = Passenger>) {
        self.floors.clear();
        for call in calls {
            self.floors.entry(call.start).or_default().push(call);
        }
    }

    /// The passengers waiting at `floor`, oldest first.
    pub fn peek(&self, floor: Floor) -> &[Passenger] {
        self.floors.get(&floor).map(Vec::as_slice).unwrap_or_default()
    }

    /// Remove the given passengers from `floor`, keeping the rest in order.
    pub fn consume(&mut self, floor: Floor, ids: &[PassengerId]) {
        if let Some(waiting) = self.floors.get_mut(&floor) {
            waiting.retain(|p| !ids.contains(&p.id));
            if waiting.is_empty() {
                self.floors.remove(&floor);
            }
        }
    }

    /// Total number of waiting passengers across all floors.
    pub fn waiting(&self) -> usize {
        self.floors.values().map(Vec::len).sum()
    }

    /// Whether nobody is waiting anywhere.
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(id: u32, start: Floor, end: Floor) -> Passenger {
        Passenger {
            id: PassengerId::new(id),
            timestamp: u64::from(id),
            start,
            end,
        }
    }

    fn ids(passengers: &[Passenger]) -> Vec<u32> {
        passengers.iter().map(|p| p.id.into_inner()).collect()
    }

    #[test]
    fn ingest_groups_by_origin_in_arrival_order() {
        let mut pool = CallPool::new();
        pool.ingest(vec![call(1, 3, 9), call(2, 5, 1), call(3, 3, 1), call(4, 3, 7)]);

        assert_eq!(ids(pool.peek(3)), vec![1, 3, 4]);
        assert_eq!(ids(pool.peek(5)), vec![2]);
        assert_eq!(pool.waiting(), 4);
    }

    #[test]
    fn peek_unknown_floor_is_empty() {
        let pool = CallPool::new();
        assert!(pool.peek(7).is_empty());
        assert!(pool.is_empty());
    }

    #[test]
    fn ingest_replaces_previous_contents() {
        let mut pool = CallPool::new();
        pool.ingest(vec![call(1, 3, 9)]);
        pool.ingest(vec![call(2, 4, 9)]);

        assert!(pool.peek(3).is_empty());
        assert_eq!(ids(pool.peek(4)), vec![2]);
    }

    #[test]
    fn consume_keeps_remaining_order() {
        let mut pool = CallPool::new();
        pool.ingest(vec![call(1, 3, 9), call(2, 3, 8), call(3, 3, 7)]);

        pool.consume(3, &[PassengerId::new(2)]);

        assert_eq!(ids(pool.peek(3)), vec![1, 3]);
    }

    #[test]
    fn consume_last_passenger_empties_floor() {
        let mut pool = CallPool::new();
        pool.ingest(vec![call(1, 3, 9)]);

        pool.consume(3, &[PassengerId::new(1)]);

        assert!(pool.peek(3).is_empty());
        assert!(pool.is_empty());
    }

    #[test]
    fn consume_on_other_floor_is_a_no_op() {
        let mut pool = CallPool::new();
        pool.ingest(vec![call(1, 3, 9)]);

        pool.consume(4, &[PassengerId::new(1)]);

        assert_eq!(pool.waiting(), 1);
    }
}
