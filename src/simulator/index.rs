//! Tick-bucketed event index.
//!
//! Groups start and end events by the tick they fire at, so the replay
//! only visits ticks that carry events. Events are pushed action by
//! action in scan order, start before end, which makes the order within
//! each bucket identical to the order a full per-tick scan would see.

use std::collections::BTreeMap;

use crate::models::{ActionId, ShopFloor};

/// Which event of an action fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    Start,
    End,
}

/// One scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TickEvent {
    pub action: ActionId,
    pub kind: EventKind,
}

/// Events bucketed by tick, restricted to `[0, limit)`.
#[derive(Debug, Default)]
pub(crate) struct TickIndex {
    buckets: BTreeMap<i64, Vec<TickEvent>>,
}

impl TickIndex {
    pub fn build(floor: &ShopFloor, limit: i64) -> Self {
        let mut buckets: BTreeMap<i64, Vec<TickEvent>> = BTreeMap::new();
        let in_horizon = |tick: i64| (0..limit).contains(&tick);

        for (id, action) in floor.actions() {
            if in_horizon(action.start) {
                buckets.entry(action.start).or_default().push(TickEvent {
                    action: id,
                    kind: EventKind::Start,
                });
            }
            if in_horizon(action.end) {
                buckets.entry(action.end).or_default().push(TickEvent {
                    action: id,
                    kind: EventKind::End,
                });
            }
        }

        Self { buckets }
    }

    /// Buckets in ascending tick order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[TickEvent])> {
        self.buckets.iter().map(|(&t, events)| (t, events.as_slice()))
    }

    pub fn event_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(spans: &[(i64, i64)]) -> ShopFloor {
        let mut floor = ShopFloor::new();
        let m = floor.add_machine("M1");
        let job = floor.add_job("J1");
        let op = floor.add_operation(job, "O11").unwrap();
        for &(start, duration) in spans {
            let id = floor.add_action(op, m, duration).unwrap();
            floor.action_mut(id).unwrap().schedule_at(start);
        }
        floor
    }

    #[test]
    fn test_events_outside_horizon_dropped() {
        // (start, end): (0,5) (8,12) (-2,1) (10,10)
        let floor = floor(&[(0, 5), (8, 4), (-2, 3), (10, 0)]);
        let index = TickIndex::build(&floor, 10);

        let ticks: Vec<i64> = index.iter().map(|(t, _)| t).collect();
        assert_eq!(ticks, vec![0, 1, 5, 8]);
        assert_eq!(index.event_count(), 4);
    }

    #[test]
    fn test_bucket_order_matches_scan_order() {
        // a0 ends at 3, a1 starts and ends at 3, a2 starts at 3
        let floor = floor(&[(0, 3), (3, 0), (3, 2)]);
        let index = TickIndex::build(&floor, 10);
        let ids = floor.action_ids();

        let (_, at_three) = index.iter().find(|(t, _)| *t == 3).unwrap();
        let order: Vec<(ActionId, EventKind)> =
            at_three.iter().map(|e| (e.action, e.kind)).collect();
        assert_eq!(
            order,
            vec![
                (ids[0], EventKind::End),
                (ids[1], EventKind::Start),
                (ids[1], EventKind::End),
                (ids[2], EventKind::Start),
            ]
        );
    }
}
