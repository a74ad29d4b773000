//! Deadline-ordered queue of deferred tasks on the session clock.
//!
//! The queue owns no real timers. The browser host arms one timeout for [`TimerQueue::next_due`]
//! and tests advance a virtual clock; either way due tasks are popped in `(due, scheduled)`
//! order.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    entries: BTreeMap<(u64, TimerHandle), T>,
    next_handle: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_handle: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn schedule(&mut self, due_ms: u64, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.insert((due_ms, handle), task);
        handle
    }

    /// Cancels a scheduled task. Returns it when it was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let key = self.entries.keys().find(|(_, h)| *h == handle).copied()?;
        self.entries.remove(&key)
    }

    /// Cancels every task matching `predicate`, returning how many were dropped.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, task| !predicate(task));
        before - self.entries.len()
    }

    pub fn contains(&self, handle: TimerHandle) -> bool {
        self.entries.keys().any(|(_, h)| *h == handle)
    }

    pub fn next_due(&self) -> Option<u64> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    /// Removes and returns the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, T)> {
        let (due, _) = *self.entries.keys().next()?;
        if due > now_ms {
            return None;
        }
        self.entries
            .pop_first()
            .map(|((due, _), task)| (due, task))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tasks_pop_in_deadline_then_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(300, "b");
        queue.schedule(100, "a");
        queue.schedule(300, "c");

        assert_eq!(queue.next_due(), Some(100));
        assert_eq!(queue.pop_due(99), None);
        assert_eq!(queue.pop_due(300), Some((100, "a")));
        assert_eq!(queue.pop_due(300), Some((300, "b")));
        assert_eq!(queue.pop_due(300), Some((300, "c")));
        assert!(queue.is_empty());
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut queue = TimerQueue::new();
        let keep = queue.schedule(10, 1);
        let drop = queue.schedule(5, 2);
        assert_eq!(queue.cancel(drop), Some(2));
        assert_eq!(queue.cancel(drop), None);
        assert!(queue.contains(keep));
        assert_eq!(queue.pop_due(100), Some((10, 1)));
    }

    #[test]
    fn cancel_where_drops_matching_tasks() {
        let mut queue = TimerQueue::new();
        queue.schedule(1, 7);
        queue.schedule(2, 8);
        queue.schedule(3, 7);
        assert_eq!(queue.cancel_where(|task| *task == 7), 2);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_due(), Some(2));
    }
}
