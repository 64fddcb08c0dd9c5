//! Cooperative task scheduling for the UI loop.
//!
//! Tasks are plain values that the owner interprets when they come due. The loop
//! calls [`Scheduler::pop_due`] until it returns `None`; a cancelled handle is
//! removed immediately, so its task can never be returned afterwards.

use std::time::{Duration, Instant};

/// Identifies one scheduled entry. Stale handles are harmless to cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    handle: TaskHandle,
    due: Instant,
    interval: Option<Duration>,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Runs `task` once, `delay` after `now`
    pub fn after(&mut self, now: Instant, delay: Duration, task: T) -> TaskHandle {
        self.push(now + delay, None, task)
    }

    /// Runs `task` every `interval`, first at `now + interval`
    pub fn every(&mut self, now: Instant, interval: Duration, task: T) -> TaskHandle {
        let interval = interval.max(Duration::from_millis(1));
        self.push(now + interval, Some(interval), task)
    }

    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Cancels the handle held in `slot`, if any, and clears the slot
    pub fn cancel_slot(&mut self, slot: &mut Option<TaskHandle>) {
        if let Some(handle) = slot.take() {
            self.cancel(handle);
        }
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Removes and returns the earliest task due at `now`.
    ///
    /// Periodic tasks are re-armed past `now`, so a late loop coalesces missed
    /// periods into one firing instead of replaying them.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TaskHandle, T)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.handle.0))
            .map(|(idx, _)| idx)?;

        match self.entries[idx].interval {
            Some(interval) => {
                let entry = &mut self.entries[idx];
                let mut next = entry.due + interval;
                if next <= now {
                    next = now + interval;
                }
                entry.due = next;
                Some((entry.handle, entry.task.clone()))
            }
            None => {
                let entry = self.entries.remove(idx);
                Some((entry.handle, entry.task))
            }
        }
    }

    fn push(&mut self, due: Instant, interval: Option<Duration>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            due,
            interval,
            task,
        });
        handle
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
