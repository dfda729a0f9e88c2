//! Deferred work for the page.
//!
//! Timers and animation frames are modeled as [`Task`] values in a queue keyed
//! by host time, so debounce and throttle behavior is deterministic and
//! testable. The host only has to wake the page at [`Scheduler::next_deadline`]
//! and on animation frames.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

use crate::modal::ModalId;

/// Work the page performs later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Evaluate the latest search query
    RunSearch,
    /// Recompute scroll-to-top visibility
    RefreshScrollTop,
    /// Reposition parallax elements
    ApplyParallax,
    /// Remove a dismissed gallery modal
    RemoveModal(ModalId),
    /// Leave the page
    Navigate(String),
}

/// Named slot holding at most one pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Search,
    Parallax,
}

/// Identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, PartialEq, Eq)]
struct Deadline {
    due: Duration,
    id: TaskId,
}

impl PartialOrd for Deadline {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Deadline {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (earliest first, then oldest)
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.id.cmp(&self.id))
    }
}

#[derive(Debug)]
struct Pending {
    task: Task,
    slot: Option<Slot>,
}

/// Timer queue plus next-frame queue.
#[derive(Debug, Default)]
pub struct Scheduler {
    deadlines: BinaryHeap<Deadline>,
    pending: HashMap<TaskId, Pending>,
    slots: HashMap<Slot, TaskId>,
    frame: Vec<Task>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire-and-forget task after `delay`.
    pub fn schedule_after(&mut self, now: Duration, delay: Duration, task: Task) -> TaskId {
        self.push(now + delay, task, None)
    }

    /// Cancel whatever `slot` holds and schedule `task` in its place.
    pub fn replace(&mut self, slot: Slot, now: Duration, delay: Duration, task: Task) -> TaskId {
        if let Some(previous) = self.slots.remove(&slot) {
            self.pending.remove(&previous);
        }
        self.push(now + delay, task, Some(slot))
    }

    /// Schedule `task` in `slot` only if the slot is empty.
    pub fn schedule_if_idle(
        &mut self,
        slot: Slot,
        now: Duration,
        delay: Duration,
        task: Task,
    ) -> Option<TaskId> {
        if self.is_pending(slot) {
            return None;
        }
        Some(self.push(now + delay, task, Some(slot)))
    }

    /// Cancel a scheduled task. Returns false if it already ran or was
    /// cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.pending.remove(&id) {
            Some(entry) => {
                if let Some(slot) = entry.slot {
                    self.slots.remove(&slot);
                }
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    /// Queue `task` for the next animation frame.
    pub fn request_frame(&mut self, task: Task) {
        self.frame.push(task);
    }

    pub fn wants_frame(&self) -> bool {
        !self.frame.is_empty()
    }

    /// Drain the tasks queued for this frame.
    pub fn take_frame(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.frame)
    }

    /// Earliest live deadline.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.discard_cancelled();
        self.deadlines.peek().map(|d| d.due)
    }

    /// Pop the next task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Task> {
        self.discard_cancelled();
        if self.deadlines.peek()?.due > now {
            return None;
        }
        let deadline = self.deadlines.pop()?;
        let entry = self.pending.remove(&deadline.id)?;
        if let Some(slot) = entry.slot {
            self.slots.remove(&slot);
        }
        Some(entry.task)
    }

    /// Number of live timer tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn push(&mut self, due: Duration, task: Task, slot: Option<Slot>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        self.deadlines.push(Deadline { due, id });
        self.pending.insert(id, Pending { task, slot });
        if let Some(slot) = slot {
            self.slots.insert(slot, id);
        }
        id
    }

    /// Drop heap entries whose task was cancelled or replaced.
    fn discard_cancelled(&mut self) {
        while let Some(top) = self.deadlines.peek() {
            if self.pending.contains_key(&top.id) {
                break;
            }
            self.deadlines.pop();
        }
    }
}
