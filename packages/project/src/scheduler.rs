//! Debounced work scheduling.
//!
//! Two independent timers coalesce bursts of edits: a short one gates the
//! preview re-render, a longer one gates snapshot persistence. Each timer is
//! reset - not queued - by every edit, so only the last edit in a window
//! triggers work. That is coalescing, not loss: the store itself always
//! holds the latest state.
//!
//! The scheduler is a plain deadline check against a monotonic clock, driven
//! by whoever owns the loop. Nothing here spawns threads and an in-flight
//! pass is never cancelled; a newer deadline simply supersedes the output.

use std::time::{Duration, Instant};

/// Delay before a re-render after the last edit.
pub const RENDER_DEBOUNCE: Duration = Duration::from_millis(200);

/// Delay before persisting a snapshot after the last edit.
pub const PERSIST_DEBOUNCE: Duration = Duration::from_millis(400);

/// One resettable deadline.
#[derive(Clone, Debug)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Debounce {
            delay,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the deadline at `now + delay`. A pending deadline is
    /// replaced, never queued.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }

    /// If the deadline has passed, clear it and report `true`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Work that came due on a poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DueWork {
    pub render: bool,
    pub persist: bool,
}

impl DueWork {
    pub fn any(self) -> bool {
        self.render || self.persist
    }
}

/// The per-project pair of debounce timers.
#[derive(Clone, Debug)]
pub struct WorkQueue {
    render: Debounce,
    persist: Debounce,
}

impl WorkQueue {
    pub fn new() -> Self {
        WorkQueue::with_delays(RENDER_DEBOUNCE, PERSIST_DEBOUNCE)
    }

    pub fn with_delays(render: Duration, persist: Duration) -> Self {
        WorkQueue {
            render: Debounce::new(render),
            persist: Debounce::new(persist),
        }
    }

    /// Note an edit: both timers reset to their full delay.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.render.schedule(now);
        self.persist.schedule(now);
    }

    /// Which work is due at `now`; due timers clear as they fire.
    pub fn poll(&mut self, now: Instant) -> DueWork {
        DueWork {
            render: self.render.fire(now),
            persist: self.persist.fire(now),
        }
    }

    /// The earliest pending deadline, if any - what a driving loop should
    /// sleep until.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.render.deadline(), self.persist.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn idle(&self) -> bool {
        !self.render.pending() && !self.persist.pending()
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        WorkQueue::new()
    }
}
