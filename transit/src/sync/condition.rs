//! Wait queues of a monitor.

use std::collections::VecDeque;
use std::thread::{self, Thread};

/// A handle to wake up one parked waiter.
///
/// The ticket identifies a single call to a waiting operation, so a thread
/// that was unparked for an unrelated reason can tell whether it was actually
/// notified.
pub(crate) struct ParkHandle {
    ticket: u64,
    thread: Thread,
}

impl ParkHandle {
    /// Consume the handle and unpark the underlying thread.
    fn unpark(self) {
        self.thread.unpark();
    }
}

/// One wait queue of a monitor.
///
/// The queue itself lives inside the monitor's lock, so every operation
/// below runs with the lock held.
#[derive(Default)]
pub(crate) struct Condition {
    waiters: VecDeque<ParkHandle>,
}

impl Condition {
    /// Register the current thread under `ticket`.
    pub(crate) fn park(&mut self, ticket: u64) {
        self.waiters.push_back(ParkHandle {
            ticket,
            thread: thread::current(),
        });
    }

    /// Whether `ticket` is still waiting for a notification.
    pub(crate) fn is_parked(&self, ticket: u64) -> bool {
        self.waiters.iter().any(|waiter| waiter.ticket == ticket)
    }

    /// Withdraw `ticket` from the queue.
    ///
    /// Returns `false` if a notifier already removed it.
    pub(crate) fn cancel(&mut self, ticket: u64) -> bool {
        match self.waiters.iter().position(|waiter| waiter.ticket == ticket) {
            Some(pos) => {
                self.waiters.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Wake up the oldest waiter, if any.
    pub(crate) fn signal(&mut self) -> bool {
        match self.waiters.pop_front() {
            Some(waiter) => {
                waiter.unpark();
                true
            }
            None => false,
        }
    }

    /// Wake up every waiter. Returns how many were woken.
    pub(crate) fn broadcast(&mut self) -> usize {
        let woken = self.waiters.len();
        for waiter in self.waiters.drain(..) {
            waiter.unpark();
        }
        woken
    }

    pub(crate) fn len(&self) -> usize {
        self.waiters.len()
    }
}
