//! # Monitor.
//!
//! A [`Monitor`] couples the state of one connector with a lock and a fixed
//! number of conditions. The conditions are addressed by index; connectors use
//! the approach a car comes from as the index, so every waiting population
//! (cars queued on one side of a bridge, cars boarding on one dock, ...) has
//! its own queue and can be woken independently.
//!
//! Each condition keeps a FIFO of park handles. A waiter registers itself
//! while holding the lock, releases the lock, and parks until a notifier
//! removes its handle and unparks it. Because registration happens under the
//! lock and std's park tokens are sticky, a notification that races with the
//! waiter releasing the lock is never lost. Unparks that did not come from a
//! notifier are absorbed: the waiter re-checks whether its handle is still
//! queued and parks again if it is.

use super::condition::Condition;
use parking_lot::{Mutex, MutexGuard};
use std::{
    ops::{Deref, DerefMut},
    thread,
    time::Instant,
};

/// Outcome of [`MonitorGuard::wait_until`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitResult {
    /// Another thread notified the condition before the deadline.
    Notified,
    /// The deadline passed without a notification.
    TimedOut,
}

impl WaitResult {
    /// Returns `true` if the wait ended because of the deadline.
    pub fn timed_out(self) -> bool {
        self == WaitResult::TimedOut
    }
}

struct Inner<S> {
    state: S,
    conditions: Box<[Condition]>,
    next_ticket: u64,
}

/// A lock over `S` with independently signalable conditions.
///
/// The state can only be accessed through the guard returned by [`enter`],
/// which is also the only way to wait on or notify a condition.
///
/// [`enter`]: Self::enter
///
/// # Examples
///
/// ```
/// use std::{sync::Arc, thread};
/// use transit::sync::Monitor;
///
/// const READY: usize = 0;
///
/// let monitor = Arc::new(Monitor::new(false, 1));
/// let waiter = {
///     let monitor = monitor.clone();
///     thread::spawn(move || {
///         let mut ready = monitor.enter();
///         while !*ready {
///             ready.wait(READY);
///         }
///     })
/// };
///
/// let mut ready = monitor.enter();
/// *ready = true;
/// ready.notify_all(READY);
/// drop(ready);
/// waiter.join().unwrap();
/// ```
pub struct Monitor<S> {
    inner: Mutex<Inner<S>>,
}

impl<S> Monitor<S> {
    /// Creates a monitor protecting `state` with `conditions` wait queues,
    /// numbered from `0` to `conditions - 1`.
    pub fn new(state: S, conditions: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state,
                conditions: (0..conditions).map(|_| Condition::default()).collect(),
                next_ticket: 0,
            }),
        }
    }

    /// Acquires the lock, blocking the current thread until it is able to do
    /// so.
    ///
    /// The lock is released when the returned guard goes out of scope.
    /// Entering a monitor the current thread already holds deadlocks.
    pub fn enter(&self) -> MonitorGuard<'_, S> {
        MonitorGuard {
            guard: self.inner.lock(),
        }
    }

    /// Consumes this monitor, returning the underlying state.
    pub fn into_inner(self) -> S {
        self.inner.into_inner().state
    }
}

/// An implementation of a "scoped lock" of a monitor.
///
/// The protected state is reachable through [`Deref`] and [`DerefMut`]. All
/// condition operations take the condition index and panic if it is out of
/// range, as that is a programming error rather than a runtime condition.
///
/// This structure is created by [`Monitor::enter`].
pub struct MonitorGuard<'a, S> {
    guard: MutexGuard<'a, Inner<S>>,
}

impl<S> MonitorGuard<'_, S> {
    fn register(&mut self, cond: usize) -> u64 {
        let inner = &mut *self.guard;
        let ticket = inner.next_ticket;
        inner.next_ticket += 1;
        inner.conditions[cond].park(ticket);
        ticket
    }

    /// Blocks the current thread until `cond` is notified.
    ///
    /// The lock is released while the thread is blocked and reacquired before
    /// this returns. The caller must re-check its predicate afterwards.
    pub fn wait(&mut self, cond: usize) {
        let ticket = self.register(cond);
        loop {
            MutexGuard::unlocked(&mut self.guard, thread::park);
            if !self.guard.conditions[cond].is_parked(ticket) {
                return;
            }
        }
    }

    /// Blocks the current thread until `cond` is notified or `deadline`
    /// passes, whichever comes first.
    ///
    /// Like [`wait`], the lock is released while blocked and held again when
    /// this returns. A notification that arrives exactly as the deadline
    /// passes is reported as [`WaitResult::Notified`].
    ///
    /// [`wait`]: Self::wait
    pub fn wait_until(&mut self, cond: usize, deadline: Instant) -> WaitResult {
        let ticket = self.register(cond);
        loop {
            let now = Instant::now();
            if now >= deadline {
                return if self.guard.conditions[cond].cancel(ticket) {
                    WaitResult::TimedOut
                } else {
                    WaitResult::Notified
                };
            }
            MutexGuard::unlocked(&mut self.guard, || thread::park_timeout(deadline - now));
            if !self.guard.conditions[cond].is_parked(ticket) {
                return WaitResult::Notified;
            }
        }
    }

    /// Wakes up the longest waiting thread on `cond`.
    ///
    /// Returns `false` if nobody was waiting. Notifications are not buffered.
    pub fn notify_one(&mut self, cond: usize) -> bool {
        self.guard.conditions[cond].signal()
    }

    /// Wakes up every thread waiting on `cond`, returning how many were woken.
    ///
    /// Notifications are not buffered: threads that start waiting afterwards
    /// are not affected.
    pub fn notify_all(&mut self, cond: usize) -> usize {
        self.guard.conditions[cond].broadcast()
    }

    /// Number of threads currently waiting on `cond`.
    pub fn waiters(&self, cond: usize) -> usize {
        self.guard.conditions[cond].len()
    }

    /// Runs `f` with the lock temporarily released.
    ///
    /// Other threads may enter the monitor while `f` runs. The lock is held
    /// again when this returns, even if `f` unwinds.
    pub fn unlocked<R>(&mut self, f: impl FnOnce() -> R) -> R {
        MutexGuard::unlocked(&mut self.guard, f)
    }
}

impl<S> Deref for MonitorGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.guard.state
    }
}

impl<S> DerefMut for MonitorGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.guard.state
    }
}
