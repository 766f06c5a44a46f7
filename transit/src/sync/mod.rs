//! # Synchronization Primitives.
//!
//! Every connector of the simulation (narrow bridges, ferries and crossroads)
//! is a shared resource that many car threads try to pass at the same time.
//! Each connector protects its bookkeeping with exactly one [`Monitor`]: a
//! mutual exclusion lock paired with a fixed set of conditions that threads
//! can sleep on until some predicate over the protected state becomes true.
//!
//! No other inter-thread signaling mechanism is used by the connectors. This
//! keeps every connector a self-contained critical section: a connector never
//! touches the monitor of another connector, so there is no lock ordering to
//! reason about.
//!
//! | Operation                        | Requires the lock? | Blocks? |
//! |----------------------------------|--------------------|---------|
//! | [`Monitor::enter`]               | No (acquires it)   | Yes     |
//! | [`MonitorGuard::wait`]           | Yes                | Yes     |
//! | [`MonitorGuard::wait_until`]     | Yes                | Yes, bounded |
//! | [`MonitorGuard::notify_one`]     | Yes                | No      |
//! | [`MonitorGuard::notify_all`]     | Yes                | No      |
//! | [`MonitorGuard::unlocked`]       | Yes (released for the closure) | Depends |
//!
//! A thread may only wait on or notify a condition while it holds the lock.
//! This is enforced by the API instead of being checked at runtime: the
//! waiting and signaling operations live on [`MonitorGuard`], which can only
//! be obtained from [`Monitor::enter`]. The guard releases the lock on every
//! exit path, including early returns and unwinding.
//!
//! Conditions are not one-shot signals. A woken thread must re-evaluate its
//! predicate, because the state may have changed again between the
//! notification and the moment it reacquired the lock:
//!
//! ```rust,no_run
//! use transit::sync::Monitor;
//!
//! let monitor = Monitor::new(0usize, 1);
//! let mut guard = monitor.enter();
//! while *guard == 0 {
//!     guard.wait(0);
//! }
//! ```
//!
//! [`Monitor`]: crate::sync::monitor::Monitor

mod condition;
pub mod monitor;

pub use monitor::*;
