use super::{ConnectorId, ConnectorKind};
use crate::{
    car::CarId,
    event::{Action, Event, EventSink},
    sync::{Monitor, WaitResult},
};
use std::{
    thread,
    time::{Duration, Instant},
};
use tracing::{debug, trace};

/// Boarding state of one side of the ferry.
///
/// `departed` and `landed` count sailings. A car boards sailing `departed`;
/// it is on its way once `departed` moved past that number and on the other
/// side once `landed` did.
#[derive(Default)]
struct Dock {
    boarded: usize,
    departed: u64,
    landed: u64,
}

/// A ferry line with a dock on each side, `0` and `1`.
///
/// Cars board on the side they come from. A boat sails as soon as `capacity`
/// cars are aboard, or `maximum_wait_time` after the first of them boarded,
/// and only carries cars from its own dock.
pub struct Ferry {
    id: ConnectorId,
    travel_time: Duration,
    maximum_wait_time: Duration,
    capacity: usize,
    monitor: Monitor<[Dock; 2]>,
}

impl Ferry {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(
        index: usize,
        travel_time: Duration,
        maximum_wait_time: Duration,
        capacity: usize,
    ) -> Self {
        assert!(capacity > 0, "F{index}: a ferry must carry at least one car");
        Self {
            id: ConnectorId::new(ConnectorKind::Ferry, index),
            travel_time,
            maximum_wait_time,
            capacity,
            monitor: Monitor::new(Default::default(), 2),
        }
    }

    pub fn id(&self) -> ConnectorId {
        self.id
    }

    pub fn travel_time(&self) -> Duration {
        self.travel_time
    }

    pub fn maximum_wait_time(&self) -> Duration {
        self.maximum_wait_time
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cars aboard the boat currently waiting at `side`.
    pub fn boarded(&self, side: usize) -> usize {
        self.monitor.enter()[side].boarded
    }

    /// Number of boats that left `side` so far.
    pub fn sailings(&self, side: usize) -> u64 {
        self.monitor.enter()[side].departed
    }

    /// Takes the ferry from side `from`, blocking until `car` landed on the
    /// other side.
    ///
    /// # Panics
    ///
    /// Panics if `from` is neither `0` nor `1`.
    pub fn pass(&self, car: CarId, from: usize, sink: &dyn EventSink) {
        assert!(from < 2, "{}: side {from} out of range", self.id);
        let emit = |action| {
            sink.emit(Event {
                car,
                connector: self.id,
                action,
            })
        };

        let mut docks = self.monitor.enter();
        docks[from].boarded += 1;
        let sailing = docks[from].departed;

        let captain = if docks[from].boarded == self.capacity {
            true
        } else {
            let deadline = Instant::now() + self.maximum_wait_time;
            loop {
                if docks[from].departed > sailing {
                    break false;
                }
                trace!(connector = %self.id, car, from, "waiting aboard");
                if docks.wait_until(from, deadline) == WaitResult::TimedOut {
                    break docks[from].departed == sailing;
                }
            }
        };

        if captain {
            let dock = &mut docks[from];
            assert!(dock.boarded > 0 && dock.boarded <= self.capacity);
            debug!(connector = %self.id, from, cars = dock.boarded, sailing, "boat sails");
            dock.boarded = 0;
            dock.departed += 1;
            docks.notify_all(from);

            emit(Action::StartPassing);
            docks.unlocked(|| thread::sleep(self.travel_time));
            // Boats from one dock land in the order they sailed.
            while docks[from].landed < sailing {
                docks.wait(from);
            }
            docks[from].landed = sailing + 1;
            docks.notify_all(from);
        } else {
            emit(Action::StartPassing);
            while docks[from].landed <= sailing {
                docks.wait(from);
            }
        }
        emit(Action::FinishPassing);
    }
}
