//! # Shared single lane.
//!
//! A [`Lane`] is a stretch of road wide enough for one direction of traffic,
//! entered from `N` approaches. It is the common core of the
//! [`NarrowBridge`] (`N = 2`) and the [`Crossroad`] (`N = 4`).
//!
//! ## State
//!
//! - one FIFO queue of waiting cars per approach,
//! - the `current` approach, which owns the right to enter the lane,
//! - the occupancy record: cars that are on the lane right now, with the
//!   approach they entered from.
//!
//! The occupancy record exists because the monitor is released while a car
//! crosses; the lock alone cannot tell whether the lane is in use.
//!
//! ## Admission
//!
//! A car enters when its approach is `current`, it is at the head of its
//! queue, and nobody from another approach is still on the lane. Cars of the
//! current approach may follow each other onto the lane, keeping a short
//! follow delay between them.
//!
//! When the lane is empty and the `current` approach has nobody left in its
//! queue, an arriving car switches the lane to its own approach. Otherwise the
//! car waits on its approach's condition with a deadline of
//! `maximum_wait_time`. If the deadline passes, the car claims `current` for
//! its approach anyway. A claimed lane admits nobody until the previous
//! direction has drained, and the claim stays pending until a car of the
//! claiming approach is on the lane: meanwhile no other approach may switch
//! or claim. This bounds how long an approach can be starved: at most the
//! wait time plus the crossings already in progress.
//!
//! When the last car leaves the lane it wakes the next approach in rotation
//! that has cars waiting. For two approaches this is simply the opposite side.
//!
//! [`NarrowBridge`]: super::NarrowBridge
//! [`Crossroad`]: super::Crossroad

use crate::{
    car::CarId,
    connector::ConnectorId,
    event::{Action, Event, EventSink},
    sync::{Monitor, WaitResult},
};
use std::{
    collections::VecDeque,
    thread,
    time::{Duration, Instant},
};
use tracing::{debug, trace};

struct LaneState<const N: usize> {
    queues: [VecDeque<CarId>; N],
    current: usize,
    /// Approach that took the lane over after a timeout and has not entered
    /// yet.
    claim: Option<usize>,
    crossing: VecDeque<(CarId, usize)>,
}

impl<const N: usize> LaneState<N> {
    fn new() -> Self {
        Self {
            queues: std::array::from_fn(|_| VecDeque::new()),
            current: 0,
            claim: None,
            crossing: VecDeque::new(),
        }
    }

    /// Whether `car` may enter the lane right now.
    fn admits(&self, car: CarId, from: usize) -> bool {
        self.current == from
            && self.queues[from].front() == Some(&car)
            && self.crossing.iter().all(|&(_, approach)| approach == from)
    }

    /// Whether the lane can be handed over to `from` without waiting.
    ///
    /// An approach that still has cars queued keeps the lane until they are
    /// through or someone times out.
    fn may_switch_to(&self, from: usize) -> bool {
        self.current != from
            && self.claim.is_none()
            && self.crossing.is_empty()
            && self.queues[self.current].is_empty()
    }

    /// Whether a car of `from` that waited too long may take the lane over.
    fn may_claim(&self, from: usize) -> bool {
        self.current != from && self.claim.is_none()
    }

    fn leave(&mut self, car: CarId) {
        let Some(pos) = self.crossing.iter().position(|&(c, _)| c == car) else {
            panic!("car {car} left a lane it never entered");
        };
        self.crossing.remove(pos);
    }

    /// The first approach after `from` in rotation that has cars waiting.
    fn next_contender(&self, from: usize) -> usize {
        (1..=N)
            .map(|k| (from + k) % N)
            .find(|&approach| !self.queues[approach].is_empty())
            .unwrap_or((from + 1) % N)
    }
}

/// A single lane entered from `N` approaches.
pub struct Lane<const N: usize> {
    id: ConnectorId,
    travel_time: Duration,
    maximum_wait_time: Duration,
    follow_delay: Duration,
    monitor: Monitor<LaneState<N>>,
}

impl<const N: usize> Lane<N> {
    pub fn new(
        id: ConnectorId,
        travel_time: Duration,
        maximum_wait_time: Duration,
        follow_delay: Duration,
    ) -> Self {
        Self {
            id,
            travel_time,
            maximum_wait_time,
            follow_delay,
            monitor: Monitor::new(LaneState::new(), N),
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

    /// The approach that currently owns the lane.
    pub fn current(&self) -> usize {
        self.monitor.enter().current
    }

    /// Number of cars on the lane right now.
    pub fn occupancy(&self) -> usize {
        self.monitor.enter().crossing.len()
    }

    /// Passes `car` from approach `from` over the lane.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not an approach of this lane.
    pub fn pass(&self, car: CarId, from: usize, sink: &dyn EventSink) {
        assert!(from < N, "{}: approach {from} out of range", self.id);
        let emit = |action| {
            sink.emit(Event {
                car,
                connector: self.id,
                action,
            })
        };

        let mut lane = self.monitor.enter();
        lane.queues[from].push_back(car);
        let mut deadline = Instant::now() + self.maximum_wait_time;

        loop {
            if lane.admits(car, from) {
                let follows = !lane.crossing.is_empty();
                let head = lane.queues[from].pop_front();
                assert_eq!(head, Some(car), "{}: queue {from} out of order", self.id);
                lane.crossing.push_back((car, from));
                if lane.claim == Some(from) {
                    lane.claim = None;
                }
                // The next car of this approach is now at the head.
                lane.notify_all(from);

                if follows {
                    lane.unlocked(|| thread::sleep(self.follow_delay));
                }
                emit(Action::StartPassing);
                lane.unlocked(|| thread::sleep(self.travel_time));
                lane.leave(car);
                emit(Action::FinishPassing);

                if lane.crossing.is_empty() {
                    let next = lane.next_contender(from);
                    trace!(connector = %self.id, car, next, "lane vacated");
                    lane.notify_all(next);
                    let current = lane.current;
                    if current != from && current != next {
                        lane.notify_all(current);
                    }
                }
                return;
            }

            if lane.may_switch_to(from) {
                debug!(connector = %self.id, car, from, "switching lane");
                lane.current = from;
                emit(Action::SwitchingLane);
                lane.notify_all(from);
                deadline = Instant::now() + self.maximum_wait_time;
                continue;
            }

            trace!(connector = %self.id, car, from, "waiting for the lane");
            if lane.wait_until(from, deadline) == WaitResult::TimedOut {
                if lane.may_claim(from) {
                    debug!(connector = %self.id, car, from, "switching lane after timeout");
                    lane.current = from;
                    lane.claim = Some(from);
                    emit(Action::SwitchingLaneTimeout);
                    lane.notify_all(from);
                }
                deadline = Instant::now() + self.maximum_wait_time;
            }
        }
    }
}
