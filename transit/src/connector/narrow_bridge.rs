use super::{ConnectorId, ConnectorKind, lane::Lane};
use crate::{car::CarId, config::TransitConfig, event::EventSink};
use std::time::Duration;

/// A one-lane bridge with two sides, `0` and `1`.
///
/// Only one direction uses the bridge at a time. Cars of the same direction
/// cross in the order they arrived; the opposite direction takes over once
/// the bridge is empty, or after it waited `maximum_wait_time`.
pub struct NarrowBridge {
    lane: Lane<2>,
}

impl NarrowBridge {
    pub fn new(
        index: usize,
        travel_time: Duration,
        maximum_wait_time: Duration,
        config: &TransitConfig,
    ) -> Self {
        Self {
            lane: Lane::new(
                ConnectorId::new(ConnectorKind::NarrowBridge, index),
                travel_time,
                maximum_wait_time,
                config.follow_delay(),
            ),
        }
    }

    pub fn id(&self) -> ConnectorId {
        self.lane.id()
    }

    pub fn travel_time(&self) -> Duration {
        self.lane.travel_time()
    }

    pub fn maximum_wait_time(&self) -> Duration {
        self.lane.maximum_wait_time()
    }

    /// The side currently allowed on the bridge.
    pub fn direction(&self) -> usize {
        self.lane.current()
    }

    /// Number of cars on the bridge right now.
    pub fn occupancy(&self) -> usize {
        self.lane.occupancy()
    }

    /// Crosses the bridge from side `from`, blocking until `car` reached the
    /// other side.
    ///
    /// # Panics
    ///
    /// Panics if `from` is neither `0` nor `1`.
    pub fn pass(&self, car: CarId, from: usize, sink: &dyn EventSink) {
        self.lane.pass(car, from, sink)
    }
}
