use super::{ConnectorId, ConnectorKind, lane::Lane};
use crate::{car::CarId, config::TransitConfig, event::EventSink};
use std::time::Duration;

/// An intersection with four approaches, `0` to `3`, and a single lane
/// through the middle.
///
/// It behaves like a [`NarrowBridge`] with four sides. When the intersection
/// empties, the next approach in rotation with cars waiting gets the lane, so
/// approaches take turns instead of ping-ponging between two of them.
///
/// [`NarrowBridge`]: super::NarrowBridge
pub struct Crossroad {
    lane: Lane<4>,
}

impl Crossroad {
    pub fn new(
        index: usize,
        travel_time: Duration,
        maximum_wait_time: Duration,
        config: &TransitConfig,
    ) -> Self {
        Self {
            lane: Lane::new(
                ConnectorId::new(ConnectorKind::Crossroad, index),
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

    /// The approach currently allowed into the intersection.
    pub fn direction(&self) -> usize {
        self.lane.current()
    }

    /// Number of cars inside the intersection right now.
    pub fn occupancy(&self) -> usize {
        self.lane.occupancy()
    }

    /// Crosses the intersection from approach `from`.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not in `0..4`.
    pub fn pass(&self, car: CarId, from: usize, sink: &dyn EventSink) {
        self.lane.pass(car, from, sink)
    }
}
