//! Cars and their paths.

use crate::{
    connector::ConnectorId,
    event::{Action, Event, EventSink},
    simulator::Simulator,
};
use std::{thread, time::Duration};
use tracing::trace;

/// Identifier of a car; its position in the scenario.
pub type CarId = u32;

/// One connector on a car's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub connector: ConnectorId,
    /// The approach the car enters the connector from.
    pub from: usize,
    /// The side the car leaves the connector to. Informational only.
    pub to: usize,
}

/// A car driving along a fixed path of connectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: CarId,
    /// Time the car needs to reach the next connector.
    pub travel_time: Duration,
    pub path: Vec<Step>,
}

impl Car {
    pub fn new(id: CarId, travel_time: Duration, path: Vec<Step>) -> Self {
        Self {
            id,
            travel_time,
            path,
        }
    }

    /// Drives the whole path, one connector after the other.
    ///
    /// For every step the car travels to the connector, reports its arrival
    /// and passes the connector. This is the body of a car thread.
    ///
    /// # Panics
    ///
    /// Panics if a step names a connector that `simulator` does not have.
    /// Scenarios are validated when they are parsed, so this only happens for
    /// hand-built cars.
    pub fn drive(&self, simulator: &Simulator, sink: &dyn EventSink) {
        for step in &self.path {
            let Some(connector) = simulator.connector(step.connector) else {
                panic!("car {}: no connector {}", self.id, step.connector);
            };
            let emit = |action| {
                sink.emit(Event {
                    car: self.id,
                    connector: step.connector,
                    action,
                })
            };

            emit(Action::Travel);
            thread::sleep(self.travel_time);
            emit(Action::Arrive);
            trace!(car = self.id, connector = %step.connector, from = step.from, "passing");
            connector.pass(self.id, step.from, sink);
        }
    }
}
