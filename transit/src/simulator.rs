//! # Simulator.
//!
//! The [`Simulator`] owns every connector and car of a scenario. Running it
//! starts one thread per car and waits until all of them reached the end of
//! their path.
//!
//! Car threads are scoped: they borrow the connectors instead of owning them,
//! and the scope guarantees that the connectors outlive every car.

use crate::{
    car::Car,
    config::TransitConfig,
    connector::{Connector, ConnectorId, ConnectorKind, Crossroad, Ferry, NarrowBridge},
    error::{Error, Result},
    event::EventSink,
    scenario::Scenario,
};
use crossbeam_utils::thread;
use std::time::Instant;
use tracing::info;

/// The connectors and cars of one simulation.
pub struct Simulator {
    narrow_bridges: Vec<NarrowBridge>,
    ferries: Vec<Ferry>,
    crossroads: Vec<Crossroad>,
    cars: Vec<Car>,
}

impl Simulator {
    /// Builds the connectors described by `scenario`.
    pub fn new(scenario: Scenario, config: &TransitConfig) -> Self {
        let narrow_bridges = scenario
            .narrow_bridges
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                NarrowBridge::new(index, spec.travel_time, spec.maximum_wait_time, config)
            })
            .collect();
        let ferries = scenario
            .ferries
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                Ferry::new(index, spec.travel_time, spec.maximum_wait_time, spec.capacity)
            })
            .collect();
        let crossroads = scenario
            .crossroads
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                Crossroad::new(index, spec.travel_time, spec.maximum_wait_time, config)
            })
            .collect();

        Self {
            narrow_bridges,
            ferries,
            crossroads,
            cars: scenario.cars,
        }
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Looks up a connector.
    pub fn connector(&self, id: ConnectorId) -> Option<Connector<'_>> {
        match id.kind {
            ConnectorKind::NarrowBridge => self
                .narrow_bridges
                .get(id.index)
                .map(Connector::NarrowBridge),
            ConnectorKind::Ferry => self.ferries.get(id.index).map(Connector::Ferry),
            ConnectorKind::Crossroad => self.crossroads.get(id.index).map(Connector::Crossroad),
        }
    }

    /// Drives every car to the end of its path, reporting to `sink`.
    ///
    /// Returns once all car threads finished. If a car thread panics, the
    /// panic is resumed on the calling thread after the others are joined.
    pub fn run(&self, sink: &dyn EventSink) -> Result<()> {
        let started = Instant::now();
        info!(
            narrow_bridges = self.narrow_bridges.len(),
            ferries = self.ferries.len(),
            crossroads = self.crossroads.len(),
            cars = self.cars.len(),
            "simulation started"
        );

        let spawned = thread::scope(|scope| -> Result<()> {
            for car in &self.cars {
                scope
                    .builder()
                    .name(format!("car-{}", car.id))
                    .spawn(move |_| car.drive(self, sink))
                    .map_err(|source| Error::Spawn {
                        car: car.id,
                        source,
                    })?;
            }
            Ok(())
        });

        match spawned {
            Ok(result) => {
                info!(elapsed = ?started.elapsed(), "simulation finished");
                result
            }
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}
