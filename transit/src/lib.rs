//! # Transit: cars, narrow bridges, ferries and crossroads.
//!
//! This crate simulates cars that drive along a fixed path of *connectors*.
//! Every car is an operating system thread. A connector is a shared resource
//! with limited capacity that many cars try to pass at the same time, and
//! each connector kind arbitrates its cars differently:
//!
//! - [`NarrowBridge`]: a single lane used in one direction at a time. Cars of
//!   the same direction pass in arrival order, and a direction that waited
//!   longer than the bridge's maximum wait time takes the lane over.
//! - [`Ferry`]: a boat per dock that sails when it is full, or when the first
//!   car on board waited for the maximum wait time.
//! - [`Crossroad`]: the narrow bridge generalized to four approaches, handing
//!   the lane over in round-robin order.
//!
//! All connectors are built on a single primitive, the [`Monitor`]. See the
//! [`sync`] module for its contract.
//!
//! ## Running a scenario
//!
//! ```bash
//! $ cargo run --bin transit-sim -- scenario.txt
//! ```
//!
//! The scenario format is described in [`scenario`]. Each event of the
//! simulation is written on its own line to the standard output; diagnostics
//! are logged to the standard error and filtered with `RUST_LOG`.
//!
//! [`NarrowBridge`]: connector::NarrowBridge
//! [`Ferry`]: connector::Ferry
//! [`Crossroad`]: connector::Crossroad
//! [`Monitor`]: sync::Monitor

#![deny(rustdoc::broken_intra_doc_links)]

pub mod car;
pub mod config;
pub mod connector;
pub mod error;
pub mod event;
pub mod scenario;
pub mod simulator;
pub mod sync;

pub use car::{Car, CarId, Step};
pub use config::{TransitConfig, TransitConfigBuilder};
pub use connector::{Connector, ConnectorId, ConnectorKind, Crossroad, Ferry, NarrowBridge};
pub use error::{Error, Result, ScenarioError};
pub use event::{Action, Event, EventSink, Record, RecordingSink, WriterSink};
pub use scenario::Scenario;
pub use simulator::Simulator;
