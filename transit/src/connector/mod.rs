//! # Connectors.
//!
//! A connector joins two roads, and cars must pass it one way or another to
//! follow their path. Three kinds of connectors exist, and the set is closed:
//!
//! | Kind             | Approaches | Admission                                   |
//! |------------------|------------|---------------------------------------------|
//! | [`NarrowBridge`] | 2          | One direction at a time, FIFO per direction |
//! | [`Ferry`]        | 2          | Batches of up to `capacity` cars per side   |
//! | [`Crossroad`]    | 4          | One approach at a time, round robin         |
//!
//! Every connector owns a [`Monitor`] and exposes a blocking `pass` operation
//! that returns once the car is on the other side. The monitor is released
//! while a car is physically crossing, so other cars can keep arriving and
//! queueing during a crossing.
//!
//! Narrow bridges and crossroads share the same state machine, implemented
//! once in [`lane`] for any number of approaches.
//!
//! [`Monitor`]: crate::sync::Monitor

mod crossroad;
mod ferry;
pub mod lane;
mod narrow_bridge;

pub use crossroad::Crossroad;
pub use ferry::Ferry;
pub use narrow_bridge::NarrowBridge;

use crate::{car::CarId, error::ScenarioError, event::EventSink};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::{fmt, str::FromStr};

/// The kind of a connector, encoded by the letter used in scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum ConnectorKind {
    NarrowBridge = b'N',
    Ferry = b'F',
    Crossroad = b'C',
}

impl ConnectorKind {
    /// Number of sides a car may come from.
    pub fn approaches(self) -> usize {
        match self {
            ConnectorKind::NarrowBridge | ConnectorKind::Ferry => 2,
            ConnectorKind::Crossroad => 4,
        }
    }

    pub fn as_char(self) -> char {
        char::from(u8::from(self))
    }
}

/// Identifies one connector of a simulation, such as `N0` or `F3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorId {
    pub kind: ConnectorKind,
    pub index: usize,
}

impl ConnectorId {
    pub const fn new(kind: ConnectorKind, index: usize) -> Self {
        Self { kind, index }
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.as_char(), self.index)
    }
}

impl FromStr for ConnectorId {
    type Err = ScenarioError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let unknown = || ScenarioError::UnknownConnector {
            token: token.to_owned(),
        };
        let (&letter, index) = token.as_bytes().split_first().ok_or_else(unknown)?;
        let kind = ConnectorKind::try_from(letter).map_err(|_| unknown())?;
        if index.is_empty() || !index.iter().all(u8::is_ascii_digit) {
            return Err(unknown());
        }
        let index = token[1..].parse().map_err(|_| unknown())?;
        Ok(ConnectorId { kind, index })
    }
}

/// A borrowed connector of any kind.
#[derive(Clone, Copy)]
pub enum Connector<'a> {
    NarrowBridge(&'a NarrowBridge),
    Ferry(&'a Ferry),
    Crossroad(&'a Crossroad),
}

impl Connector<'_> {
    pub fn id(&self) -> ConnectorId {
        match self {
            Connector::NarrowBridge(bridge) => bridge.id(),
            Connector::Ferry(ferry) => ferry.id(),
            Connector::Crossroad(crossroad) => crossroad.id(),
        }
    }

    /// Passes `car` coming from `from` through the connector, blocking until
    /// it reached the other side.
    pub fn pass(&self, car: CarId, from: usize, sink: &dyn EventSink) {
        match self {
            Connector::NarrowBridge(bridge) => bridge.pass(car, from, sink),
            Connector::Ferry(ferry) => ferry.pass(car, from, sink),
            Connector::Crossroad(crossroad) => crossroad.pass(car, from, sink),
        }
    }
}
