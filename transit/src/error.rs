//! Errors.
//!
//! Only loading a scenario and starting car threads can fail. Once a
//! simulation runs, connectors never report errors: a broken invariant inside
//! a connector is a bug and panics.

use crate::{car::CarId, connector::ConnectorId};
use thiserror::Error;

/// Result type of this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors of the simulation driver.
#[derive(Debug, Error)]
pub enum Error {
    /// The scenario is malformed.
    #[error("invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),

    /// The scenario could not be read.
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    /// The operating system refused to start a car thread.
    #[error("failed to spawn a thread for car {car}: {source}")]
    Spawn {
        car: CarId,
        #[source]
        source: std::io::Error,
    },
}

/// Errors found while parsing a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("token {token:?} is not a valid {expected}")]
    InvalidNumber {
        token: String,
        expected: &'static str,
    },

    #[error("unknown connector {token:?}")]
    UnknownConnector { token: String },

    #[error("connector {connector} does not exist")]
    NoSuchConnector { connector: ConnectorId },

    #[error("approach {approach} is out of range for connector {connector}")]
    InvalidApproach {
        connector: ConnectorId,
        approach: usize,
    },

    #[error("ferry F{index} has no capacity")]
    ZeroCapacity { index: usize },
}
