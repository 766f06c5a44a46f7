//! # Scenario.
//!
//! A scenario lists the connectors of a simulation and the cars driving
//! through them. It is plain text made of whitespace separated tokens; line
//! breaks carry no meaning. All durations are in milliseconds.
//!
//! ```text
//! <number of narrow bridges>
//! <travel time> <maximum wait time>                  (one per bridge)
//! <number of ferries>
//! <travel time> <maximum wait time> <capacity>       (one per ferry)
//! <number of crossroads>
//! <travel time> <maximum wait time>                  (one per crossroad)
//! <number of cars>
//! <travel time> <path length> {<connector> <from> <to>}   (one per car)
//! ```
//!
//! A connector is written as its kind letter (`N`, `F` or `C`) followed by its
//! index, e.g. `N0` or `C12`. Cars are numbered in the order they appear.
//!
//! ```
//! use transit::Scenario;
//!
//! let scenario: Scenario = "
//!     1
//!     100 200
//!     0
//!     0
//!     2
//!     10 1 N0 0 1
//!     20 1 N0 1 0
//! "
//! .parse()
//! .unwrap();
//! assert_eq!(scenario.cars.len(), 2);
//! ```

use crate::{
    car::{Car, CarId, Step},
    connector::ConnectorKind,
    error::ScenarioError,
};
use std::{
    io::Read,
    str::{FromStr, SplitAsciiWhitespace},
    time::Duration,
};

/// Timing of a narrow bridge or a crossroad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneSpec {
    pub travel_time: Duration,
    pub maximum_wait_time: Duration,
}

/// Timing and capacity of a ferry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FerrySpec {
    pub travel_time: Duration,
    pub maximum_wait_time: Duration,
    pub capacity: usize,
}

/// A parsed and validated scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub narrow_bridges: Vec<LaneSpec>,
    pub ferries: Vec<FerrySpec>,
    pub crossroads: Vec<LaneSpec>,
    pub cars: Vec<Car>,
}

impl Scenario {
    /// Reads a whole scenario from `reader`.
    pub fn read(mut reader: impl Read) -> crate::Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Ok(input.parse()?)
    }

    /// Number of connectors of the given kind.
    pub fn connectors(&self, kind: ConnectorKind) -> usize {
        match kind {
            ConnectorKind::NarrowBridge => self.narrow_bridges.len(),
            ConnectorKind::Ferry => self.ferries.len(),
            ConnectorKind::Crossroad => self.crossroads.len(),
        }
    }

    fn validate(&self, step: &Step) -> Result<(), ScenarioError> {
        let connector = step.connector;
        if connector.index >= self.connectors(connector.kind) {
            return Err(ScenarioError::NoSuchConnector { connector });
        }
        for approach in [step.from, step.to] {
            if approach >= connector.kind.approaches() {
                return Err(ScenarioError::InvalidApproach {
                    connector,
                    approach,
                });
            }
        }
        Ok(())
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens(input.split_ascii_whitespace());

        let narrow_bridges = (0..tokens.count("number of narrow bridges")?)
            .map(|_| tokens.lane())
            .collect::<Result<Vec<_>, _>>()?;
        let ferries = (0..tokens.count("number of ferries")?)
            .map(|index| -> Result<FerrySpec, ScenarioError> {
                let travel_time = tokens.millis("ferry travel time")?;
                let maximum_wait_time = tokens.millis("ferry maximum wait time")?;
                let capacity = tokens.count("ferry capacity")?;
                if capacity == 0 {
                    return Err(ScenarioError::ZeroCapacity { index });
                }
                Ok(FerrySpec {
                    travel_time,
                    maximum_wait_time,
                    capacity,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let crossroads = (0..tokens.count("number of crossroads")?)
            .map(|_| tokens.lane())
            .collect::<Result<Vec<_>, _>>()?;

        let mut scenario = Scenario {
            narrow_bridges,
            ferries,
            crossroads,
            cars: Vec::new(),
        };
        for id in 0..tokens.count("number of cars")? {
            let travel_time = tokens.millis("car travel time")?;
            let path = (0..tokens.count("path length")?)
                .map(|_| -> Result<Step, ScenarioError> {
                    let step = Step {
                        connector: tokens.next("connector")?.parse()?,
                        from: tokens.count("approach")?,
                        to: tokens.count("approach")?,
                    };
                    scenario.validate(&step)?;
                    Ok(step)
                })
                .collect::<Result<Vec<_>, _>>()?;
            let id = CarId::try_from(id).map_err(|_| ScenarioError::InvalidNumber {
                token: id.to_string(),
                expected: "car id",
            })?;
            scenario.cars.push(Car::new(id, travel_time, path));
        }
        Ok(scenario)
    }
}

struct Tokens<'a>(SplitAsciiWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn next(&mut self, expected: &'static str) -> Result<&'a str, ScenarioError> {
        self.0.next().ok_or(ScenarioError::UnexpectedEof { expected })
    }

    fn number<T: FromStr>(&mut self, expected: &'static str) -> Result<T, ScenarioError> {
        let token = self.next(expected)?;
        token.parse().map_err(|_| ScenarioError::InvalidNumber {
            token: token.to_owned(),
            expected,
        })
    }

    fn count(&mut self, expected: &'static str) -> Result<usize, ScenarioError> {
        self.number(expected)
    }

    fn millis(&mut self, expected: &'static str) -> Result<Duration, ScenarioError> {
        self.number(expected).map(Duration::from_millis)
    }

    fn lane(&mut self) -> Result<LaneSpec, ScenarioError> {
        Ok(LaneSpec {
            travel_time: self.millis("travel time")?,
            maximum_wait_time: self.millis("maximum wait time")?,
        })
    }
}
