//! Test driver and test cases of the transit simulator.
//!
//! Every test case is a plain function. The driver runs each of them on its
//! own thread, reports `ok` or `FAILED` per test and a summary line at the
//! end. A test fails by panicking.
//!
//! Test names can be given on the command line to run a subset:
//!
//! ```bash
//! $ cargo test -p transit-grader -- ferry:: narrow_bridge::fifo
//! ```

use std::{
    any::type_name,
    collections::BTreeMap,
    env, thread,
    time::{Duration, Instant},
};
use transit::{Action, CarId, ConnectorId, Record};

pub mod crossroad;
pub mod ferry;
pub mod narrow_bridge;
pub mod scenario;
pub mod simulator;
pub mod sync;

/// A runnable test case.
pub trait TestCase
where
    Self: Sync + Send,
{
    fn name(&'static self) -> &'static str;
    fn run(&'static self) -> bool;
}

impl<T> TestCase for T
where
    T: Fn() + Send + Sync + 'static,
{
    fn name(&'static self) -> &'static str {
        let name = type_name::<T>();
        name.split_once("::").map_or(name, |(_, rest)| rest)
    }

    fn run(&'static self) -> bool {
        print!("test {} ... ", self.name());
        let result = thread::Builder::new()
            .name(self.name().to_owned())
            .spawn(self)
            .map(|handle| handle.join().is_ok());
        if let Ok(true) = result {
            println!("ok");
            true
        } else {
            println!("FAILED");
            false
        }
    }
}

/// A driver for running tests.
pub struct TestDriver;

impl TestDriver {
    /// Runs the given tests, keeping only those whose name contains one of
    /// the command line filters, if any.
    ///
    /// Returns `true` if every test that ran passed.
    pub fn start<const TC: usize>(tests: [&'static dyn TestCase; TC]) -> bool {
        let filter = env::args()
            .skip(1)
            .filter(|arg| !arg.starts_with('-'))
            .collect::<Vec<_>>();
        let tests = tests
            .into_iter()
            .filter(|test| filter.is_empty() || filter.iter().any(|f| test.name().contains(f)))
            .collect::<Vec<_>>();

        let (total, mut succ) = (tests.len(), 0);
        println!(
            "Running {} test{}",
            total,
            if total == 1 { "" } else { "s" }
        );
        for test in tests {
            if test.run() {
                succ += 1;
            }
        }
        println!(
            "test result: {}. {} passed; {} failed",
            if total == succ { "ok" } else { "FAILED" },
            succ,
            total - succ
        );
        total == succ
    }
}

/// A car that shows up at a connector `after` the start of a test.
#[derive(Debug, Clone, Copy)]
pub struct Arrival {
    pub car: CarId,
    pub from: usize,
    pub after: Duration,
}

impl Arrival {
    pub fn new(car: CarId, from: usize, after_ms: u64) -> Self {
        Self {
            car,
            from,
            after: Duration::from_millis(after_ms),
        }
    }
}

/// Runs every arrival on its own thread and waits for all of them.
pub fn arrive(arrivals: &[Arrival], pass: impl Fn(CarId, usize) + Sync) {
    let begin = Instant::now();
    thread::scope(|s| {
        for arrival in arrivals {
            let pass = &pass;
            s.spawn(move || {
                thread::sleep((begin + arrival.after).saturating_duration_since(Instant::now()));
                pass(arrival.car, arrival.from);
            });
        }
    });
}

/// The time a car spent on a connector.
#[derive(Debug, Clone, Copy)]
pub struct Crossing {
    pub car: CarId,
    pub start: Duration,
    pub finish: Duration,
}

impl Crossing {
    pub fn overlaps(&self, other: &Crossing) -> bool {
        self.start < other.finish && other.start < self.finish
    }
}

/// Pairs up the START_PASSING and FINISH_PASSING records of every car on
/// `connector`, ordered by start time.
///
/// A car passing the same connector more than once yields one crossing per
/// pass.
pub fn crossings(records: &[Record], connector: ConnectorId) -> Vec<Crossing> {
    let mut open: BTreeMap<CarId, Vec<Duration>> = BTreeMap::new();
    let mut done = Vec::new();
    for record in records.iter().filter(|r| r.event.connector == connector) {
        let car = record.event.car;
        match record.event.action {
            Action::StartPassing => open.entry(car).or_default().push(record.at),
            Action::FinishPassing => {
                let start = open
                    .get_mut(&car)
                    .and_then(|starts| starts.pop())
                    .unwrap_or_else(|| panic!("car {car} finished {connector} without starting"));
                done.push(Crossing {
                    car,
                    start,
                    finish: record.at,
                });
            }
            _ => {}
        }
    }
    assert!(
        open.values().all(Vec::is_empty),
        "some cars never finished passing {connector}: {open:?}"
    );
    done.sort_by_key(|crossing| crossing.start);
    done
}

/// Actions of `car` on `connector`, in emission order.
pub fn actions(records: &[Record], car: CarId, connector: ConnectorId) -> Vec<Action> {
    records
        .iter()
        .filter(|r| r.event.car == car && r.event.connector == connector)
        .map(|r| r.event.action)
        .collect()
}

/// Time at which `car` emitted `action` on `connector` for the first time.
pub fn first(records: &[Record], car: CarId, connector: ConnectorId, action: Action) -> Duration {
    records
        .iter()
        .find(|r| r.event.car == car && r.event.connector == connector && r.event.action == action)
        .map(|r| r.at)
        .unwrap_or_else(|| panic!("car {car} never emitted {action} on {connector}"))
}
