//! Simulation events and the sinks that collect them.
//!
//! Cars and connectors report what happens through an [`EventSink`]. Sinks are
//! called concurrently from every car thread, often while the caller holds a
//! connector's monitor, so they must be cheap and must never call back into a
//! connector.

use crate::{car::CarId, connector::ConnectorId};
use crossbeam_queue::SegQueue;
use parking_lot::Mutex;
use std::{
    fmt,
    io::Write,
    time::{Duration, Instant},
};
use tracing::warn;

/// What a car did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// The car started driving towards a connector.
    Travel,
    /// The car reached a connector and asks to pass it.
    Arrive,
    /// The car started passing the connector.
    StartPassing,
    /// The car left the connector.
    FinishPassing,
    /// The car handed the lane over to its own direction.
    SwitchingLane,
    /// The car took the lane over after waiting too long.
    SwitchingLaneTimeout,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Travel => "TRAVEL",
            Action::Arrive => "ARRIVE",
            Action::StartPassing => "START_PASSING",
            Action::FinishPassing => "FINISH_PASSING",
            Action::SwitchingLane => "SWITCHING_LANE",
            Action::SwitchingLaneTimeout => "SWITCHING_LANE_TIMEOUT",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single event of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub car: CarId,
    pub connector: ConnectorId,
    pub action: Action,
}

/// Destination of simulation events.
pub trait EventSink: Sync {
    fn emit(&self, event: Event);
}

/// An event together with the time it was emitted, relative to the creation
/// of its sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub at: Duration,
    pub event: Event,
}

/// A sink that keeps every event in memory.
///
/// Emitting is lock-free, so recording does not serialize car threads beyond
/// what the connectors already do.
pub struct RecordingSink {
    epoch: Instant,
    records: SegQueue<Record>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            records: SegQueue::new(),
        }
    }

    /// Removes and returns every record emitted so far, oldest first.
    pub fn take(&self) -> Vec<Record> {
        let mut records = Vec::with_capacity(self.records.len());
        while let Some(record) = self.records.pop() {
            records.push(record);
        }
        records.sort_by_key(|record| record.at);
        records
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: Event) {
        self.records.push(Record {
            at: self.epoch.elapsed(),
            event,
        });
    }
}

/// A sink that writes one line per event:
///
/// ```text
/// <milliseconds since start>\t<car>\t<connector>\t<ACTION>
/// ```
///
/// Lines from different threads never interleave.
pub struct WriterSink<W> {
    epoch: Instant,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            epoch: Instant::now(),
            writer: Mutex::new(writer),
        }
    }

    /// Flushes the writer and returns it.
    pub fn into_inner(self) -> std::io::Result<W> {
        let mut writer = self.writer.into_inner();
        writer.flush()?;
        Ok(writer)
    }
}

impl<W: Write + Send> EventSink for WriterSink<W> {
    fn emit(&self, event: Event) {
        let at = self.epoch.elapsed().as_millis();
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(
            writer,
            "{at}\t{}\t{}\t{}",
            event.car, event.connector, event.action
        ) {
            warn!(error = %e, "failed to write event");
        }
    }
}
