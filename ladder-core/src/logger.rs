use crate::{error::LadderError, simulation::state::SimulationState};
use chrono::{DateTime, SecondsFormat, Utc};
use csv::Writer;
use serde::Serialize;
use std::fs;
use std::io;

#[derive(Debug, Serialize)]
struct LogEntry {
    at: String,
    running_workers: usize,
    resources_json: String,
    events_json: String,
}

/// Appends one CSV row per eventful tick: timestamp, ledger and events.
pub struct TimeSeriesLogger {
    path: String,
    writer: Writer<fs::File>,
}

impl TimeSeriesLogger {
    pub fn new(path: &str) -> Result<Self, io::Error> {
        let writer = Writer::from_path(path)?;
        Ok(Self {
            path: path.to_string(),
            writer,
        })
    }

    pub fn log_state(&mut self, state: &SimulationState, at: DateTime<Utc>) -> Result<(), LadderError> {
        let running_workers = state
            .industries
            .iter()
            .flat_map(|industry| industry.workers.iter())
            .filter(|worker| worker.is_running())
            .count();

        let entry = LogEntry {
            at: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            running_workers,
            resources_json: serde_json::to_string(state.ledger.balances())?,
            events_json: serde_json::to_string(&state.events)?,
        };

        self.writer
            .serialize(entry)
            .map_err(|e| LadderError::CsvError(self.path.clone(), e))?;
        self.writer
            .flush()
            .map_err(|e| LadderError::FileIO(self.path.clone(), e))?;
        Ok(())
    }
}
