//! The on-disk save format.
//!
//! Industries and workers are keyed by their stable ids so a save stays
//! loadable when the configuration reorders them. Passive production entries
//! are positional, in definition order. Running cycles are never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The only save format version this build reads and writes.
pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub industries: Vec<SavedIndustry>,
    /// `None` when the field is missing or `null`, which marks the save as corrupt.
    #[serde(default)]
    pub resources: Option<BTreeMap<String, u64>>,
    #[serde(default)]
    pub production: Vec<SavedProduction>,
    #[serde(default)]
    pub buy_mode_max: bool,
    #[serde(default)]
    pub dev_mode: bool,
    pub saved_at: DateTime<Utc>,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedIndustry {
    pub key: String,
    pub workers: Vec<SavedWorker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWorker {
    pub key: String,
    pub owned: u64,
    pub tier: u32,
    #[serde(default)]
    pub auto: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProduction {
    pub next_at: DateTime<Utc>,
}
