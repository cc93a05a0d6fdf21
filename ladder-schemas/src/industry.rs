//! Static definitions of industries and the workers that staff them.
//!
//! These are loaded once from the game configuration and never change while
//! the simulation runs.

use crate::cost::CostTable;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Describes one kind of worker inside an industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerDefinition {
    /// A stable, machine-readable identifier (e.g., "miner"). Used as the key in save files.
    #[serde(default)]
    pub worker_id: String,
    /// A human-readable name for display purposes (e.g., "Coal Miner").
    #[serde(default)]
    pub worker_name: String,
    /// What a completed cycle yields: either a resource id, or the `worker_id` of
    /// another worker in the same industry.
    #[serde(default)]
    pub produces: String,
    /// Length of one production cycle.
    #[serde(default, with = "crate::duration")]
    pub prod_rate: TimeDelta,
    /// Units produced per owned worker per cycle.
    #[serde(default)]
    pub prod_quant: u64,
    /// Growth factor applied to the cost table on every upgrade.
    #[serde(default)]
    pub upgrade_mult: f64,
    /// Tier at which the worker starts restarting itself. 0 means never.
    #[serde(default)]
    pub auto_tier: u32,
    /// Shorthand for the `coins` entry of the cost table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u64>,
    /// The price of a single worker.
    #[serde(default)]
    pub cost: CostTable,
}

/// A production domain with its primary resource and ordered list of workers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryDefinition {
    #[serde(default)]
    pub industry_id: String,
    #[serde(default)]
    pub name: String,
    /// The industry's primary resource id (e.g., "coal").
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub workers: Vec<WorkerDefinition>,
}

impl IndustryDefinition {
    /// The name to show for this industry, falling back to its id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.industry_id
        } else {
            &self.name
        }
    }
}
