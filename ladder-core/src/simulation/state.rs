use super::{passive::PassiveProducerState, worker::WorkerState};
use crate::ledger::ResourceLedger;
use serde::{Deserialize, Serialize};

/// Something that happened during the most recent tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimulationEvent {
    CycleCompleted {
        industry_id: String,
        worker_id: String,
        produces: String,
        amount: u64,
    },
    AutoStarted {
        industry_id: String,
        worker_id: String,
    },
    PassiveCredited {
        resource: String,
        amount: u64,
    },
}

#[derive(Debug, Clone)]
pub struct IndustryState {
    pub industry_id: String,
    pub name: String,
    pub resource: String,
    pub workers: Vec<WorkerState>,
}

impl IndustryState {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.industry_id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub industries: Vec<IndustryState>,
    pub ledger: ResourceLedger,
    pub production: Vec<PassiveProducerState>,
    pub buy_mode_max: bool,
    pub dev_mode: bool,
    pub events: Vec<SimulationEvent>,
}
