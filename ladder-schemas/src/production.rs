use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// A background trickle of a resource, independent of any industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveProductionDefinition {
    #[serde(default)]
    pub resource: String,
    #[serde(default, with = "crate::duration")]
    pub prod_rate: TimeDelta,
    #[serde(default)]
    pub prod_quant: u64,
}
