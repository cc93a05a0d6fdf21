use crate::{industry::IndustryDefinition, production::PassiveProductionDefinition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The top-level game configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameFile {
    #[serde(default)]
    pub schema_version: String,
    #[serde(default)]
    pub starting_resources: BTreeMap<String, u64>,
    #[serde(default)]
    pub starting_production: Vec<PassiveProductionDefinition>,
    #[serde(default)]
    pub industries: Vec<IndustryDefinition>,
}
