#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use ladder_core::{SimulationBuilder, SimulationEngine};
use ladder_schemas::{
    cost::CostTable,
    industry::{IndustryDefinition, WorkerDefinition},
    production::PassiveProductionDefinition,
};
use std::collections::BTreeMap;

pub const COAL: usize = 0;
pub const IRON: usize = 1;
pub const MINER: usize = 0;
pub const DRILLER: usize = 1;
pub const SMELTER: usize = 0;
pub const PROSPECTOR: usize = 1;

/// Milliseconds after a fixed epoch.
pub fn t(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap() + TimeDelta::milliseconds(ms)
}

pub fn worker(
    id: &str,
    produces: &str,
    rate_ms: i64,
    quant: u64,
    cost: &[(&str, u64)],
    auto_tier: u32,
) -> WorkerDefinition {
    WorkerDefinition {
        worker_id: id.to_string(),
        worker_name: format!("{} worker", id),
        produces: produces.to_string(),
        prod_rate: TimeDelta::milliseconds(rate_ms),
        prod_quant: quant,
        upgrade_mult: 2.0,
        auto_tier,
        level: None,
        cost: CostTable::new(cost.iter().map(|(r, a)| (r.to_string(), *a))),
    }
}

pub fn industry(id: &str, resource: &str, workers: Vec<WorkerDefinition>) -> IndustryDefinition {
    IndustryDefinition {
        industry_id: id.to_string(),
        name: format!("{} industry", id),
        resource: resource.to_string(),
        workers,
    }
}

/// Coal: a miner (1s, 25 coal) and a driller that produces miners.
/// Iron: a smelter (2s, 10 iron) and a prospector that yields gems.
pub fn industries() -> Vec<IndustryDefinition> {
    vec![
        industry(
            "coal",
            "coal",
            vec![
                worker("miner", "coal", 1_000, 25, &[("coins", 10)], 3),
                worker("driller", "miner", 5_000, 2, &[("coins", 100)], 0),
            ],
        ),
        industry(
            "iron",
            "iron",
            vec![
                worker("smelter", "iron", 2_000, 10, &[("coins", 15), ("coal", 5)], 2),
                worker("prospector", "gems", 3_000, 1, &[("coins", 50)], 0),
            ],
        ),
    ]
}

pub fn coin_trickle() -> PassiveProductionDefinition {
    PassiveProductionDefinition {
        resource: "coins".to_string(),
        prod_rate: TimeDelta::seconds(1),
        prod_quant: 1,
    }
}

pub fn resources(entries: &[(&str, u64)]) -> BTreeMap<String, u64> {
    entries.iter().map(|(r, a)| (r.to_string(), *a)).collect()
}

pub fn engine_with(coins: u64) -> SimulationEngine {
    SimulationBuilder::new()
        .with_industries(industries())
        .with_starting_resources(resources(&[("coins", coins)]))
        .with_passive_production(vec![coin_trickle()])
        .starting_at(t(0))
        .build()
        .unwrap()
}

pub fn engine() -> SimulationEngine {
    engine_with(100)
}
