//! Position lookups keyed by the stable ids of the definition set.
//!
//! Built once when the engine is constructed and shared by production-chain
//! resolution, saving, and load reconciliation.

use ladder_schemas::industry::IndustryDefinition;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DefinitionIndex {
    industries: HashMap<String, usize>,
    workers: Vec<HashMap<String, usize>>,
}

impl DefinitionIndex {
    pub fn from_industries(industries: &[IndustryDefinition]) -> Self {
        let mut index = DefinitionIndex {
            industries: HashMap::with_capacity(industries.len()),
            workers: Vec::with_capacity(industries.len()),
        };
        for (position, industry) in industries.iter().enumerate() {
            index
                .industries
                .entry(industry.industry_id.clone())
                .or_insert(position);
            let mut workers = HashMap::with_capacity(industry.workers.len());
            for (worker_position, worker) in industry.workers.iter().enumerate() {
                workers
                    .entry(worker.worker_id.clone())
                    .or_insert(worker_position);
            }
            index.workers.push(workers);
        }
        index
    }

    pub fn industry_count(&self) -> usize {
        self.workers.len()
    }

    pub fn industry_position(&self, industry_id: &str) -> Option<usize> {
        self.industries.get(industry_id).copied()
    }

    /// Position of `worker_id` inside the industry at `industry`.
    pub fn worker_position(&self, industry: usize, worker_id: &str) -> Option<usize> {
        self.workers
            .get(industry)
            .and_then(|workers| workers.get(worker_id))
            .copied()
    }
}
