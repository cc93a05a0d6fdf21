//! Save and restore of the full simulation state.
//!
//! Restoring never touches the live state: it validates the save against the
//! live structure and builds a replacement, which the engine swaps in only
//! when every check has passed.

use crate::{
    error::LadderError,
    index::DefinitionIndex,
    ledger::ResourceLedger,
    simulation::{
        state::SimulationState,
        worker::{auto_unlocked, RunPhase},
    },
};
use chrono::{DateTime, Utc};
use ladder_schemas::save::{
    SaveGame, SavedIndustry, SavedProduction, SavedWorker, SAVE_FORMAT_VERSION,
};

/// Captures owned counts, tiers, auto flags, balances, passive schedules and mode flags.
pub fn capture(state: &SimulationState, saved_at: DateTime<Utc>) -> SaveGame {
    let industries = state
        .industries
        .iter()
        .map(|industry| SavedIndustry {
            key: industry.industry_id.clone(),
            workers: industry
                .workers
                .iter()
                .map(|worker| SavedWorker {
                    key: worker.definition.worker_id.clone(),
                    owned: worker.owned,
                    tier: worker.tier,
                    auto: worker.auto,
                })
                .collect(),
        })
        .collect();

    let production = state
        .production
        .iter()
        .map(|producer| SavedProduction {
            next_at: producer.next_at,
        })
        .collect();

    SaveGame {
        industries,
        resources: Some(state.ledger.balances().clone()),
        production,
        buy_mode_max: state.buy_mode_max,
        dev_mode: state.dev_mode,
        saved_at,
        version: SAVE_FORMAT_VERSION,
    }
}

pub fn encode(save: &SaveGame) -> Result<Vec<u8>, LadderError> {
    Ok(serde_json::to_vec_pretty(save)?)
}

pub fn decode(bytes: &[u8]) -> Result<SaveGame, LadderError> {
    serde_json::from_slice(bytes).map_err(|e| LadderError::CorruptSave(e.to_string()))
}

/// Builds the state described by `save` on top of the live structure.
///
/// # Errors
///
/// `UnsupportedSaveVersion` for any version but the current one, `CorruptSave`
/// when resources are missing or a tier is 0, and `StructureMismatch` when the
/// industry or passive-production counts differ or a live industry or worker
/// key is absent from the save.
pub fn restore(
    live: &SimulationState,
    index: &DefinitionIndex,
    save: &SaveGame,
) -> Result<SimulationState, LadderError> {
    if save.version != SAVE_FORMAT_VERSION {
        return Err(LadderError::UnsupportedSaveVersion(save.version));
    }
    let resources = save
        .resources
        .as_ref()
        .ok_or_else(|| LadderError::CorruptSave("save missing resources".to_string()))?;
    if save.industries.len() != live.industries.len() {
        return Err(LadderError::StructureMismatch(format!(
            "save has {} industries, configuration has {}",
            save.industries.len(),
            live.industries.len()
        )));
    }
    if save.production.len() != live.production.len() {
        return Err(LadderError::StructureMismatch(format!(
            "save has {} passive producers, configuration has {}",
            save.production.len(),
            live.production.len()
        )));
    }

    let mut saved_industries: Vec<Option<&SavedIndustry>> = vec![None; live.industries.len()];
    for saved in &save.industries {
        if let Some(position) = index.industry_position(&saved.key) {
            saved_industries[position] = Some(saved);
        }
    }

    let mut next = live.clone();
    next.events.clear();

    for (position, industry) in next.industries.iter_mut().enumerate() {
        let saved_industry = saved_industries[position].ok_or_else(|| {
            LadderError::StructureMismatch(format!("save missing industry {}", industry.industry_id))
        })?;

        let mut saved_workers: Vec<Option<&SavedWorker>> = vec![None; industry.workers.len()];
        for saved in &saved_industry.workers {
            if let Some(worker_position) = index.worker_position(position, &saved.key) {
                saved_workers[worker_position] = Some(saved);
            }
        }

        for (worker, saved) in industry.workers.iter_mut().zip(saved_workers) {
            let saved = saved.ok_or_else(|| {
                LadderError::StructureMismatch(format!(
                    "save missing worker {}",
                    worker.definition.worker_id
                ))
            })?;
            if saved.tier == 0 {
                return Err(LadderError::CorruptSave(format!(
                    "worker {} has tier 0",
                    saved.key
                )));
            }
            worker.owned = saved.owned;
            worker.tier = saved.tier;
            worker.auto = worker.auto || saved.auto || auto_unlocked(&worker.definition, saved.tier);
            worker.phase = RunPhase::Idle;
        }
    }

    next.ledger = ResourceLedger::from_balances(resources.clone());
    for (producer, saved) in next.production.iter_mut().zip(&save.production) {
        producer.next_at = saved.next_at;
    }
    next.buy_mode_max = save.buy_mode_max;
    next.dev_mode = save.dev_mode;

    Ok(next)
}
