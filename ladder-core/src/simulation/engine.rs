use super::{
    passive::PassiveProducerState,
    state::{IndustryState, SimulationEvent, SimulationState},
};
use crate::{
    economy,
    error::LadderError,
    index::DefinitionIndex,
    ledger::ResourceLedger,
    logger::TimeSeriesLogger,
    snapshot,
};
use chrono::{DateTime, Utc};
use ladder_schemas::{command::Command, cost::CostTable};
use std::{fs, path::Path};

/// The single owner of the simulation state.
///
/// Every mutation goes through `&mut self`, so callers serialize ticks, player
/// commands and loads onto one control loop. Industry and worker indices are a
/// caller precondition: out-of-range indices panic.
pub struct SimulationEngine {
    pub(super) state: SimulationState,
    pub(super) index: DefinitionIndex,
    pub(super) logger: Option<TimeSeriesLogger>,
}

impl SimulationEngine {
    /// Advances the simulation to `now` and records the tick in the time-series log.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<(), LadderError> {
        self.update(now);
        if let Some(logger) = &mut self.logger {
            if !self.state.events.is_empty() {
                logger.log_state(&self.state, now)?;
            }
        }
        Ok(())
    }

    /// Advances passive producers, then every worker, to `now`.
    ///
    /// Repeating a call with a `now` that crosses no cycle boundary has no effect.
    pub fn update(&mut self, now: DateTime<Utc>) {
        let Self { state, index, .. } = self;
        let SimulationState {
            industries,
            ledger,
            production,
            events,
            ..
        } = state;
        events.clear();

        for producer in production.iter_mut() {
            let amount = producer.catch_up(now, ledger);
            if amount > 0 {
                events.push(SimulationEvent::PassiveCredited {
                    resource: producer.definition.resource.clone(),
                    amount,
                });
            }
        }

        for (position, industry) in industries.iter_mut().enumerate() {
            for worker_position in 0..industry.workers.len() {
                let worker = &mut industry.workers[worker_position];
                if worker.try_auto_start(now) {
                    events.push(SimulationEvent::AutoStarted {
                        industry_id: industry.industry_id.clone(),
                        worker_id: worker.definition.worker_id.clone(),
                    });
                }
                let Some(produced) = worker.complete_cycle(now) else {
                    continue;
                };
                if produced == 0 {
                    continue;
                }
                let worker_id = worker.definition.worker_id.clone();
                let produces = worker.definition.produces.clone();

                match index.worker_position(position, &produces) {
                    Some(target) => {
                        let target = &mut industry.workers[target];
                        target.owned = target.owned.saturating_add(produced);
                    }
                    None => ledger.credit(&produces, produced),
                }
                log::debug!(
                    "{}/{} completed a cycle: +{} {}",
                    industry.industry_id,
                    worker_id,
                    produced,
                    produces
                );
                events.push(SimulationEvent::CycleCompleted {
                    industry_id: industry.industry_id.clone(),
                    worker_id,
                    produces,
                    amount: produced,
                });
            }
        }
    }

    /// Starts a production cycle on an idle, owned worker.
    pub fn start_run(
        &mut self,
        industry: usize,
        worker: usize,
        now: DateTime<Utc>,
    ) -> Result<(), LadderError> {
        self.state.industries[industry].workers[worker].start_run(now)
    }

    /// Starts the first worker of `industry` that is owned, idle, and not automatic.
    ///
    /// Returns its position, or `None` when no worker qualifies.
    pub fn run_lowest_available(
        &mut self,
        industry: usize,
        now: DateTime<Utc>,
    ) -> Result<Option<usize>, LadderError> {
        let workers = &mut self.state.industries[industry].workers;
        let Some(position) = workers
            .iter()
            .position(|worker| !worker.auto && !worker.is_running() && worker.owned > 0)
        else {
            return Ok(None);
        };
        workers[position].start_run(now)?;
        Ok(Some(position))
    }

    /// Buys one worker, or as many as the ledger allows in buy-max mode.
    ///
    /// Returns the number bought. Developer mode always buys at least one and
    /// never debits the ledger.
    pub fn buy_worker(&mut self, industry: usize, worker: usize) -> Result<u64, LadderError> {
        let state = &mut self.state;
        let target = &mut state.industries[industry].workers[worker];
        let cost = &target.definition.cost;
        let count = economy::purchase_count(cost, &state.ledger, state.buy_mode_max, state.dev_mode);

        if !state.dev_mode && (count == 0 || !state.ledger.try_debit(cost, count)) {
            return Err(LadderError::CannotAfford {
                worker: target.definition.worker_name.clone(),
            });
        }
        target.owned = target.owned.saturating_add(count);
        Ok(count)
    }

    /// Pays the scaled upgrade cost and raises the worker's tier by one.
    ///
    /// Returns the new tier.
    pub fn upgrade_worker(&mut self, industry: usize, worker: usize) -> Result<u32, LadderError> {
        let state = &mut self.state;
        let target = &mut state.industries[industry].workers[worker];
        let cost = economy::upgrade_cost(
            &target.definition.cost,
            target.definition.upgrade_mult,
            target.tier,
        );

        if !state.dev_mode && !state.ledger.try_debit(&cost, 1) {
            return Err(LadderError::CannotAfford {
                worker: format!("{} upgrade", target.definition.worker_name),
            });
        }
        target.raise_tier();
        if target.auto {
            log::debug!("{} runs automatically from tier {}", target.definition.worker_id, target.tier);
        }
        Ok(target.tier)
    }

    pub fn toggle_buy_max(&mut self) -> bool {
        self.state.buy_mode_max = !self.state.buy_mode_max;
        self.state.buy_mode_max
    }

    pub fn set_dev_mode(&mut self, dev_mode: bool) {
        self.state.dev_mode = dev_mode;
    }

    /// Runs a player command and describes the outcome in a short status line.
    pub fn execute(&mut self, command: Command, now: DateTime<Utc>) -> Result<String, LadderError> {
        match command {
            Command::StartRun { industry, worker } => {
                self.start_run(industry, worker, now)?;
                Ok("cycle started".to_string())
            }
            Command::Buy { industry, worker } => {
                let count = self.buy_worker(industry, worker)?;
                Ok(format!("bought {}", count))
            }
            Command::Upgrade { industry, worker } => {
                let tier = self.upgrade_worker(industry, worker)?;
                Ok(format!("upgraded to tier {}", tier))
            }
            Command::RunLowestAvailable { industry } => {
                match self.run_lowest_available(industry, now)? {
                    Some(_) => Ok("cycle started".to_string()),
                    None => Ok("no manual workers available".to_string()),
                }
            }
            Command::ToggleBuyMax => {
                self.toggle_buy_max();
                Ok(self.buy_mode_label().to_string())
            }
        }
    }

    /// Serializes the current state to the save format.
    pub fn save(&self) -> Result<Vec<u8>, LadderError> {
        snapshot::encode(&snapshot::capture(&self.state, Utc::now()))
    }

    /// Replaces the state with the one stored in `bytes`.
    ///
    /// On error the live state is left exactly as it was.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), LadderError> {
        let save = snapshot::decode(bytes)?;
        let next = snapshot::restore(&self.state, &self.index, &save).map_err(|e| {
            log::warn!("rejected save: {}", e);
            e
        })?;
        self.state = next;
        log::info!("restored save from {}", save.saved_at);
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LadderError> {
        let path = path.as_ref();
        let payload = self.save()?;
        fs::write(path, payload).map_err(|e| LadderError::FileIO(path.display().to_string(), e))?;
        log::info!("saved to {}", path.display());
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LadderError> {
        let path = path.as_ref();
        let payload = fs::read(path).map_err(|e| LadderError::FileIO(path.display().to_string(), e))?;
        self.load(&payload)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn industries(&self) -> &[IndustryState] {
        &self.state.industries
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.state.ledger
    }

    pub fn passive_producers(&self) -> &[PassiveProducerState] {
        &self.state.production
    }

    /// Events recorded by the most recent tick.
    pub fn events(&self) -> &[SimulationEvent] {
        &self.state.events
    }

    pub fn buy_mode_max(&self) -> bool {
        self.state.buy_mode_max
    }

    pub fn dev_mode(&self) -> bool {
        self.state.dev_mode
    }

    pub fn buy_mode_label(&self) -> &'static str {
        if self.state.buy_mode_max {
            "buy mode: 100%"
        } else {
            "buy mode: 1x"
        }
    }

    /// What the next upgrade of a worker would cost.
    pub fn upgrade_cost(&self, industry: usize, worker: usize) -> CostTable {
        let worker = &self.state.industries[industry].workers[worker];
        economy::upgrade_cost(&worker.definition.cost, worker.definition.upgrade_mult, worker.tier)
    }

    pub fn resource_summary(&self) -> Vec<String> {
        self.state.ledger.summary()
    }
}
