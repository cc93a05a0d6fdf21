use crate::{
    error::LadderError,
    index::DefinitionIndex,
    ledger::ResourceLedger,
    logger::TimeSeriesLogger,
    simulation::{
        engine::SimulationEngine,
        passive::PassiveProducerState,
        state::{IndustryState, SimulationState},
        worker::WorkerState,
    },
};
use chrono::{DateTime, Utc};
use ladder_schemas::{
    file_formats::GameFile,
    industry::IndustryDefinition,
    production::PassiveProductionDefinition,
};
use std::collections::BTreeMap;

/// Upper bound on the number of industries a simulation may hold.
pub const MAX_INDUSTRIES: usize = 5;

/// A fluent builder for constructing a `SimulationEngine`.
///
/// Definitions are expected to be validated already (see the app's config
/// loader); the builder only enforces the structural limits of the engine.
#[derive(Default)]
pub struct SimulationBuilder {
    industries: Vec<IndustryDefinition>,
    starting_resources: BTreeMap<String, u64>,
    passive_production: Vec<PassiveProductionDefinition>,
    dev_mode: bool,
    start_time: Option<DateTime<Utc>>,
    log_path: Option<String>,
}

impl SimulationBuilder {
    /// Creates a new, empty `SimulationBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes industries, starting resources and passive production from a parsed game file.
    pub fn with_game_file(self, file: GameFile) -> Self {
        self.with_industries(file.industries)
            .with_starting_resources(file.starting_resources)
            .with_passive_production(file.starting_production)
    }

    /// Sets the industries, in display order.
    pub fn with_industries(mut self, industries: Vec<IndustryDefinition>) -> Self {
        self.industries = industries;
        self
    }

    /// Sets the balances the ledger starts with.
    pub fn with_starting_resources(mut self, resources: BTreeMap<String, u64>) -> Self {
        self.starting_resources = resources;
        self
    }

    /// Sets the passive producers, in definition order.
    pub fn with_passive_production(mut self, production: Vec<PassiveProductionDefinition>) -> Self {
        self.passive_production = production;
        self
    }

    /// Starts the simulation with developer mode on or off.
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// Fixes the construction time used to schedule the first passive payouts.
    /// Defaults to the current wall-clock time.
    pub fn starting_at(mut self, now: DateTime<Utc>) -> Self {
        self.start_time = Some(now);
        self
    }

    /// Configures the simulation to write time-series data to the specified CSV file.
    pub fn with_timeseries_logging_to_file(mut self, path: &str) -> Self {
        self.log_path = Some(path.to_string());
        self
    }

    /// Consumes the builder and returns a fully configured `SimulationEngine`.
    ///
    /// The first worker of every industry starts with one owned unit; every
    /// worker starts idle at tier 1.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when no industry is given, `TooManyIndustries`
    /// past [`MAX_INDUSTRIES`], and `FileIO` if the time-series log cannot be created.
    pub fn build(self) -> Result<SimulationEngine, LadderError> {
        if self.industries.is_empty() {
            return Err(LadderError::ConfigInvalid("no industries defined".to_string()));
        }
        if self.industries.len() > MAX_INDUSTRIES {
            return Err(LadderError::TooManyIndustries(self.industries.len()));
        }

        let now = self.start_time.unwrap_or_else(Utc::now);
        let index = DefinitionIndex::from_industries(&self.industries);

        let industries = self
            .industries
            .into_iter()
            .map(|industry| IndustryState {
                industry_id: industry.industry_id,
                name: industry.name,
                resource: industry.resource,
                workers: industry
                    .workers
                    .into_iter()
                    .enumerate()
                    .map(|(position, worker)| {
                        let owned = if position == 0 { 1 } else { 0 };
                        WorkerState::new(worker, owned)
                    })
                    .collect(),
            })
            .collect();

        let production = self
            .passive_production
            .into_iter()
            .map(|definition| PassiveProducerState::new(definition, now))
            .collect();

        let state = SimulationState {
            industries,
            ledger: ResourceLedger::from_balances(self.starting_resources),
            production,
            buy_mode_max: false,
            dev_mode: self.dev_mode,
            events: Vec::new(),
        };

        let logger = match self.log_path {
            Some(path) => Some(
                TimeSeriesLogger::new(&path)
                    .map_err(|e| LadderError::FileIO(path.clone(), e))?,
            ),
            None => None,
        };

        log::info!(
            "built simulation with {} industries and {} passive producers",
            state.industries.len(),
            state.production.len()
        );

        Ok(SimulationEngine {
            state,
            index,
            logger,
        })
    }
}
