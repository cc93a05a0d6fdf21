//! Per-worker ownership, tier, and the production-cycle state machine.

use crate::error::LadderError;
use chrono::{DateTime, Utc};
use ladder_schemas::industry::WorkerDefinition;

/// Where a worker is in its production cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running { ends_at: DateTime<Utc> },
}

#[derive(Debug, Clone)]
pub struct WorkerState {
    pub definition: WorkerDefinition,
    pub owned: u64,
    pub tier: u32,
    pub phase: RunPhase,
    /// Once set, never cleared.
    pub auto: bool,
}

/// Whether reaching `tier` unlocks automatic restarts for `definition`.
pub fn auto_unlocked(definition: &WorkerDefinition, tier: u32) -> bool {
    definition.auto_tier > 0 && tier >= definition.auto_tier
}

impl WorkerState {
    pub fn new(definition: WorkerDefinition, owned: u64) -> Self {
        Self {
            definition,
            owned,
            tier: 1,
            phase: RunPhase::Idle,
            auto: false,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, RunPhase::Running { .. })
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            RunPhase::Running { ends_at } => Some(ends_at),
            RunPhase::Idle => None,
        }
    }

    /// Units delivered by one completed cycle at the current ownership.
    pub fn yield_per_cycle(&self) -> u64 {
        self.definition.prod_quant.saturating_mul(self.owned)
    }

    /// Manual run request.
    pub fn start_run(&mut self, now: DateTime<Utc>) -> Result<(), LadderError> {
        if self.owned == 0 {
            return Err(LadderError::InsufficientOwnership {
                worker: self.definition.worker_name.clone(),
            });
        }
        if self.is_running() {
            return Err(LadderError::AlreadyRunning {
                worker: self.definition.worker_name.clone(),
            });
        }
        self.begin_cycle(now);
        Ok(())
    }

    /// Starts an idle, owned, auto worker. Returns whether a cycle began.
    pub(crate) fn try_auto_start(&mut self, now: DateTime<Utc>) -> bool {
        if self.auto && !self.is_running() && self.owned > 0 {
            self.begin_cycle(now);
            return true;
        }
        false
    }

    /// Finishes the running cycle if `now` has reached its end.
    ///
    /// Returns the produced amount when a cycle completed. The worker is left
    /// running again (auto, still owned) or idle.
    pub(crate) fn complete_cycle(&mut self, now: DateTime<Utc>) -> Option<u64> {
        let ends_at = self.ends_at()?;
        if now < ends_at {
            return None;
        }
        let produced = self.yield_per_cycle();
        self.phase = RunPhase::Idle;
        if self.auto && self.owned > 0 {
            self.begin_cycle(now);
        }
        Some(produced)
    }

    /// Raises the tier by one and latches `auto` when the threshold is reached.
    pub(crate) fn raise_tier(&mut self) {
        self.tier = self.tier.saturating_add(1);
        if auto_unlocked(&self.definition, self.tier) {
            self.auto = true;
        }
    }

    /// An interval that runs past the end of representable time ends at `MAX_UTC`.
    fn begin_cycle(&mut self, now: DateTime<Utc>) {
        let ends_at = now
            .checked_add_signed(self.definition.prod_rate)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.phase = RunPhase::Running { ends_at };
    }
}
