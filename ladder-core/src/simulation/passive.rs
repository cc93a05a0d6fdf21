//! Background resource trickles that run regardless of workers or industries.

use crate::ledger::ResourceLedger;
use chrono::{DateTime, TimeDelta, Utc};
use ladder_schemas::production::PassiveProductionDefinition;

#[derive(Debug, Clone)]
pub struct PassiveProducerState {
    pub definition: PassiveProductionDefinition,
    pub next_at: DateTime<Utc>,
}

impl PassiveProducerState {
    /// The first payout happens one interval after `now`.
    pub fn new(definition: PassiveProductionDefinition, now: DateTime<Utc>) -> Self {
        let next_at = now
            .checked_add_signed(definition.prod_rate)
            .unwrap_or(now);
        Self {
            definition,
            next_at,
        }
    }

    /// Credits every payout due at or before `now` and moves `next_at` past it.
    ///
    /// Delayed or coalesced ticks yield the same total as punctual ones.
    /// Returns the credited amount. A non-positive interval or a zero
    /// quantity never pays out.
    pub fn catch_up(&mut self, now: DateTime<Utc>, ledger: &mut ResourceLedger) -> u64 {
        let interval = total_nanos(self.definition.prod_rate);
        if interval <= 0 || self.definition.prod_quant == 0 || now < self.next_at {
            return 0;
        }

        let elapsed = total_nanos(now - self.next_at);
        let payouts = elapsed / interval + 1;
        self.next_at = from_nanos(payouts * interval)
            .and_then(|advance| self.next_at.checked_add_signed(advance))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let payouts = u64::try_from(payouts).unwrap_or(u64::MAX);
        let amount = payouts.saturating_mul(self.definition.prod_quant);
        ledger.credit(&self.definition.resource, amount);
        amount
    }
}

const NANOS_PER_SEC: i128 = 1_000_000_000;

fn total_nanos(duration: TimeDelta) -> i128 {
    duration.num_seconds() as i128 * NANOS_PER_SEC + duration.subsec_nanos() as i128
}

/// Splits a non-negative nanosecond count into seconds so spans past ~292 years still fit.
fn from_nanos(nanos: i128) -> Option<TimeDelta> {
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SEC)).ok()?;
    TimeDelta::new(secs, nanos.rem_euclid(NANOS_PER_SEC) as u32)
}
