//! Pricing rules for buying and upgrading workers.

use crate::ledger::ResourceLedger;
use ladder_schemas::cost::CostTable;

/// Scaled costs within this fraction of an integer are treated as that integer,
/// so `100 × 1.1` costs 110 and not 111. The bound is relative because float
/// error grows with the amount. Any larger fraction rounds up.
const RELATIVE_TOLERANCE: f64 = 1e-12;

pub fn can_afford(cost: &CostTable, ledger: &ResourceLedger) -> bool {
    ledger.covers(cost, 1)
}

/// Largest `n` with `n × amount <= balance` for every entry with a positive amount.
///
/// Entries with a zero amount do not constrain the result. A table with no
/// positive entry yields 0.
pub fn max_affordable(cost: &CostTable, ledger: &ResourceLedger) -> u64 {
    cost.iter()
        .filter(|entry| entry.amount > 0)
        .map(|entry| ledger.balance(&entry.resource) / entry.amount)
        .min()
        .unwrap_or(0)
}

/// How many workers a purchase would acquire.
///
/// A result of 0 means the purchase cannot go ahead. Developer mode never
/// reports 0.
pub fn purchase_count(
    cost: &CostTable,
    ledger: &ResourceLedger,
    buy_mode_max: bool,
    dev_mode: bool,
) -> u64 {
    if !buy_mode_max {
        return 1;
    }
    let count = max_affordable(cost, ledger);
    if dev_mode {
        count.max(1)
    } else {
        count
    }
}

/// The price of upgrading from `tier` to `tier + 1`: every entry of `base`
/// scaled by `multiplier ^ (tier - 1)` and rounded up.
pub fn upgrade_cost(base: &CostTable, multiplier: f64, tier: u32) -> CostTable {
    let exponent = tier.saturating_sub(1);
    let factor = multiplier.powi(exponent.min(i32::MAX as u32) as i32);
    base.map_amounts(|amount| {
        let scaled = amount as f64 * factor;
        if scaled <= 0.0 {
            0
        } else {
            let nearest = scaled.round();
            if (scaled - nearest).abs() <= scaled * RELATIVE_TOLERANCE {
                nearest as u64
            } else {
                scaled.ceil() as u64
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn ledger(entries: &[(&str, u64)]) -> ResourceLedger {
        ResourceLedger::from_balances(
            entries
                .iter()
                .map(|(resource, amount)| (resource.to_string(), *amount))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn max_affordable_takes_the_tightest_resource() {
        let cost = CostTable::new([("coins", 10), ("ore", 3)]);
        assert_eq!(max_affordable(&cost, &ledger(&[("coins", 95), ("ore", 12)])), 4);
        assert_eq!(max_affordable(&cost, &ledger(&[("coins", 95)])), 0);
    }

    #[test]
    fn zero_cost_entries_do_not_constrain() {
        let cost = CostTable::new([("coins", 10), ("ore", 0)]);
        assert_eq!(max_affordable(&cost, &ledger(&[("coins", 30)])), 3);

        let free = CostTable::new([("coins", 0)]);
        assert_eq!(max_affordable(&free, &ledger(&[("coins", 30)])), 0);
    }

    #[test]
    fn purchase_count_by_mode() {
        let cost = CostTable::new([("coins", 10)]);
        let poor = ledger(&[("coins", 5)]);
        let rich = ledger(&[("coins", 35)]);

        assert_eq!(purchase_count(&cost, &poor, false, false), 1);
        assert_eq!(purchase_count(&cost, &poor, true, false), 0);
        assert_eq!(purchase_count(&cost, &poor, true, true), 1);
        assert_eq!(purchase_count(&cost, &rich, true, false), 3);
        assert_eq!(purchase_count(&cost, &rich, true, true), 3);
    }

    #[test]
    fn upgrade_cost_doubles_after_the_first_tier() {
        let base = CostTable::new([("coins", 10)]);
        assert_eq!(upgrade_cost(&base, 2.0, 1), base);
        assert_eq!(upgrade_cost(&base, 2.0, 2), CostTable::new([("coins", 20)]));
        assert_eq!(upgrade_cost(&base, 2.0, 3), CostTable::new([("coins", 40)]));
    }

    #[test]
    fn upgrade_cost_rounds_up() {
        let base = CostTable::new([("coins", 10), ("ore", 3)]);
        let cost = upgrade_cost(&base, 1.15, 2);
        assert_eq!(cost.amount_of("coins"), 12);
        assert_eq!(cost.amount_of("ore"), 4);

        let exact = upgrade_cost(&CostTable::new([("coins", 100)]), 1.1, 2);
        assert_eq!(exact.amount_of("coins"), 110);
    }

    #[test]
    fn upgrade_cost_rounds_up_tiny_fractions() {
        let cost = upgrade_cost(&CostTable::new([("coins", 1)]), 1.000_000_000_1, 2);
        assert_eq!(cost.amount_of("coins"), 2);
    }

    #[test]
    fn upgrade_cost_ignores_float_noise_on_large_amounts() {
        let cost = upgrade_cost(&CostTable::new([("coins", 30_000_000)]), 1.1, 2);
        assert_eq!(cost.amount_of("coins"), 33_000_000);
        let cost = upgrade_cost(&CostTable::new([("coins", 10)]), 1.1, 4);
        assert_eq!(cost.amount_of("coins"), 14);
    }
}
