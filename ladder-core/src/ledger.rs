//! The resource ledger: resource id to non-negative integer balance.

use ladder_schemas::cost::CostTable;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLedger {
    balances: BTreeMap<String, u64>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_balances(balances: BTreeMap<String, u64>) -> Self {
        Self { balances }
    }

    pub fn balances(&self) -> &BTreeMap<String, u64> {
        &self.balances
    }

    pub fn balance(&self, resource: &str) -> u64 {
        self.balances.get(resource).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn credit(&mut self, resource: &str, amount: u64) {
        let balance = self.balances.entry(resource.to_string()).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// True when every entry of `cost`, multiplied by `count`, is covered.
    pub fn covers(&self, cost: &CostTable, count: u64) -> bool {
        cost.iter().all(|entry| match entry.amount.checked_mul(count) {
            Some(required) => self.balance(&entry.resource) >= required,
            None => false,
        })
    }

    /// Debits `cost × count` in one step. Nothing is debited unless the whole
    /// amount is covered; returns whether the debit happened.
    pub fn try_debit(&mut self, cost: &CostTable, count: u64) -> bool {
        if !self.covers(cost, count) {
            return false;
        }
        for entry in cost.iter() {
            let required = entry.amount * count;
            if required == 0 {
                continue;
            }
            if let Some(balance) = self.balances.get_mut(&entry.resource) {
                *balance -= required;
            }
        }
        true
    }

    /// One `"<resource>: <amount>"` line per resource, sorted by id.
    pub fn summary(&self) -> Vec<String> {
        if self.balances.is_empty() {
            return vec!["no resources".to_string()];
        }
        self.balances
            .iter()
            .map(|(resource, amount)| format!("{}: {}", resource, amount))
            .collect()
    }
}
