use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single `resource -> amount` pair inside a [`CostTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEntry {
    pub resource: String,
    pub amount: u64,
}

/// The price of one unit of a worker, as an explicit list of resource amounts.
///
/// Entries are kept sorted by resource id with no duplicates. On disk the table
/// is a plain map (`cost: { coins: 10, ore: 2 }`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u64>", into = "BTreeMap<String, u64>")]
pub struct CostTable {
    entries: Vec<CostEntry>,
}

impl CostTable {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        entries
            .into_iter()
            .map(|(resource, amount)| (resource.into(), amount))
            .collect::<BTreeMap<_, _>>()
            .into()
    }

    pub fn entries(&self) -> &[CostEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CostEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Amount required of `resource`, or 0 when the table does not list it.
    pub fn amount_of(&self, resource: &str) -> u64 {
        self.entries
            .binary_search_by(|entry| entry.resource.as_str().cmp(resource))
            .map_or(0, |index| self.entries[index].amount)
    }

    /// Inserts or overwrites the amount for `resource`.
    pub fn set(&mut self, resource: &str, amount: u64) {
        match self
            .entries
            .binary_search_by(|entry| entry.resource.as_str().cmp(resource))
        {
            Ok(index) => self.entries[index].amount = amount,
            Err(index) => self.entries.insert(
                index,
                CostEntry {
                    resource: resource.to_string(),
                    amount,
                },
            ),
        }
    }

    /// Returns a new table with every amount transformed by `f`.
    pub fn map_amounts<F>(&self, mut f: F) -> CostTable
    where
        F: FnMut(u64) -> u64,
    {
        CostTable {
            entries: self
                .entries
                .iter()
                .map(|entry| CostEntry {
                    resource: entry.resource.clone(),
                    amount: f(entry.amount),
                })
                .collect(),
        }
    }
}

impl From<BTreeMap<String, u64>> for CostTable {
    fn from(map: BTreeMap<String, u64>) -> Self {
        CostTable {
            entries: map
                .into_iter()
                .map(|(resource, amount)| CostEntry { resource, amount })
                .collect(),
        }
    }
}

impl From<CostTable> for BTreeMap<String, u64> {
    fn from(table: CostTable) -> Self {
        table
            .entries
            .into_iter()
            .map(|entry| (entry.resource, entry.amount))
            .collect()
    }
}
