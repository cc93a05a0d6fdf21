use serde::{Deserialize, Serialize};

/// A player action addressed to the simulation.
///
/// Indices refer to the live industry list and that industry's worker list.
/// Callers are responsible for keeping them in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    StartRun {
        industry: usize,
        worker: usize,
    },
    Buy {
        industry: usize,
        worker: usize,
    },
    Upgrade {
        industry: usize,
        worker: usize,
    },
    RunLowestAvailable {
        industry: usize,
    },
    ToggleBuyMax,
}
