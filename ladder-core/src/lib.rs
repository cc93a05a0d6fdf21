//! The Industry Ladder simulation engine.
//!
//! Workers run timed production cycles, can be bought and upgraded, and
//! eventually restart themselves. Passive producers trickle resources in the
//! background. The whole state can be saved to and restored from a JSON
//! snapshot keyed by stable ids.

pub mod economy;
pub mod error;
pub mod index;
pub mod ledger;
pub mod logger;
pub mod simulation;
pub mod snapshot;

pub use error::LadderError;
pub use simulation::{builder::SimulationBuilder, engine::SimulationEngine};
