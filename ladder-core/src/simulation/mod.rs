pub mod builder;
pub mod engine;
pub mod passive;
pub mod state;
pub mod worker;
