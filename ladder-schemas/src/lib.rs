pub mod command;
pub mod cost;
pub mod duration;
pub mod file_formats;
pub mod industry;
pub mod production;
pub mod save;
