pub mod config;
pub mod main_lib;
pub mod report;

pub use config::Cli;
pub use main_lib::{init_tracing, run};
