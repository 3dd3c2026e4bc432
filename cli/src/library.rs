pub mod cli;
pub mod config;
pub mod constant;
pub mod error;
pub mod logging;
pub mod ontap;
pub mod progress;
pub mod prompt;
pub mod snapshot;
