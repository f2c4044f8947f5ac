//! Command implementations.

pub mod config;
pub mod processed;
pub mod run;

pub use self::config::execute_config;
pub use self::processed::execute_processed;
pub use self::run::execute_run;
