//! CLI subcommand implementations.

pub mod export;
pub mod import;
pub mod log;
pub mod record;
pub mod report;
pub mod reset;
pub mod scan;
pub mod students;
