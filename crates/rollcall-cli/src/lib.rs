//! Rollcall CLI library.
//!
//! This crate provides the command-line shell around the attendance core.

mod cli;
pub mod commands;
mod config;
mod state;

pub use cli::{Cli, Commands, StatusArg, StudentsAction, status_filter};
pub use config::Config;
pub use state::AppState;
