use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rollcall_cli::commands::{export, import, log, record, report, reset, scan, students};
use rollcall_cli::{AppState, Cli, Commands, Config, StudentsAction, status_filter};

/// Load config and open the store, ensuring the parent directory exists.
fn open_store(config_path: Option<&Path>) -> Result<rollcall_db::Store> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    rollcall_db::Store::open(&config.database_path).context("failed to open database")
}

#[expect(
    clippy::too_many_lines,
    reason = "CLI command dispatch is inherently verbose"
)]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Record { id }) => {
            let store = open_store(cli.config.as_deref())?;
            let mut state = AppState::load(&store);
            record::run(&mut out, &mut state, &store, id)?;
        }
        Some(Commands::Scan) => {
            let store = open_store(cli.config.as_deref())?;
            let mut state = AppState::load(&store);
            let stdin = io::stdin();
            let recorded = scan::run(&mut out, stdin.lock(), &mut state, &store)?;
            writeln!(out, "Recorded {recorded} scans.")?;
        }
        Some(Commands::Log { search, status }) => {
            let store = open_store(cli.config.as_deref())?;
            let state = AppState::load(&store);
            log::run(&mut out, &state, search, status_filter(*status))?;
        }
        Some(Commands::Report { json }) => {
            let store = open_store(cli.config.as_deref())?;
            let state = AppState::load(&store);
            report::run(&mut out, &state, *json)?;
        }
        Some(Commands::Students { action }) => {
            let store = open_store(cli.config.as_deref())?;
            let mut state = AppState::load(&store);
            match action {
                StudentsAction::List {
                    search,
                    course,
                    year,
                    block,
                } => students::list(
                    &mut out,
                    &state,
                    search,
                    course.as_deref(),
                    *year,
                    block.as_deref(),
                )?,
                StudentsAction::Add {
                    id,
                    name,
                    course,
                    year,
                    block,
                } => students::add(&mut out, &mut state, &store, id, name, course, *year, block)?,
                StudentsAction::Edit {
                    id,
                    name,
                    course,
                    year,
                    block,
                } => students::edit(
                    &mut out,
                    &mut state,
                    &store,
                    id,
                    name.as_deref(),
                    course.as_deref(),
                    *year,
                    block.as_deref(),
                )?,
                StudentsAction::Remove { id } => {
                    students::remove(&mut out, &mut state, &store, id)?;
                }
                StudentsAction::Import { file } => {
                    import::run(&mut out, &mut state, &store, file)?;
                }
            }
        }
        Some(Commands::Export {
            file,
            search,
            status,
        }) => {
            let store = open_store(cli.config.as_deref())?;
            let state = AppState::load(&store);
            export::run(&mut out, &state, file, search, status_filter(*status))?;
        }
        Some(Commands::Reset) => {
            let store = open_store(cli.config.as_deref())?;
            reset::run(&mut out, &store)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
