//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use rollcall_core::{AttendanceStatus, StatusFilter};

/// Student attendance tracker.
///
/// Records time-in/time-out scans for a student roster, reconstructs
/// attendance sessions and reports on them.
#[derive(Debug, Parser)]
#[command(name = "rollcall", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a scan for a student ID (toggles time-in/time-out).
    Record {
        /// The student identifier, as printed on the ID card.
        id: String,
    },

    /// Read scanned identifiers from stdin, one per line.
    ///
    /// USB barcode and QR scanners act as keyboards, so pointing one at
    /// this command records each decoded code like a manual entry.
    Scan,

    /// Show the attendance log, newest first.
    Log {
        /// Case-insensitive text match on student name or ID.
        #[arg(long, default_value = "")]
        search: String,

        /// Only show rows for students currently in this status.
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Show the leaderboard and course/year distributions.
    Report {
        /// Output as JSON instead of human-readable text.
        #[arg(long)]
        json: bool,
    },

    /// Manage the student roster.
    Students {
        #[command(subcommand)]
        action: StudentsAction,
    },

    /// Export reconstructed sessions to an xlsx workbook.
    Export {
        /// Output file path.
        file: PathBuf,

        /// Case-insensitive text match on student name or ID.
        #[arg(long, default_value = "")]
        search: String,

        /// Only export rows for students currently in this status.
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Clear all data and reseed the roster.
    Reset,
}

/// Roster management subcommands.
#[derive(Debug, Subcommand)]
pub enum StudentsAction {
    /// List students, optionally filtered.
    List {
        /// Case-insensitive text match on name or ID.
        #[arg(long, default_value = "")]
        search: String,

        /// Exact course filter.
        #[arg(long)]
        course: Option<String>,

        /// Exact year-level filter.
        #[arg(long)]
        year: Option<u32>,

        /// Exact block filter.
        #[arg(long)]
        block: Option<String>,
    },

    /// Add a student to the roster.
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        course: String,
        #[arg(long)]
        year: u32,
        #[arg(long)]
        block: String,
    },

    /// Edit an existing student's fields.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        year: Option<u32>,
        #[arg(long)]
        block: Option<String>,
    },

    /// Remove a student from the roster.
    Remove { id: String },

    /// Import students from a CSV file.
    ///
    /// Required columns: Student ID, Student Name, Course, Year, Block.
    Import { file: PathBuf },
}

/// Status filter value for `--status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    TimedIn,
    TimedOut,
}

impl From<StatusArg> for AttendanceStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::TimedIn => Self::TimedIn,
            StatusArg::TimedOut => Self::TimedOut,
        }
    }
}

/// Maps the optional CLI flag to the core filter.
pub fn status_filter(arg: Option<StatusArg>) -> StatusFilter {
    arg.map_or(StatusFilter::All, |a| StatusFilter::Only(a.into()))
}
