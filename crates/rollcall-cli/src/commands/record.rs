//! Record command for a single ID scan.

use std::io::Write;

use anyhow::Result;
use chrono::Utc;
use rollcall_core::{AttendanceStatus, record_scan};
use rollcall_db::Store;

use crate::state::AppState;

pub fn run<W: Write>(writer: &mut W, state: &mut AppState, store: &Store, id: &str) -> Result<()> {
    let outcome = record_scan(&state.roster, &mut state.records, id, Utc::now())?;
    state.persist_records(store);

    let verb = match outcome.status {
        AttendanceStatus::TimedIn => "in",
        AttendanceStatus::TimedOut => "out",
    };
    writeln!(writer, "{} timed {verb} successfully!", outcome.student.name)?;
    Ok(())
}
