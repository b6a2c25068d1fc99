//! Log command: the attendance feed with live-status filtering.

use std::io::Write;

use anyhow::Result;
use chrono::Local;
use rollcall_core::{StatusFilter, filter_log, timed_in_count};

use crate::state::AppState;

pub fn run<W: Write>(
    writer: &mut W,
    state: &AppState,
    search: &str,
    status: StatusFilter,
) -> Result<()> {
    writeln!(writer, "Currently timed in: {}", timed_in_count(&state.records))?;
    writeln!(writer, "Total events: {}", state.records.len())?;

    let rows = filter_log(&state.records, search, status);
    if rows.is_empty() {
        writeln!(writer, "No attendance records found.")?;
        return Ok(());
    }

    writeln!(writer)?;
    for record in rows {
        let when = record
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S");
        writeln!(
            writer,
            "{when}  {:<10} {:<24} {}",
            record.student_id, record.student_name, record.status
        )?;
    }
    Ok(())
}
