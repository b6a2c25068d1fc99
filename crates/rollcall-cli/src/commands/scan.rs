//! Scan command: a line-oriented kiosk loop.
//!
//! USB barcode and QR scanners present as keyboards that type the decoded
//! code followed by Enter, so reading identifiers line by line from stdin
//! turns any such scanner into an attendance station.

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Utc;
use rollcall_core::{AttendanceStatus, record_scan};
use rollcall_db::Store;

use crate::state::AppState;

pub fn run<W: Write, R: BufRead>(
    writer: &mut W,
    reader: R,
    state: &mut AppState,
    store: &Store,
) -> Result<usize> {
    let mut recorded = 0;
    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if id.is_empty() {
            continue;
        }

        // A bad scan must not end the kiosk session.
        match record_scan(&state.roster, &mut state.records, id, Utc::now()) {
            Ok(outcome) => {
                state.persist_records(store);
                recorded += 1;
                let verb = match outcome.status {
                    AttendanceStatus::TimedIn => "in",
                    AttendanceStatus::TimedOut => "out",
                };
                writeln!(writer, "{} timed {verb} successfully!", outcome.student.name)?;
            }
            Err(error) => writeln!(writer, "Error: {error}")?,
        }
    }
    Ok(recorded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state;

    #[test]
    fn scan_loop_skips_blanks_and_survives_unknown_ids() {
        let store = Store::open_in_memory().unwrap();
        let mut app = AppState {
            roster: state::seed_roster(),
            records: Vec::new(),
        };

        let input = b"STU-001\n\n  \nSTU-404\nstu-002\n" as &[u8];
        let mut output = Vec::new();
        let recorded = run(&mut output, input, &mut app, &store).unwrap();

        assert_eq!(recorded, 2);
        assert_eq!(app.records.len(), 2);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Alice Johnson timed in successfully!"));
        assert!(output.contains("STU-404"));
        assert!(output.contains("Bob Williams timed in successfully!"));
    }

    #[test]
    fn scan_persists_after_each_entry() {
        let store = Store::open_in_memory().unwrap();
        let mut app = AppState {
            roster: state::seed_roster(),
            records: Vec::new(),
        };

        let input = b"STU-003\nSTU-003\n" as &[u8];
        let mut output = Vec::new();
        run(&mut output, input, &mut app, &store).unwrap();

        let reloaded = AppState::load(&store);
        assert_eq!(reloaded.records.len(), 2);
        // Newest first: the time-out scan leads the log.
        assert_eq!(reloaded.records[0].status, AttendanceStatus::TimedOut);
    }
}
