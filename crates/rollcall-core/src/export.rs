//! Export rows: flattened sessions for spreadsheet serialization.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::event::AttendanceRecord;
use crate::session::{Session, reconstruct};

/// Fixed column order of the exported sheet.
pub const EXPORT_COLUMNS: [&str; 7] =
    ["Name", "Course", "Year", "Block", "Date", "Time In", "Time Out"];

/// Export errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The filtered record set yields zero sessions.
    #[error("no data to export")]
    NoDataToExport,
}

/// One row of the exported sheet. Absent times render as blank strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRow {
    pub name: String,
    pub course: String,
    pub year: u32,
    pub block: String,
    pub date: String,
    pub time_in: String,
    pub time_out: String,
}

impl SessionRow {
    fn from_session(session: &Session) -> Self {
        Self {
            name: session.student_name.clone(),
            course: session.student_course.clone(),
            year: session.student_year,
            block: session.student_block.clone(),
            date: format_date(session.anchor()),
            time_in: session.time_in.map(format_time).unwrap_or_default(),
            time_out: session.time_out.map(format_time).unwrap_or_default(),
        }
    }
}

fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

fn format_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Builds export rows from the given (typically pre-filtered) record set.
///
/// Sessions are reconstructed from exactly the records passed in, sorted
/// ascending by their best-available timestamp, and flattened. Fails with
/// [`ExportError::NoDataToExport`] when there is nothing to write, so
/// callers can abort before touching the output file.
pub fn session_rows(records: &[AttendanceRecord]) -> Result<Vec<SessionRow>, ExportError> {
    let mut sessions = reconstruct(records);
    if sessions.is_empty() {
        return Err(ExportError::NoDataToExport);
    }
    sessions.sort_by_key(Session::anchor);
    Ok(sessions.iter().map(SessionRow::from_session).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::AttendanceStatus;
    use crate::student::{NewStudent, Roster};

    fn roster() -> Roster {
        let mut roster = Roster::default();
        roster
            .add(NewStudent::new("STU-001", "Alice Johnson", "BS in Computer Science", 3, "A").unwrap())
            .unwrap();
        roster
    }

    fn record(roster: &Roster, status: AttendanceStatus, ts: &str) -> AttendanceRecord {
        AttendanceRecord::snapshot(roster.find("STU-001").unwrap(), status, ts.parse().unwrap())
    }

    #[test]
    fn empty_set_fails_with_no_data() {
        // Scenario E: zero sessions means no export.
        assert_eq!(session_rows(&[]), Err(ExportError::NoDataToExport));
    }

    #[test]
    fn completed_session_fills_both_times() {
        let roster = roster();
        let time_in: DateTime<Utc> = "2026-03-02T09:00:00Z".parse().unwrap();
        let time_out: DateTime<Utc> = "2026-03-02T10:30:00Z".parse().unwrap();
        let log = vec![
            record(&roster, AttendanceStatus::TimedOut, "2026-03-02T10:30:00Z"),
            record(&roster, AttendanceStatus::TimedIn, "2026-03-02T09:00:00Z"),
        ];

        let rows = session_rows(&log).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Alice Johnson");
        assert_eq!(rows[0].date, format_date(time_in));
        assert_eq!(rows[0].time_in, format_time(time_in));
        assert_eq!(rows[0].time_out, format_time(time_out));
    }

    #[test]
    fn orphans_leave_blank_cells() {
        let roster = roster();
        let log = vec![record(&roster, AttendanceStatus::TimedOut, "2026-03-02T10:00:00Z")];

        let rows = session_rows(&log).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time_in, "");
        assert!(!rows[0].time_out.is_empty());
    }

    #[test]
    fn rows_sort_by_best_available_timestamp() {
        let roster = roster();
        // An orphaned time-out at 08:00 must sort before a completed
        // session starting at 09:00.
        let log = vec![
            record(&roster, AttendanceStatus::TimedOut, "2026-03-02T10:30:00Z"),
            record(&roster, AttendanceStatus::TimedIn, "2026-03-02T09:00:00Z"),
            record(&roster, AttendanceStatus::TimedOut, "2026-03-02T08:00:00Z"),
        ];

        let rows = session_rows(&log).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time_in, "");
        assert_eq!(rows[0].time_out, format_time("2026-03-02T08:00:00Z".parse().unwrap()));
        assert_eq!(rows[1].time_in, format_time("2026-03-02T09:00:00Z".parse().unwrap()));
    }
}
