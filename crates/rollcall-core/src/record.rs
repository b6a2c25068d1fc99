//! Scan recording: the time-in/time-out toggle.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::event::{AttendanceRecord, AttendanceStatus};
use crate::presence::{Presence, presence};
use crate::student::{Roster, Student};

/// Errors from recording a scan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The scanned identifier does not match any roster entry.
    #[error("student with ID \"{0}\" not found")]
    StudentNotFound(String),
}

/// What a successful scan did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// The matched roster entry at the time of the scan.
    pub student: Student,
    /// The status the new record carries.
    pub status: AttendanceStatus,
}

/// Records a scan for the given identifier.
///
/// Looks the identifier up case-insensitively against the roster, derives
/// the next status as a strict toggle of the student's current presence
/// (`TimedOut` or `Unknown` both lead to `TimedIn`), and prepends a
/// snapshot record to the log. Persistence is the caller's concern.
pub fn record_scan(
    roster: &Roster,
    log: &mut Vec<AttendanceRecord>,
    id: &str,
    now: DateTime<Utc>,
) -> Result<ScanOutcome, ScanError> {
    let Some(student) = roster.find(id) else {
        return Err(ScanError::StudentNotFound(id.trim().to_string()));
    };

    let status = match presence(log, student.id.as_str()) {
        Presence::TimedIn => AttendanceStatus::TimedOut,
        Presence::TimedOut | Presence::Unknown => AttendanceStatus::TimedIn,
    };
    tracing::debug!(student = %student.id, %status, "recording scan");

    log.insert(0, AttendanceRecord::snapshot(student, status, now));
    Ok(ScanOutcome {
        student: student.clone(),
        status,
    })
}
