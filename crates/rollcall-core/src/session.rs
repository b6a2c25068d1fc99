//! Session reconstruction: pairing time-in/time-out events.
//!
//! The event log is append-only and may contain anomalies (double
//! time-ins, time-outs with no opener, out-of-order inserts). The
//! reconstructor walks the log in chronological order and pairs events
//! into sessions, emitting orphans rather than dropping anything, so
//! every record surfaces in exactly one session.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::{AttendanceRecord, AttendanceStatus};
use crate::types::StudentId;

/// A reconstructed pairing of a time-in and (possibly absent) time-out.
///
/// Derived data - never persisted. The student fields are taken from the
/// snapshot on the time-in record when present, otherwise from the
/// time-out record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub student_id: StudentId,
    pub student_name: String,
    pub student_course: String,
    pub student_year: u32,
    pub student_block: String,
    pub time_in: Option<DateTime<Utc>>,
    pub time_out: Option<DateTime<Utc>>,
}

impl Session {
    fn from_record(
        record: &AttendanceRecord,
        time_in: Option<DateTime<Utc>>,
        time_out: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            student_id: record.student_id.clone(),
            student_name: record.student_name.clone(),
            student_course: record.student_course.clone(),
            student_year: record.student_year,
            student_block: record.student_block.clone(),
            time_in,
            time_out,
        }
    }

    /// True when both ends of the pair are present.
    pub const fn is_complete(&self) -> bool {
        self.time_in.is_some() && self.time_out.is_some()
    }

    /// Duration in seconds for completed sessions; orphans have none.
    pub fn duration_seconds(&self) -> Option<i64> {
        match (self.time_in, self.time_out) {
            (Some(time_in), Some(time_out)) => Some((time_out - time_in).num_seconds()),
            _ => None,
        }
    }

    /// Best-available timestamp: the time-in when present, else the
    /// time-out. Used for chronological ordering of export rows.
    pub fn anchor(&self) -> DateTime<Utc> {
        self.time_in
            .or(self.time_out)
            .expect("a session always has at least one timestamp")
    }
}

/// Reconstructs sessions from the event log.
///
/// Single forward pass over the records sorted ascending by timestamp,
/// keeping an open time-in per student (case-insensitive ID):
///
/// - a time-in while one is already open emits the older one as an
///   orphan and keeps the newer one open;
/// - a time-out closes the open time-in into a completed session, or is
///   emitted as an orphan when nothing is open;
/// - whatever remains open at the end is emitted as an open session.
///
/// Every record lands in exactly one session, so
/// `2 * completed + orphans == records.len()`.
pub fn reconstruct(records: &[AttendanceRecord]) -> Vec<Session> {
    let mut chronological: Vec<&AttendanceRecord> = records.iter().collect();
    chronological.sort_by_key(|r| r.timestamp);

    let mut sessions = Vec::new();
    let mut open_time_ins: HashMap<String, &AttendanceRecord> = HashMap::new();

    for record in chronological {
        let key = record.student_id.key();
        match record.status {
            AttendanceStatus::TimedIn => {
                if let Some(orphaned) = open_time_ins.insert(key, record) {
                    // Two time-ins with no intervening time-out.
                    tracing::debug!(student = %orphaned.student_id, "orphaned time-in");
                    sessions.push(Session::from_record(orphaned, Some(orphaned.timestamp), None));
                }
            }
            AttendanceStatus::TimedOut => {
                if let Some(opener) = open_time_ins.remove(&key) {
                    sessions.push(Session::from_record(
                        opener,
                        Some(opener.timestamp),
                        Some(record.timestamp),
                    ));
                } else {
                    // Time-out with no matching time-in.
                    sessions.push(Session::from_record(record, None, Some(record.timestamp)));
                }
            }
        }
    }

    // Students still "in" become open sessions. HashMap order is
    // arbitrary, so sort for a deterministic result.
    let mut still_open: Vec<&AttendanceRecord> = open_time_ins.into_values().collect();
    still_open.sort_by_key(|r| r.timestamp);
    for record in still_open {
        sessions.push(Session::from_record(record, Some(record.timestamp), None));
    }

    sessions
}
