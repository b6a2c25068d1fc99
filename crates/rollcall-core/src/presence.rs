//! Status resolution: a student's current state derived from the log.

use std::collections::HashMap;

use crate::event::{AttendanceRecord, AttendanceStatus};

/// A student's current status as derived from the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    TimedIn,
    TimedOut,
    /// No events exist for the student.
    Unknown,
}

impl From<AttendanceStatus> for Presence {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::TimedIn => Self::TimedIn,
            AttendanceStatus::TimedOut => Self::TimedOut,
        }
    }
}

/// Resolves a student's current status: the status of the
/// maximum-timestamp record for that student, or [`Presence::Unknown`]
/// when none exist.
///
/// The log is kept newest-first by insertion, so on equal timestamps the
/// record inserted most recently (earlier in the slice) wins. The
/// strictly-greater comparison below is what pins that tie-break.
pub fn presence(records: &[AttendanceRecord], student_id: &str) -> Presence {
    let mut latest: Option<&AttendanceRecord> = None;
    for record in records {
        if !record.student_id.matches(student_id) {
            continue;
        }
        match latest {
            Some(best) if record.timestamp <= best.timestamp => {}
            _ => latest = Some(record),
        }
    }
    latest.map_or(Presence::Unknown, |r| r.status.into())
}

/// Latest status per student over the whole log, keyed by the normalized
/// student ID.
///
/// Equivalent to calling [`presence`] per student, computed in one pass.
pub fn latest_status_by_student(
    records: &[AttendanceRecord],
) -> HashMap<String, AttendanceStatus> {
    let mut latest: HashMap<String, &AttendanceRecord> = HashMap::new();
    for record in records {
        latest
            .entry(record.student_id.key())
            .and_modify(|best| {
                if record.timestamp > best.timestamp {
                    *best = record;
                }
            })
            .or_insert(record);
    }
    latest
        .into_iter()
        .map(|(key, record)| (key, record.status))
        .collect()
}

/// Number of distinct students currently timed in.
pub fn timed_in_count(records: &[AttendanceRecord]) -> usize {
    latest_status_by_student(records)
        .values()
        .filter(|status| **status == AttendanceStatus::TimedIn)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::AttendanceRecord;
    use crate::student::{NewStudent, Roster};
    use chrono::{DateTime, Utc};

    fn roster() -> Roster {
        let mut roster = Roster::default();
        roster
            .add(NewStudent::new("STU-001", "Alice Johnson", "BS in Computer Science", 3, "A").unwrap())
            .unwrap();
        roster
            .add(NewStudent::new("STU-002", "Bob Williams", "BS in Information Technology", 2, "B").unwrap())
            .unwrap();
        roster
    }

    fn record(roster: &Roster, id: &str, status: AttendanceStatus, ts: &str) -> AttendanceRecord {
        let student = roster.find(id).unwrap();
        let ts: DateTime<Utc> = ts.parse().unwrap();
        AttendanceRecord::snapshot(student, status, ts)
    }

    #[test]
    fn presence_unknown_for_empty_log() {
        assert_eq!(presence(&[], "STU-001"), Presence::Unknown);
    }

    #[test]
    fn presence_follows_maximum_timestamp() {
        let roster = roster();
        // Newest-first insertion order, but deliberately out of
        // chronological order: the 10:00 record sits in the middle.
        let log = vec![
            record(&roster, "STU-001", AttendanceStatus::TimedIn, "2026-03-02T09:30:00Z"),
            record(&roster, "STU-001", AttendanceStatus::TimedOut, "2026-03-02T10:00:00Z"),
            record(&roster, "STU-001", AttendanceStatus::TimedIn, "2026-03-02T09:00:00Z"),
        ];
        assert_eq!(presence(&log, "STU-001"), Presence::TimedOut);
    }

    #[test]
    fn presence_matches_id_case_insensitively() {
        let roster = roster();
        let log = vec![record(&roster, "STU-001", AttendanceStatus::TimedIn, "2026-03-02T09:00:00Z")];
        assert_eq!(presence(&log, "stu-001"), Presence::TimedIn);
        assert_eq!(presence(&log, "STU-002"), Presence::Unknown);
    }

    #[test]
    fn presence_tie_breaks_on_insertion_order() {
        let roster = roster();
        // Two records with the same timestamp; the log is newest-first,
        // so the first element was inserted last and must win.
        let log = vec![
            record(&roster, "STU-001", AttendanceStatus::TimedOut, "2026-03-02T09:00:00Z"),
            record(&roster, "STU-001", AttendanceStatus::TimedIn, "2026-03-02T09:00:00Z"),
        ];
        assert_eq!(presence(&log, "STU-001"), Presence::TimedOut);
    }

    #[test]
    fn timed_in_count_counts_distinct_students() {
        let roster = roster();
        let log = vec![
            record(&roster, "STU-002", AttendanceStatus::TimedIn, "2026-03-02T09:20:00Z"),
            record(&roster, "STU-001", AttendanceStatus::TimedOut, "2026-03-02T09:10:00Z"),
            record(&roster, "STU-001", AttendanceStatus::TimedIn, "2026-03-02T09:00:00Z"),
        ];
        assert_eq!(timed_in_count(&log), 1);

        let map = latest_status_by_student(&log);
        assert_eq!(map["stu-001"], AttendanceStatus::TimedOut);
        assert_eq!(map["stu-002"], AttendanceStatus::TimedIn);
    }
}
