//! Log filtering for display.

use crate::event::{AttendanceRecord, AttendanceStatus};
use crate::presence::latest_status_by_student;

/// Which statuses the log view should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AttendanceStatus),
}

/// Filters the event log for display, newest first.
///
/// The text query matches case-insensitively against the student name OR
/// ID; an empty query matches everything. The status filter is *live*: a
/// record passes when its student's current status - computed over the
/// entire unfiltered log, not the text-filtered subset - equals the
/// requested one, regardless of the status stored on the row itself.
pub fn filter_log(
    records: &[AttendanceRecord],
    query: &str,
    status: StatusFilter,
) -> Vec<AttendanceRecord> {
    let needle = query.trim().to_lowercase();

    // The live-status map is only needed (and only built) when a
    // specific status is requested.
    let wanted_status = match status {
        StatusFilter::All => None,
        StatusFilter::Only(wanted) => Some((wanted, latest_status_by_student(records))),
    };

    let mut filtered: Vec<AttendanceRecord> = records
        .iter()
        .filter(|record| {
            let matches_query = needle.is_empty()
                || record.student_name.to_lowercase().contains(&needle)
                || record.student_id.key().contains(&needle);
            let matches_status = wanted_status
                .as_ref()
                .is_none_or(|(wanted, latest)| {
                    latest.get(&record.student_id.key()) == Some(wanted)
                });
            matches_query && matches_status
        })
        .cloned()
        .collect();

    // Stable sort: equal timestamps keep their newest-first insertion order.
    filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::reconstruct;
    use crate::student::{NewStudent, Roster};

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
        AttendanceRecord::snapshot(roster.find(id).unwrap(), status, ts.parse().unwrap())
    }

    fn sample_log(roster: &Roster) -> Vec<AttendanceRecord> {
        vec![
            record(roster, "STU-002", AttendanceStatus::TimedIn, "2026-03-02T10:00:00Z"),
            record(roster, "STU-001", AttendanceStatus::TimedOut, "2026-03-02T09:30:00Z"),
            record(roster, "STU-001", AttendanceStatus::TimedIn, "2026-03-02T09:00:00Z"),
        ]
    }

    #[test]
    fn empty_query_and_all_statuses_keep_everything() {
        let roster = roster();
        let log = sample_log(&roster);
        let filtered = filter_log(&log, "", StatusFilter::All);
        assert_eq!(filtered.len(), 3);
        // Newest first.
        assert_eq!(filtered[0].student_id.as_str(), "STU-002");
    }

    #[test]
    fn text_matches_name_or_id_case_insensitively() {
        let roster = roster();
        let log = sample_log(&roster);

        assert_eq!(filter_log(&log, "alice", StatusFilter::All).len(), 2);
        assert_eq!(filter_log(&log, "stu-002", StatusFilter::All).len(), 1);
        assert_eq!(filter_log(&log, "nobody", StatusFilter::All).len(), 0);
    }

    #[test]
    fn status_filter_reflects_live_state_not_row_status() {
        let roster = roster();
        let log = sample_log(&roster);

        // Alice is currently timed out, so *both* of her rows (including
        // the "Timed In" one) pass the timed-out filter.
        let timed_out = filter_log(&log, "", StatusFilter::Only(AttendanceStatus::TimedOut));
        assert_eq!(timed_out.len(), 2);
        assert!(timed_out.iter().all(|r| r.student_id.matches("STU-001")));

        let timed_in = filter_log(&log, "", StatusFilter::Only(AttendanceStatus::TimedIn));
        assert_eq!(timed_in.len(), 1);
        assert_eq!(timed_in[0].student_id.as_str(), "STU-002");
    }

    #[test]
    fn unfiltered_view_reconstructs_identically() {
        // Filtering with no query and all statuses must not change the
        // multiset of reconstructed sessions.
        let roster = roster();
        let log = sample_log(&roster);

        let direct = reconstruct(&log);
        let via_filter = reconstruct(&filter_log(&log, "", StatusFilter::All));

        let key = |s: &crate::session::Session| (s.anchor(), s.student_id.key(), s.time_out);
        let mut a = direct;
        let mut b = via_filter;
        a.sort_by_key(key);
        b.sort_by_key(key);
        assert_eq!(a, b);
    }
}
