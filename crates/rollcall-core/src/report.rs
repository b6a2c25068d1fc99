//! Aggregate statistics: leaderboard and distributions.

use std::collections::HashMap;

use serde::Serialize;

use crate::session::Session;
use crate::student::{Roster, Student};

/// Maximum number of leaderboard entries.
pub const LEADERBOARD_SIZE: usize = 5;

/// A leaderboard entry: a student and their cumulative completed-session
/// duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub student: Student,
    pub total_seconds: i64,
}

/// One bucket of a distribution (course name or `"Year N"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBucket {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// Aggregated attendance statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceStats {
    /// Top students by cumulative duration, descending; at most
    /// [`LEADERBOARD_SIZE`] entries.
    pub leaderboard: Vec<LeaderboardEntry>,
    /// Completed sessions per course, sorted by count descending.
    pub by_course: Vec<DistributionBucket>,
    /// Completed sessions per year level, sorted by label. The sort is
    /// lexicographic on the "Year N" label, matching the original
    /// behavior ("Year 10" sorts before "Year 2").
    pub by_year: Vec<DistributionBucket>,
}

/// Aggregates reconstructed sessions into leaderboard and distributions.
///
/// Only completed sessions contribute: orphans add zero duration and are
/// excluded from the distribution counts. Course/year come from the
/// session's time-in snapshot. Leaderboard entries whose student no
/// longer exists in the roster are dropped.
pub fn aggregate(sessions: &[Session], roster: &Roster) -> AttendanceStats {
    let mut durations: HashMap<String, i64> = HashMap::new();
    let mut course_counts: HashMap<String, usize> = HashMap::new();
    let mut year_counts: HashMap<u32, usize> = HashMap::new();

    for session in sessions {
        let Some(duration) = session.duration_seconds() else {
            continue;
        };
        *durations.entry(session.student_id.key()).or_default() += duration;
        *course_counts.entry(session.student_course.clone()).or_default() += 1;
        *year_counts.entry(session.student_year).or_default() += 1;
    }

    let mut leaderboard: Vec<LeaderboardEntry> = durations
        .into_iter()
        .filter_map(|(key, total_seconds)| {
            roster.find(&key).map(|student| LeaderboardEntry {
                student: student.clone(),
                total_seconds,
            })
        })
        .collect();
    leaderboard.sort_by(|a, b| {
        b.total_seconds
            .cmp(&a.total_seconds)
            .then_with(|| a.student.name.cmp(&b.student.name))
    });
    leaderboard.truncate(LEADERBOARD_SIZE);

    let course_total: usize = course_counts.values().sum();
    let mut by_course: Vec<DistributionBucket> = course_counts
        .into_iter()
        .map(|(label, count)| bucket(label, count, course_total))
        .collect();
    by_course.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

    let year_total: usize = year_counts.values().sum();
    let mut by_year: Vec<DistributionBucket> = year_counts
        .into_iter()
        .map(|(year, count)| bucket(format!("Year {year}"), count, year_total))
        .collect();
    by_year.sort_by(|a, b| a.label.cmp(&b.label));

    AttendanceStats {
        leaderboard,
        by_course,
        by_year,
    }
}

#[allow(clippy::cast_precision_loss)]
fn bucket(label: String, count: usize, total: usize) -> DistributionBucket {
    let percentage = if total > 0 {
        100.0 * count as f64 / total as f64
    } else {
        0.0
    };
    DistributionBucket {
        label,
        count,
        percentage,
    }
}
