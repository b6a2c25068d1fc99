//! Report command: leaderboard and distribution rendering.

use std::io::Write;

use anyhow::Result;
use rollcall_core::{AttendanceStats, DistributionBucket, aggregate, reconstruct};

use crate::state::AppState;

/// Formats a second count as `HH:MM:SS`. Negative counts clamp to zero.
pub fn format_duration(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn write_distribution<W: Write>(
    writer: &mut W,
    title: &str,
    buckets: &[DistributionBucket],
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{title}")?;
    if buckets.is_empty() {
        writeln!(writer, "  (no completed sessions)")?;
        return Ok(());
    }
    for bucket in buckets {
        writeln!(
            writer,
            "  {:<32} {:>4} ({:.1}%)",
            bucket.label, bucket.count, bucket.percentage
        )?;
    }
    Ok(())
}

fn write_stats<W: Write>(writer: &mut W, stats: &AttendanceStats) -> Result<()> {
    writeln!(writer, "STUDENT LEADERBOARD")?;
    if stats.leaderboard.is_empty() {
        writeln!(writer, "  (no completed sessions)")?;
    }
    for (rank, entry) in stats.leaderboard.iter().enumerate() {
        writeln!(
            writer,
            "  {}. {:<24} {}",
            rank + 1,
            entry.student.name,
            format_duration(entry.total_seconds)
        )?;
    }

    write_distribution(writer, "SESSIONS BY COURSE", &stats.by_course)?;
    write_distribution(writer, "SESSIONS BY YEAR", &stats.by_year)?;
    Ok(())
}

pub fn run<W: Write>(writer: &mut W, state: &AppState, json: bool) -> Result<()> {
    let sessions = reconstruct(&state.records);
    let stats = aggregate(&sessions, &state.roster);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&stats)?)?;
    } else {
        write_stats(writer, &stats)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use insta::assert_snapshot;
    use rollcall_core::record_scan;

    use crate::state;

    #[test]
    fn duration_renders_zero_padded() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(5400), "01:30:00");
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(-5), "00:00:00");
    }

    #[test]
    fn report_ranks_students_by_completed_time() {
        let mut app = AppState {
            roster: state::seed_roster(),
            records: Vec::new(),
        };
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        // Alice: 90 minutes. Bob: 30 minutes. Charlie: open session.
        for (id, offset) in [("STU-001", 0), ("STU-002", 0), ("STU-002", 30), ("STU-001", 90)] {
            record_scan(
                &app.roster,
                &mut app.records,
                id,
                base + chrono::Duration::minutes(offset),
            )
            .unwrap();
        }
        record_scan(&app.roster, &mut app.records, "STU-003", base).unwrap();

        let mut output = Vec::new();
        run(&mut output, &app, false).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert_snapshot!(output, @r"
        STUDENT LEADERBOARD
          1. Alice Johnson            01:30:00
          2. Bob Williams             00:30:00

        SESSIONS BY COURSE
          BS in Computer Science              1 (50.0%)
          BS in Information Technology        1 (50.0%)

        SESSIONS BY YEAR
          Year 2                              1 (50.0%)
          Year 3                              1 (50.0%)
        ");
    }

    #[test]
    fn report_json_serializes_stats() {
        let mut app = AppState {
            roster: state::seed_roster(),
            records: Vec::new(),
        };
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        record_scan(&app.roster, &mut app.records, "STU-001", base).unwrap();
        record_scan(
            &app.roster,
            &mut app.records,
            "STU-001",
            base + chrono::Duration::hours(1),
        )
        .unwrap();

        let mut output = Vec::new();
        run(&mut output, &app, true).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed["leaderboard"][0]["total_seconds"], 3600);
        assert_eq!(parsed["by_course"][0]["count"], 1);
    }

    #[test]
    fn report_with_no_sessions_prints_placeholders() {
        let app = AppState {
            roster: state::seed_roster(),
            records: Vec::new(),
        };
        let mut output = Vec::new();
        run(&mut output, &app, false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("(no completed sessions)").count(), 3);
    }
}
