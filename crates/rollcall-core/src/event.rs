//! Attendance records - the append-only event log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::student::Student;
use crate::types::StudentId;

/// Error for unrecognized status strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown attendance status: {0}")]
pub struct UnknownStatus(pub String);

/// Whether a record marks an arrival or a departure.
///
/// Serialized with the original wire strings (`"Timed In"` / `"Timed Out"`)
/// so existing persisted logs load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "Timed In")]
    TimedIn,
    #[serde(rename = "Timed Out")]
    TimedOut,
}

impl AttendanceStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TimedIn => "Timed In",
            Self::TimedOut => "Timed Out",
        }
    }

    /// The status the next scan for this student should record.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::TimedIn => Self::TimedOut,
            Self::TimedOut => Self::TimedIn,
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Timed In" => Ok(Self::TimedIn),
            "Timed Out" => Ok(Self::TimedOut),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A single attendance event: an immutable, denormalized snapshot of the
/// student at the moment of the scan.
///
/// Snapshotting means later roster edits never retroactively alter
/// historical log entries. Records are append-only; the in-memory log is
/// kept newest-first and is only ever bulk-cleared on a full reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub student_id: StudentId,
    pub student_name: String,
    pub student_avatar_url: String,
    pub student_course: String,
    pub student_year: u32,
    pub student_block: String,
    pub status: AttendanceStatus,
    pub timestamp: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Builds a record snapshotting the student's current roster fields.
    pub fn snapshot(student: &Student, status: AttendanceStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            student_avatar_url: student.avatar_url.clone(),
            student_course: student.course.clone(),
            student_year: student.year,
            student_block: student.block.clone(),
            status,
            timestamp,
        }
    }
}
