//! Core domain logic for the rollcall attendance tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Recording: toggling time-in/time-out scans against the roster
//! - Session reconstruction: pairing in/out events into sessions
//! - Aggregation: leaderboard and course/year distributions
//! - Filtering: log queries by text and live status

pub mod event;
pub mod export;
pub mod filter;
pub mod presence;
pub mod record;
pub mod report;
pub mod session;
pub mod student;
pub mod types;

pub use event::{AttendanceRecord, AttendanceStatus, UnknownStatus};
pub use export::{EXPORT_COLUMNS, ExportError, SessionRow, session_rows};
pub use filter::{StatusFilter, filter_log};
pub use presence::{Presence, latest_status_by_student, presence, timed_in_count};
pub use record::{ScanError, ScanOutcome, record_scan};
pub use report::{AttendanceStats, DistributionBucket, LeaderboardEntry, aggregate};
pub use session::{Session, reconstruct};
pub use student::{MergeOutcome, NewStudent, Roster, RosterError, Student};
pub use types::{StudentId, ValidationError};
