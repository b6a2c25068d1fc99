//! Application state loaded from the store at startup.

use rollcall_core::{AttendanceRecord, Roster, Student, StudentId};
use rollcall_db::{Store, StoreError};

/// The roster and attendance log for one invocation.
///
/// Loaded once at startup and written back after mutations. Corrupt or
/// missing roster data falls back to the seed roster so a first run (or
/// a damaged store) still yields a usable application.
#[derive(Debug)]
pub struct AppState {
    pub roster: Roster,
    /// Attendance log, newest first.
    pub records: Vec<AttendanceRecord>,
}

impl AppState {
    /// Loads roster and records from the store.
    ///
    /// A store that has never been written gets the seed roster and an
    /// empty log. Corrupt JSON is logged and treated the same way.
    pub fn load(store: &Store) -> Self {
        let roster = match store.load_roster() {
            Ok(Some(students)) => Roster::from_students(students),
            Ok(None) => seed_roster(),
            Err(error) => {
                tracing::warn!(%error, "roster data unreadable, falling back to seed roster");
                seed_roster()
            }
        };
        let records = match store.load_records() {
            Ok(Some(records)) => records,
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "attendance log unreadable, starting empty");
                Vec::new()
            }
        };
        Self { roster, records }
    }

    /// Writes the roster back to the store. Failures are logged, not fatal.
    pub fn persist_roster(&self, store: &Store) {
        if let Err(error) = store.save_roster(self.roster.students()) {
            tracing::warn!(%error, "failed to persist roster");
        }
    }

    /// Writes the attendance log back to the store. Failures are logged, not fatal.
    pub fn persist_records(&self, store: &Store) {
        if let Err(error) = store.save_records(&self.records) {
            tracing::warn!(%error, "failed to persist attendance log");
        }
    }
}

/// Resets the store to the seed roster and an empty log.
pub fn reset(store: &Store) -> Result<AppState, StoreError> {
    store.clear()?;
    let state = AppState {
        roster: seed_roster(),
        records: Vec::new(),
    };
    store.save_roster(state.roster.students())?;
    store.save_records(&state.records)?;
    Ok(state)
}

fn seed_student(id: &str, name: &str, seed: &str, course: &str, year: u32, block: &str) -> Student {
    Student {
        id: StudentId::new(id).expect("seed IDs are non-empty"),
        name: name.to_string(),
        course: course.to_string(),
        year,
        block: block.to_string(),
        avatar_url: format!("https://picsum.photos/seed/{seed}/100"),
    }
}

/// The demo roster a fresh installation starts with.
pub fn seed_roster() -> Roster {
    Roster::from_students(vec![
        seed_student("STU-001", "Alice Johnson", "alice", "BS in Computer Science", 3, "A"),
        seed_student("STU-002", "Bob Williams", "bob", "BS in Information Technology", 2, "B"),
        seed_student("STU-003", "Charlie Brown", "charlie", "BS in Computer Engineering", 4, "A"),
        seed_student("STU-004", "Diana Miller", "diana", "BS in Computer Science", 3, "C"),
        seed_student("STU-005", "Ethan Davis", "ethan", "BS in Information Systems", 1, "D"),
        seed_student("STU-006", "Fiona Garcia", "fiona", "BS in Information Technology", 2, "B"),
        seed_student("STU-007", "George Rodriguez", "george", "BS in Computer Science", 4, "A"),
        seed_student("STU-008", "Hannah Martinez", "hannah", "BS in Computer Engineering", 1, "C"),
    ])
}
