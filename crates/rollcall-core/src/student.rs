//! The student roster.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{StudentId, ValidationError};

/// Roster mutation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// A student with the same ID (case-insensitively) already exists.
    #[error("student with ID \"{0}\" already exists")]
    DuplicateStudentId(String),

    /// No student with the given ID exists.
    #[error("student with ID \"{0}\" not found")]
    StudentNotFound(String),
}

/// A student in the roster.
///
/// Field names are camelCase on disk to match the persisted JSON of the
/// original log format (`avatarUrl` etc.).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub course: String,
    /// Year level, always >= 1.
    pub year: u32,
    pub block: String,
    pub avatar_url: String,
}

/// A student payload without a derived avatar, as entered in forms or
/// parsed from an import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub id: StudentId,
    pub name: String,
    pub course: String,
    pub year: u32,
    pub block: String,
}

impl NewStudent {
    /// Validates and builds a new-student payload.
    ///
    /// All text fields must be non-empty after trimming and the year must
    /// be a positive integer.
    pub fn new(
        id: &str,
        name: &str,
        course: &str,
        year: u32,
        block: &str,
    ) -> Result<Self, ValidationError> {
        let id = StudentId::new(id.trim())?;
        let name = non_empty(name, "student name")?;
        let course = non_empty(course, "course")?;
        let block = non_empty(block, "block")?;
        if year == 0 {
            return Err(ValidationError::InvalidYear {
                value: i64::from(year),
            });
        }
        Ok(Self {
            id,
            name,
            course,
            year,
            block,
        })
    }

    /// Promotes the payload to a full [`Student`] with a derived avatar.
    fn into_student(self) -> Student {
        let avatar_url = avatar_url_for(&self.id);
        Student {
            id: self.id,
            name: self.name,
            course: self.course,
            year: self.year,
            block: self.block,
            avatar_url,
        }
    }
}

fn non_empty(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_string())
}

/// Derives the avatar URL for a student ID.
pub fn avatar_url_for(id: &StudentId) -> String {
    format!("https://picsum.photos/seed/{id}/100")
}

/// Outcome of a batch import merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    pub added: usize,
    pub updated: usize,
}

/// The current collection of students, kept sorted by name.
///
/// Identity is the student ID, compared case-insensitively. The roster
/// owns its students; mutations go through [`Roster::add`],
/// [`Roster::update`], [`Roster::remove`] and [`Roster::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    /// Builds a roster from a persisted student list, restoring the
    /// name ordering.
    pub fn from_students(students: Vec<Student>) -> Self {
        let mut roster = Self { students };
        roster.sort();
        roster
    }

    /// Case-insensitive lookup by raw identifier.
    pub fn find(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id.matches(id))
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Adds a new student, rejecting case-insensitive ID collisions.
    pub fn add(&mut self, new: NewStudent) -> Result<&Student, RosterError> {
        if self.find(new.id.as_str()).is_some() {
            return Err(RosterError::DuplicateStudentId(new.id.to_string()));
        }
        let key = new.id.key();
        self.students.push(new.into_student());
        self.sort();
        // Just inserted, so the lookup cannot fail.
        Ok(self
            .students
            .iter()
            .find(|s| s.id.key() == key)
            .expect("student was just inserted"))
    }

    /// Replaces the entry with the same ID.
    pub fn update(&mut self, student: Student) -> Result<(), RosterError> {
        let Some(slot) = self
            .students
            .iter_mut()
            .find(|s| s.id.matches(student.id.as_str()))
        else {
            return Err(RosterError::StudentNotFound(student.id.to_string()));
        };
        *slot = student;
        self.sort();
        Ok(())
    }

    /// Removes the student with the given ID, returning it.
    pub fn remove(&mut self, id: &str) -> Result<Student, RosterError> {
        let Some(index) = self.students.iter().position(|s| s.id.matches(id)) else {
            return Err(RosterError::StudentNotFound(id.to_string()));
        };
        Ok(self.students.remove(index))
    }

    /// Merges a batch of imported students into the roster.
    ///
    /// Rows whose ID matches an existing entry (case-insensitively)
    /// update that entry in place, keeping its avatar; all other rows
    /// are added with a derived avatar. Returns added/updated counts.
    pub fn merge(&mut self, imports: Vec<NewStudent>) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        for import in imports {
            if let Some(existing) = self
                .students
                .iter_mut()
                .find(|s| s.id.matches(import.id.as_str()))
            {
                existing.id = import.id;
                existing.name = import.name;
                existing.course = import.course;
                existing.year = import.year;
                existing.block = import.block;
                outcome.updated += 1;
            } else {
                self.students.push(import.into_student());
                outcome.added += 1;
            }
        }
        self.sort();
        outcome
    }

    /// Display filter: free-text match on name or ID plus exact
    /// course/year/block filters. `None` means "all" for that dimension.
    pub fn filter(
        &self,
        query: &str,
        course: Option<&str>,
        year: Option<u32>,
        block: Option<&str>,
    ) -> Vec<&Student> {
        let needle = query.trim().to_lowercase();
        self.students
            .iter()
            .filter(|s| {
                let matches_query = needle.is_empty()
                    || s.name.to_lowercase().contains(&needle)
                    || s.id.key().contains(&needle);
                matches_query
                    && course.is_none_or(|c| s.course == c)
                    && year.is_none_or(|y| s.year == y)
                    && block.is_none_or(|b| s.block == b)
            })
            .collect()
    }

    fn sort(&mut self) {
        self.students
            .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.key().cmp(&b.id.key())));
    }
}
