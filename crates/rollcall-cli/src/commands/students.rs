//! Roster management commands.

use std::io::Write;

use anyhow::{Context, Result};
use rollcall_core::{NewStudent, Student};
use rollcall_db::Store;

use crate::state::AppState;

pub fn list<W: Write>(
    writer: &mut W,
    state: &AppState,
    search: &str,
    course: Option<&str>,
    year: Option<u32>,
    block: Option<&str>,
) -> Result<()> {
    let students = state.roster.filter(search, course, year, block);
    if students.is_empty() {
        if state.roster.is_empty() {
            writeln!(writer, "No students in the database.")?;
        } else {
            writeln!(writer, "No students match the current filters.")?;
        }
        return Ok(());
    }

    for student in students {
        writeln!(
            writer,
            "{:<10} {:<24} {:<32} Year {}  Block {}",
            student.id, student.name, student.course, student.year, student.block
        )?;
    }
    Ok(())
}

pub fn add<W: Write>(
    writer: &mut W,
    state: &mut AppState,
    store: &Store,
    id: &str,
    name: &str,
    course: &str,
    year: u32,
    block: &str,
) -> Result<()> {
    let new = NewStudent::new(id, name, course, year, block)?;
    let student = state.roster.add(new)?;
    let name = student.name.clone();
    state.persist_roster(store);
    writeln!(writer, "{name} added successfully!")?;
    Ok(())
}

pub fn edit<W: Write>(
    writer: &mut W,
    state: &mut AppState,
    store: &Store,
    id: &str,
    name: Option<&str>,
    course: Option<&str>,
    year: Option<u32>,
    block: Option<&str>,
) -> Result<()> {
    let current = state
        .roster
        .find(id)
        .with_context(|| format!("student with ID \"{id}\" not found"))?;

    // Unchanged fields are revalidated along with the edited ones.
    let merged = NewStudent::new(
        current.id.as_str(),
        name.unwrap_or(&current.name),
        course.unwrap_or(&current.course),
        year.unwrap_or(current.year),
        block.unwrap_or(&current.block),
    )?;
    let updated = Student {
        id: current.id.clone(),
        name: merged.name,
        course: merged.course,
        year: merged.year,
        block: merged.block,
        avatar_url: current.avatar_url.clone(),
    };
    let display_name = updated.name.clone();
    state.roster.update(updated)?;
    state.persist_roster(store);
    writeln!(writer, "{display_name}'s information updated.")?;
    Ok(())
}

pub fn remove<W: Write>(
    writer: &mut W,
    state: &mut AppState,
    store: &Store,
    id: &str,
) -> Result<()> {
    let removed = state.roster.remove(id)?;
    state.persist_roster(store);
    writeln!(writer, "{} removed from the roster.", removed.name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state;

    fn app() -> (AppState, Store) {
        let store = Store::open_in_memory().unwrap();
        let app = AppState {
            roster: state::seed_roster(),
            records: Vec::new(),
        };
        (app, store)
    }

    #[test]
    fn list_applies_filters() {
        let (app, _store) = app();
        let mut output = Vec::new();
        list(&mut output, &app, "", Some("BS in Computer Science"), None, None).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.lines().count(), 3);
        assert!(output.contains("Alice Johnson"));
        assert!(output.contains("Diana Miller"));
        assert!(output.contains("George Rodriguez"));
    }

    #[test]
    fn list_reports_empty_filter_results() {
        let (app, _store) = app();
        let mut output = Vec::new();
        list(&mut output, &app, "nobody", None, None, None).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No students match the current filters.\n"
        );
    }

    #[test]
    fn add_then_remove_round_trips_through_the_store() {
        let (mut app, store) = app();
        let mut output = Vec::new();
        add(
            &mut output,
            &mut app,
            &store,
            "STU-009",
            "Ivy Chen",
            "BS in Computer Science",
            2,
            "B",
        )
        .unwrap();
        assert!(AppState::load(&store).roster.find("STU-009").is_some());

        remove(&mut output, &mut app, &store, "stu-009").unwrap();
        assert!(AppState::load(&store).roster.find("STU-009").is_none());

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Ivy Chen added successfully!"));
        assert!(output.contains("Ivy Chen removed from the roster."));
    }

    #[test]
    fn add_duplicate_id_fails() {
        let (mut app, store) = app();
        let mut output = Vec::new();
        let err = add(
            &mut output,
            &mut app,
            &store,
            "stu-001",
            "Impostor",
            "BS in Computer Science",
            1,
            "A",
        )
        .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn edit_changes_only_requested_fields() {
        let (mut app, store) = app();
        let original_avatar = app.roster.find("STU-001").unwrap().avatar_url.clone();

        let mut output = Vec::new();
        edit(&mut output, &mut app, &store, "stu-001", None, None, Some(4), None).unwrap();

        let student = app.roster.find("STU-001").unwrap();
        assert_eq!(student.year, 4);
        assert_eq!(student.name, "Alice Johnson");
        assert_eq!(student.avatar_url, original_avatar);
        assert!(
            String::from_utf8(output)
                .unwrap()
                .contains("Alice Johnson's information updated.")
        );
    }

    #[test]
    fn edit_rejects_empty_name() {
        let (mut app, store) = app();
        let mut output = Vec::new();
        let err = edit(
            &mut output,
            &mut app,
            &store,
            "STU-001",
            Some("   "),
            None,
            None,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("student name"));
    }
}
