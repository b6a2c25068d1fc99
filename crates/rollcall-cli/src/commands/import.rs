//! Roster import from CSV files.
//!
//! The file must carry a header row with the columns `Student ID`,
//! `Student Name`, `Course`, `Year` and `Block`. The whole batch is
//! validated before the roster is touched: one bad row aborts the import.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rollcall_core::NewStudent;
use rollcall_db::Store;
use thiserror::Error;

use crate::state::AppState;

const REQUIRED_COLUMNS: [&str; 5] = ["Student ID", "Student Name", "Course", "Year", "Block"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The file is empty or misses required columns.
    #[error("invalid import format, required columns: Student ID, Student Name, Course, Year, Block")]
    InvalidFormat,

    /// A data row failed validation. Row numbers are 1-based file rows,
    /// so the first data row after the header is row 2.
    #[error("invalid or missing data in row {0}, all fields are required")]
    InvalidRow(usize),
}

pub fn run<W: Write>(
    writer: &mut W,
    state: &mut AppState,
    store: &Store,
    file: &Path,
) -> Result<()> {
    let reader = csv::Reader::from_path(file)
        .with_context(|| format!("failed to open {}", file.display()))?;
    let imports = parse_students(reader)?;

    let outcome = state.roster.merge(imports);
    state.persist_roster(store);
    writeln!(
        writer,
        "Import complete. {} added, {} updated.",
        outcome.added, outcome.updated
    )?;
    Ok(())
}

fn parse_students<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<NewStudent>> {
    let headers = reader.headers().map_err(|_| ImportError::InvalidFormat)?;
    let columns: Vec<usize> = REQUIRED_COLUMNS
        .iter()
        .map(|required| headers.iter().position(|h| h.trim() == *required))
        .collect::<Option<_>>()
        .ok_or(ImportError::InvalidFormat)?;

    let mut imports = Vec::new();
    for (index, row) in reader.records().enumerate() {
        // Header is row 1, so the first data row is row 2.
        let row_number = index + 2;
        let row = row.map_err(|_| ImportError::InvalidRow(row_number))?;
        let field = |i: usize| row.get(columns[i]).unwrap_or_default().trim();

        let year: u32 = field(3)
            .parse()
            .map_err(|_| ImportError::InvalidRow(row_number))?;
        let student = NewStudent::new(field(0), field(1), field(2), year, field(4))
            .map_err(|_| ImportError::InvalidRow(row_number))?;
        imports.push(student);
    }

    if imports.is_empty() {
        return Err(ImportError::InvalidFormat.into());
    }
    Ok(imports)
}
