//! Session export to an xlsx workbook.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rollcall_core::{EXPORT_COLUMNS, SessionRow, StatusFilter, filter_log, session_rows};
use rust_xlsxwriter::{Color, Format, Workbook};

use crate::state::AppState;

/// Column widths matching the sheet layout: name and course get room,
/// the date/time columns stay narrow.
const COLUMN_WIDTHS: [f64; 7] = [25.0, 30.0, 8.0, 8.0, 12.0, 12.0, 12.0];

pub fn run<W: Write>(
    writer: &mut W,
    state: &AppState,
    file: &Path,
    search: &str,
    status: StatusFilter,
) -> Result<()> {
    let filtered = filter_log(&state.records, search, status);
    // Fails before the output file is created or truncated.
    let rows = session_rows(&filtered)?;

    write_workbook(file, &rows)
        .with_context(|| format!("failed to write {}", file.display()))?;
    writeln!(writer, "Exported {} sessions to {}.", rows.len(), file.display())?;
    Ok(())
}

fn write_workbook(file: &Path, rows: &[SessionRow]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance Sessions")?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x2F75B5));
    for (col, header) in EXPORT_COLUMNS.iter().enumerate() {
        let col = u16::try_from(col)?;
        worksheet.write_with_format(0, col, *header, &header_format)?;
        worksheet.set_column_width(col, COLUMN_WIDTHS[usize::from(col)])?;
    }

    for (index, session) in rows.iter().enumerate() {
        let row = u32::try_from(index + 1)?;
        worksheet.write(row, 0, session.name.as_str())?;
        worksheet.write(row, 1, session.course.as_str())?;
        worksheet.write(row, 2, session.year)?;
        worksheet.write(row, 3, session.block.as_str())?;
        worksheet.write(row, 4, session.date.as_str())?;
        worksheet.write(row, 5, session.time_in.as_str())?;
        worksheet.write(row, 6, session.time_out.as_str())?;
    }

    workbook.save(file)?;
    Ok(())
}
