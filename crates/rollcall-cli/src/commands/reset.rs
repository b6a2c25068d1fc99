//! Reset command: wipe all data and reseed the roster.

use std::io::Write;

use anyhow::Result;
use rollcall_db::Store;

use crate::state::{AppState, reset};

pub fn run<W: Write>(writer: &mut W, store: &Store) -> Result<AppState> {
    let state = reset(store)?;
    writeln!(writer, "Data cleared successfully.")?;
    Ok(state)
}
