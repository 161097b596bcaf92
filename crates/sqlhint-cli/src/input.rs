//! Input handling for SQL text and cursor placement.

use anyhow::{bail, Context, Result};
use std::io::{self, Read};
use std::path::Path;

/// Character that marks the cursor when `--marker` is given.
pub const CURSOR_MARKER: char = '|';

/// SQL text read from the command line, a file or stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlInput {
    pub name: String,
    pub content: String,
}

/// Read SQL from `--sql`, a file, or stdin, in that order of preference.
///
/// One trailing line ending is dropped from file and stdin input so the
/// default cursor sits right after the last character typed.
pub fn read_input(file: Option<&Path>, inline: Option<&str>) -> Result<SqlInput> {
    if let Some(sql) = inline {
        return Ok(SqlInput {
            name: "<arg>".to_string(),
            content: sql.to_string(),
        });
    }

    let (name, content) = match file {
        Some(path) => (path.display().to_string(), read_from_file(path)?),
        None => ("<stdin>".to_string(), read_from_stdin()?),
    };

    Ok(SqlInput {
        name,
        content: strip_line_ending(content),
    })
}

fn read_from_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;
    Ok(content)
}

fn read_from_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

fn strip_line_ending(mut content: String) -> String {
    if content.ends_with('\n') {
        content.pop();
        if content.ends_with('\r') {
            content.pop();
        }
    }
    content
}

/// Resolve the cursor for `content`, returning the text to complete and the
/// byte offset.
///
/// With `marker` the first [`CURSOR_MARKER`] is removed and its position is the
/// cursor. Otherwise `cursor` is used as-is, defaulting to the end of the text.
/// Range checks are left to the engine.
pub fn resolve_cursor(
    content: String,
    cursor: Option<usize>,
    marker: bool,
) -> Result<(String, usize)> {
    if !marker {
        let offset = cursor.unwrap_or(content.len());
        return Ok((content, offset));
    }

    let Some(offset) = content.find(CURSOR_MARKER) else {
        bail!("No cursor marker '{CURSOR_MARKER}' found in input");
    };
    let mut sql = content;
    sql.remove(offset);
    Ok((sql, offset))
}
