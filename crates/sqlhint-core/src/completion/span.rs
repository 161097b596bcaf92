use crate::types::Span;

use super::tokenizer::clamp_to_char_boundary;

/// Span of text a chosen completion replaces.
///
/// The span ends at the cursor and starts after the last space before it, so
/// the whole trailing run of non-space characters is replaced. Only the space
/// character ends the run; tabs and newlines are part of it.
pub fn replacement_span(sql: &str, cursor_offset: usize) -> Span {
    let end = clamp_to_char_boundary(sql, cursor_offset);
    let start = sql[..end].rfind(' ').map(|index| index + 1).unwrap_or(0);
    Span::new(start, end)
}
