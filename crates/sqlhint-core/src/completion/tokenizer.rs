//! Flat tokenization of the text before the cursor and clause recovery.
//!
//! This is deliberately not a SQL lexer: there is no notion of string literals
//! or comments, so a quoted value containing spaces is split like any other
//! text.

use crate::types::{ClauseKeyword, CompletionContext};

/// Characters that separate tokens. They never appear inside a token.
const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', ';', '(', ')', ','];

/// Splits `text` into non-empty runs of non-delimiter characters, left to right.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|ch: char| DELIMITERS.contains(&ch))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Returns the rightmost token that is a clause keyword.
pub fn locate_clause_keyword<S: AsRef<str>>(tokens: &[S]) -> Option<ClauseKeyword> {
    tokens
        .iter()
        .rev()
        .find_map(|token| ClauseKeyword::parse(token.as_ref()))
}

/// Largest char boundary in `text` that is not past `offset`.
pub(crate) fn clamp_to_char_boundary(text: &str, offset: usize) -> usize {
    let mut cursor = offset.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

/// Builds the classifier input for a cursor at `cursor_offset` in `full_text`.
///
/// Offsets past the end are clamped to the end; offsets inside a multi-byte
/// character move back to its start.
pub fn build_context(full_text: &str, cursor_offset: usize) -> CompletionContext {
    let cursor = clamp_to_char_boundary(full_text, cursor_offset);
    let preceding = &full_text[..cursor];
    let tokens = tokenize(preceding);

    let clause = locate_clause_keyword(&tokens);
    let mut previous_word = tokens
        .last()
        .map(|token| token.to_uppercase())
        .unwrap_or_default();
    let is_preceding_comma = preceding.trim_end().ends_with(',');
    let is_preceding_space = preceding.ends_with(' ');
    let is_completing_word = preceding
        .chars()
        .next_back()
        .is_some_and(char::is_alphabetic);

    let mut current_completing = String::new();
    if is_completing_word {
        previous_word = match tokens.len() {
            len if len >= 2 => tokens[len - 2].to_uppercase(),
            _ => String::new(),
        };
        current_completing = tokens
            .last()
            .map(|token| token.to_string())
            .unwrap_or_default();
    }

    CompletionContext {
        tokens: tokens.into_iter().map(str::to_string).collect(),
        clause,
        previous_word,
        current_completing,
        is_preceding_comma,
        is_preceding_space,
        is_completing_word,
    }
}
