//! SQL completion module.
//!
//! A request flows through three stages:
//!
//! 1. [`tokenizer`]: split the text before the cursor and recover the enclosing
//!    clause keyword into a [`CompletionContext`].
//! 2. [`rules`]: pick a [`CandidateSource`] from an ordered decision table.
//! 3. [`candidates`] and [`filter`]: materialize the source against the schema
//!    provider and narrow it to the partial word under the cursor.

pub mod candidates;
pub mod filter;
pub mod rules;
mod span;
pub mod tokenizer;

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::schema::{SchemaProvider, SchemaSession};
use crate::types::{CompletionContext, CompletionRequest, CompletionResult};

pub use candidates::{BUILTIN_FUNCTIONS, RESERVED_KEYWORDS};
pub use filter::filter_and_sort;
pub use rules::{classify, matching_rule, CandidateSource, Rule, RULES};
pub use span::replacement_span;
pub use tokenizer::{build_context, locate_clause_keyword, tokenize};

/// Builds the classifier context for a request without consulting any schema.
#[must_use]
pub fn completion_context(request: &CompletionRequest) -> CompletionContext {
    build_context(&request.sql, request.cursor_offset)
}

/// Completion candidates for the cursor at `cursor_offset` in `sql`.
///
/// Never fails: schema lookups that error contribute nothing, and offsets past
/// the end of `sql` are treated as the end.
#[must_use]
pub fn get_completions(provider: &dyn SchemaProvider, sql: &str, cursor_offset: usize) -> Vec<String> {
    let context = build_context(sql, cursor_offset);
    run(provider, sql, &context).0
}

fn run(
    provider: &dyn SchemaProvider,
    sql: &str,
    context: &CompletionContext,
) -> (Vec<String>, CandidateSource) {
    let rule = matching_rule(context);
    let source = rule.map(|rule| rule.source).unwrap_or(CandidateSource::Keywords);

    #[cfg(feature = "tracing")]
    debug!(
        rule = rule.map(|rule| rule.name).unwrap_or("default_keywords"),
        source = ?source.kind(),
        clause = ?context.clause,
        previous_word = %context.previous_word,
        "classified completion context"
    );

    let candidates = candidates::generate(source, provider, sql);
    (filter_and_sort(candidates, context), source)
}

/// Host-facing entry point.
///
/// Validates the request, computes the replacement span and, when a schema
/// session is active, the candidates. Without a session the candidate list is
/// empty. Invalid requests produce a result with `error` set.
#[must_use]
pub fn complete(session: Option<&SchemaSession>, request: &CompletionRequest) -> CompletionResult {
    let sql = request.sql.as_str();
    let sql_len = sql.len();

    let max_len = request.max_sql_length();
    if sql_len > max_len {
        return CompletionResult::from_error(format!(
            "SQL exceeds maximum length of {max_len} bytes ({sql_len} bytes provided)"
        ));
    }

    if request.cursor_offset > sql_len {
        return CompletionResult::from_error(format!(
            "cursor_offset ({}) exceeds SQL length ({sql_len})",
            request.cursor_offset
        ));
    }
    if !sql.is_char_boundary(request.cursor_offset) {
        return CompletionResult::from_error(format!(
            "cursor_offset ({}) does not land on a valid UTF-8 character boundary",
            request.cursor_offset
        ));
    }

    let context = completion_context(request);
    let replacement = replacement_span(sql, request.cursor_offset);

    let Some(session) = session else {
        return CompletionResult {
            clause: context.clause,
            ..CompletionResult::empty(replacement)
        };
    };

    let (candidates, source) = run(session.provider(), sql, &context);

    CompletionResult {
        candidates,
        source: Some(source.kind()),
        clause: context.clause,
        replacement,
        error: None,
    }
}
