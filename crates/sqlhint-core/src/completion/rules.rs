//! Ordered decision table mapping a [`CompletionContext`] to a candidate source.
//!
//! Several predicates overlap, so evaluation order is part of the contract: the
//! first rule whose predicate holds wins. When none applies the reserved
//! keyword list is offered.

use crate::types::{CandidateSourceKind, ClauseKeyword, CompletionContext};

/// Where the candidates for a request come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// The reserved keyword phrase list.
    Keywords,
    /// Every table, qualified when outside the default schema.
    Tables,
    /// Columns of the tables the statement references.
    Columns,
    /// Statement columns followed by the builtin functions.
    ColumnsAndFunctions,
    /// A fixed list of follow-up keywords.
    Fixed(&'static [&'static str]),
    /// `SET` followed by every table.
    SetAndTables,
    /// A single literal token, surfaced as a one-element list.
    Literal(&'static str),
    /// Nothing to suggest.
    Empty,
}

impl CandidateSource {
    pub fn kind(&self) -> CandidateSourceKind {
        match self {
            Self::Keywords => CandidateSourceKind::Keywords,
            Self::Tables => CandidateSourceKind::Tables,
            Self::Columns => CandidateSourceKind::Columns,
            Self::ColumnsAndFunctions => CandidateSourceKind::ColumnsAndFunctions,
            Self::Fixed(_) => CandidateSourceKind::Fixed,
            Self::SetAndTables => CandidateSourceKind::SetAndTables,
            Self::Literal(_) => CandidateSourceKind::Literal,
            Self::Empty => CandidateSourceKind::Empty,
        }
    }
}

/// One row of the decision table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&CompletionContext) -> bool,
    pub source: CandidateSource,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("source", &self.source)
            .finish()
    }
}

const FROM: &[&str] = &["FROM"];
const BY: &[&str] = &["BY"];
const INTO: &[&str] = &["INTO"];
const JOIN: &[&str] = &["JOIN"];

/// Rules in priority order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "select_expression_done",
        applies: select_expression_done,
        source: CandidateSource::Fixed(FROM),
    },
    Rule {
        name: "select_clause",
        applies: select_clause,
        source: CandidateSource::ColumnsAndFunctions,
    },
    Rule {
        name: "from_or_join_clause",
        applies: from_or_join_clause,
        source: CandidateSource::Tables,
    },
    Rule {
        name: "where_clause",
        applies: where_clause,
        source: CandidateSource::ColumnsAndFunctions,
    },
    Rule {
        name: "after_group",
        applies: after_group,
        source: CandidateSource::Fixed(BY),
    },
    Rule {
        name: "after_order",
        applies: after_order,
        source: CandidateSource::Fixed(BY),
    },
    Rule {
        name: "after_insert",
        applies: after_insert,
        source: CandidateSource::Fixed(INTO),
    },
    Rule {
        name: "after_update",
        applies: after_update,
        source: CandidateSource::Tables,
    },
    Rule {
        name: "update_clause",
        applies: update_clause,
        source: CandidateSource::SetAndTables,
    },
    Rule {
        name: "after_delete",
        applies: after_delete,
        source: CandidateSource::Fixed(FROM),
    },
    Rule {
        name: "after_distinct",
        applies: after_distinct,
        source: CandidateSource::Columns,
    },
    Rule {
        name: "distinct_clause",
        applies: distinct_clause,
        source: CandidateSource::ColumnsAndFunctions,
    },
    Rule {
        name: "group_or_order_clause",
        applies: group_or_order_clause,
        source: CandidateSource::Columns,
    },
    Rule {
        name: "having_clause",
        applies: having_clause,
        source: CandidateSource::ColumnsAndFunctions,
    },
    Rule {
        name: "set_clause",
        applies: set_clause,
        source: CandidateSource::Columns,
    },
    Rule {
        name: "after_values",
        applies: after_values,
        source: CandidateSource::Literal("("),
    },
    Rule {
        name: "values_clause",
        applies: values_clause,
        source: CandidateSource::Columns,
    },
    Rule {
        name: "after_join_qualifier",
        applies: after_join_qualifier,
        source: CandidateSource::Fixed(JOIN),
    },
    Rule {
        name: "numeric_clause",
        applies: numeric_clause,
        source: CandidateSource::Empty,
    },
];

/// A completed select expression followed by a space suggests `FROM`.
fn select_expression_done(ctx: &CompletionContext) -> bool {
    ctx.clause_is(ClauseKeyword::Select)
        && !ctx.is_preceding_comma
        && ctx.is_preceding_space
        && !ctx.previous_word_is("SELECT")
}

fn select_clause(ctx: &CompletionContext) -> bool {
    ctx.clause_is(ClauseKeyword::Select)
}

fn from_or_join_clause(ctx: &CompletionContext) -> bool {
    ctx.clause_is(ClauseKeyword::From) || ctx.clause_is(ClauseKeyword::Join)
}

fn where_clause(ctx: &CompletionContext) -> bool {
    ctx.clause_is(ClauseKeyword::Where)
}

fn after_group(ctx: &CompletionContext) -> bool {
    ctx.previous_word_is("GROUP")
}

fn after_order(ctx: &CompletionContext) -> bool {
    ctx.previous_word_is("ORDER")
}

fn after_insert(ctx: &CompletionContext) -> bool {
    ctx.previous_word_is("INSERT")
}

fn after_update(ctx: &CompletionContext) -> bool {
    ctx.previous_word_is("UPDATE")
}

fn update_clause(ctx: &CompletionContext) -> bool {
    ctx.clause_is(ClauseKeyword::Update)
}

fn after_delete(ctx: &CompletionContext) -> bool {
    ctx.previous_word_is("DELETE")
}

fn after_distinct(ctx: &CompletionContext) -> bool {
    ctx.previous_word_is("DISTINCT")
}

fn distinct_clause(ctx: &CompletionContext) -> bool {
    ctx.clause_is(ClauseKeyword::Distinct)
}

fn group_or_order_clause(ctx: &CompletionContext) -> bool {
    ctx.clause_is(ClauseKeyword::Group) || ctx.clause_is(ClauseKeyword::Order)
}

fn having_clause(ctx: &CompletionContext) -> bool {
    ctx.clause_is(ClauseKeyword::Having)
}

fn set_clause(ctx: &CompletionContext) -> bool {
    ctx.clause_is(ClauseKeyword::Set)
}

fn after_values(ctx: &CompletionContext) -> bool {
    ctx.previous_word_is("VALUES")
}

fn values_clause(ctx: &CompletionContext) -> bool {
    ctx.clause_is(ClauseKeyword::Values)
}

fn after_join_qualifier(ctx: &CompletionContext) -> bool {
    matches!(
        ctx.previous_word.as_str(),
        "INNER" | "LEFT" | "RIGHT" | "FULL"
    )
}

/// The `DISTINCT` arm never fires: `distinct_clause` matches first.
fn numeric_clause(ctx: &CompletionContext) -> bool {
    ctx.clause_is(ClauseKeyword::Distinct)
        || ctx.clause_is(ClauseKeyword::Limit)
        || ctx.clause_is(ClauseKeyword::Offset)
}

/// First rule that applies to `ctx`, if any.
pub fn matching_rule(ctx: &CompletionContext) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.applies)(ctx))
}

pub fn classify(ctx: &CompletionContext) -> CandidateSource {
    matching_rule(ctx)
        .map(|rule| rule.source)
        .unwrap_or(CandidateSource::Keywords)
}
