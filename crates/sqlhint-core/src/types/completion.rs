use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Span;

/// A single-word keyword that opens a statement section.
///
/// Clause location only ever yields the first fourteen variants. `Values` and
/// `Offset` are referenced by the classifier but never located, so the rules
/// keyed on them as a clause never fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClauseKeyword {
    Select,
    From,
    Where,
    Group,
    Order,
    Having,
    Insert,
    Update,
    Delete,
    Join,
    On,
    Limit,
    Distinct,
    Set,
    Values,
    Offset,
}

impl ClauseKeyword {
    /// Keywords recognized when scanning backwards for the enclosing clause.
    pub const LOCATABLE: [ClauseKeyword; 14] = [
        Self::Select,
        Self::From,
        Self::Where,
        Self::Group,
        Self::Order,
        Self::Having,
        Self::Insert,
        Self::Update,
        Self::Delete,
        Self::Join,
        Self::On,
        Self::Limit,
        Self::Distinct,
        Self::Set,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::Order => "ORDER",
            Self::Having => "HAVING",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Join => "JOIN",
            Self::On => "ON",
            Self::Limit => "LIMIT",
            Self::Distinct => "DISTINCT",
            Self::Set => "SET",
            Self::Values => "VALUES",
            Self::Offset => "OFFSET",
        }
    }

    /// Case-insensitive lookup restricted to [`Self::LOCATABLE`].
    ///
    /// Folds with Unicode uppercasing, the same as the context's previous word.
    pub fn parse(token: &str) -> Option<Self> {
        let upper = token.to_uppercase();
        Self::LOCATABLE
            .iter()
            .copied()
            .find(|keyword| keyword.as_str() == upper)
    }
}

impl std::fmt::Display for ClauseKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the classifier knows about the cursor position.
///
/// Built fresh for every request from the text before the cursor and
/// discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionContext {
    /// Tokens preceding the cursor, case preserved
    pub tokens: Vec<String>,
    /// Most recent clause keyword before the cursor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause: Option<ClauseKeyword>,
    /// Uppercased token before the completing position
    pub previous_word: String,
    /// Partial token under the cursor, empty unless mid-word
    pub current_completing: String,
    pub is_preceding_comma: bool,
    pub is_preceding_space: bool,
    pub is_completing_word: bool,
}

impl CompletionContext {
    pub fn clause_is(&self, keyword: ClauseKeyword) -> bool {
        self.clause == Some(keyword)
    }

    pub fn previous_word_is(&self, word: &str) -> bool {
        self.previous_word == word
    }
}

/// Category of candidates the classifier selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CandidateSourceKind {
    Keywords,
    Tables,
    Columns,
    ColumnsAndFunctions,
    Fixed,
    SetAndTables,
    Literal,
    Empty,
}

/// Host-facing completion outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    pub candidates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<CandidateSourceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause: Option<ClauseKeyword>,
    /// Span a chosen candidate replaces
    pub replacement: Span,
    /// Error message if the request could not be processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompletionResult {
    pub fn empty(replacement: Span) -> Self {
        Self {
            candidates: Vec::new(),
            source: None,
            clause: None,
            replacement,
            error: None,
        }
    }

    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            candidates: Vec::new(),
            source: None,
            clause: None,
            replacement: Span::new(0, 0),
            error: Some(message.into()),
        }
    }
}
