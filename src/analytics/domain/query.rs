//! Candidate query text and its sanitization and formatting helpers.

use serde::{Deserialize, Serialize};

/// Raw query text produced by one synthesis attempt.
///
/// Ephemeral: a candidate lives for a single retry-loop iteration and is
/// discarded when its execution fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateQuery {
    text: String,
    attempt_number: u32,
}

impl CandidateQuery {
    /// Creates a candidate from raw model output.
    #[must_use]
    pub fn new(text: impl Into<String>, attempt_number: u32) -> Self {
        Self {
            text: text.into(),
            attempt_number,
        }
    }

    /// Returns the raw model output, fences and all.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the zero-based synthesis attempt that produced this query.
    #[must_use]
    pub const fn attempt_number(&self) -> u32 {
        self.attempt_number
    }

    /// Returns the query text with surrounding markdown code fences removed.
    #[must_use]
    pub fn sanitized(&self) -> String {
        strip_code_fences(&self.text)
    }
}

/// Strips a surrounding markdown code fence (```` ```sql … ``` ````) from
/// raw model output.
///
/// The synthesis prompt asks for bare SQL but models routinely wrap it in a
/// fenced block anyway, so sanitization is mandatory before execution. The
/// operation is idempotent: already-bare text comes back unchanged.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix("```").map_or(trimmed, |rest| {
        // Drop the language tag on the opening fence line, if present.
        rest.split_once('\n').map_or(rest, |(_, inner)| inner)
    });
    let tail_trimmed = body.trim_end();
    let inner = tail_trimmed.strip_suffix("```").unwrap_or(tail_trimmed);
    inner.trim().to_owned()
}

/// SQL keywords upper-cased during canonical reformatting.
const KEYWORDS: &[&str] = &[
    "select", "from", "where", "group", "by", "order", "having", "limit", "join", "left", "right",
    "inner", "full", "cross", "outer", "on", "as", "and", "or", "not", "in", "is", "null", "like",
    "between", "distinct", "count", "sum", "avg", "min", "max", "case", "when", "then", "else",
    "end", "union", "all", "desc", "asc", "with", "cast", "extract", "interval", "date",
    "timestamp", "current_date", "current_timestamp",
];

/// Keywords that continue a JOIN clause rather than opening a new one.
const JOIN_QUALIFIERS: &[&str] = &["LEFT", "RIGHT", "INNER", "FULL", "CROSS", "OUTER"];

/// Reformats an executed query for display: keywords upper-cased, one
/// clause per line.
///
/// This is a display canonicalization for the answer prompt and the chat
/// surface, not a parser; string literals are preserved verbatim.
#[must_use]
pub fn format_sql(sql: &str) -> String {
    let mut out = String::new();
    let mut previous_upper: Option<String> = None;
    for token in tokenize(sql) {
        let rendered = if token.starts_with('\'') {
            token
        } else {
            uppercase_if_keyword(&token)
        };
        let upper = rendered.to_ascii_uppercase();
        if out.is_empty() {
            out.push_str(&rendered);
        } else if starts_clause(&upper, previous_upper.as_deref()) {
            out.push('\n');
            out.push_str(&rendered);
        } else {
            out.push(' ');
            out.push_str(&rendered);
        }
        previous_upper = Some(upper);
    }
    out
}

/// Splits query text on whitespace while keeping single-quoted string
/// literals intact.
fn tokenize(sql: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    for ch in sql.chars() {
        if in_string {
            current.push(ch);
            if ch == '\'' {
                in_string = false;
            }
        } else if ch == '\'' {
            current.push(ch);
            in_string = true;
        } else if ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn uppercase_if_keyword(token: &str) -> String {
    let lowered = token.to_ascii_lowercase();
    if KEYWORDS.contains(&lowered.as_str()) {
        token.to_ascii_uppercase()
    } else {
        token.to_owned()
    }
}

/// Whether a token opens a new clause line in the canonical rendering.
fn starts_clause(token: &str, previous: Option<&str>) -> bool {
    match token {
        "FROM" | "WHERE" | "GROUP" | "ORDER" | "HAVING" | "LIMIT" | "UNION" | "LEFT" | "RIGHT"
        | "INNER" | "FULL" | "CROSS" => true,
        "JOIN" => previous.is_none_or(|prior| !JOIN_QUALIFIERS.contains(&prior)),
        _ => false,
    }
}
