/// Scope token that routes a query to the documentation content search path.
pub const CONTENT_SEARCH_TYPE_PREFIX: &str = "content";

/// Separator between a scope token and the searched text.
pub const SCOPE_DELIMITER: char = ':';

/// Query used when the caller supplies none.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Text starting with `content`; searched against documentation content.
    Content,
    /// Any other `<scope>:<text>`; searched against API metadata.
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedQuery {
    /// The query as dispatched upstream, prefix included.
    pub text: String,
    pub kind: QueryKind,
}

impl ClassifiedQuery {
    /// Scope token before the first delimiter, e.g. `content` or `name`.
    pub fn scope(&self) -> &str {
        split_scope(&self.text).map(|(s, _)| s).unwrap_or("")
    }

    /// Searched text after the first delimiter.
    pub fn term(&self) -> &str {
        split_scope(&self.text).map(|(_, t)| t).unwrap_or(&self.text)
    }
}

/// Apply the wildcard default and tag unscoped queries as content queries.
/// - `None` or an empty string becomes `*`.
/// - A query without `:` is rewritten to `content:<query>`.
/// - A query that already carries `:` is kept verbatim.
/// - Any text starting with `content` is a content query, so
///   `contentType:json` is searched as content too.
pub fn classify(input: Option<&str>) -> ClassifiedQuery {
    let raw = match input {
        Some(q) if !q.is_empty() => q,
        _ => WILDCARD,
    };
    let text = if raw.contains(SCOPE_DELIMITER) {
        raw.to_string()
    } else {
        format!("{}{}{}", CONTENT_SEARCH_TYPE_PREFIX, SCOPE_DELIMITER, raw)
    };
    let kind = if text.starts_with(CONTENT_SEARCH_TYPE_PREFIX) {
        QueryKind::Content
    } else {
        QueryKind::General
    };
    ClassifiedQuery { text, kind }
}

/// Split `scope:term` at the first delimiter. Surrounding quotes on the term
/// are stripped; the scope is returned as written.
pub fn split_scope(input: &str) -> Option<(&str, &str)> {
    input
        .split_once(SCOPE_DELIMITER)
        .map(|(scope, term)| (scope, strip_quotes(term.trim())))
}

fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}
