//! Title extraction from requirement blobs.
//!
//! A blob usually carries the requirement statement followed by enumerated
//! sub-clauses or testing detail. The [`CutRule`] catalogue separates the two:
//! rules are tried in priority order, the first one that matches anywhere in
//! the text wins, and the text is cut at its last match. More specific phrases
//! come first so they are never shadowed by the generic colon rule.

use std::sync::LazyLock;

use regex::Regex;

use super::identifier::{token_len, Identifier};

/// Phrase rules absorb an optional comma and whitespace before the phrase and
/// only fire when the colon ends its line.
macro_rules! phrase {
    ($phrase:literal) => {
        concat!(r",?\s*\b", $phrase, r"[ \t]*\r?\n")
    };
}

/// Like `phrase!`, but the phrase may also be followed by more text on the
/// same line, or end the text.
macro_rules! inline_phrase {
    ($phrase:literal) => {
        concat!(r",?\s*\b", $phrase, r"(?:\s|$)")
    };
}

/// `(name, pattern)` in priority order.
const CATALOGUE: [(&str, &str); 15] = [
    (
        "including but not limited to failure of",
        inline_phrase!("including,? but not limited to failure of:"),
    ),
    (
        "including but not limited to",
        inline_phrase!("including,? but not limited to:"),
    ),
    (
        "including mechanisms that are",
        phrase!("including mechanisms that are:"),
    ),
    ("that meets the following", phrase!("that meets the following:")),
    ("code changes are", phrase!("code changes are:")),
    ("that includes", phrase!("that includes:")),
    ("and includes", phrase!("and includes:")),
    ("and include", phrase!("and include:")),
    ("as follows", phrase!("as follows:")),
    ("including", phrase!("including:")),
    ("such that", phrase!("such that:")),
    ("are", phrase!("are:")),
    ("is", phrase!("is:")),
    ("colon before line break", r":[ \t]*\r?\n"),
    ("cross-reference", r"\s*PCI DSS Reference:"),
];

static CUT_RULES: LazyLock<Vec<CutRule>> = LazyLock::new(|| {
    CATALOGUE
        .iter()
        .map(|&(name, pattern)| CutRule {
            name,
            pattern: Regex::new(pattern).expect("cut rule patterns are valid"),
        })
        .collect()
});

/// A heuristic marking where a requirement statement ends and its elaboration
/// begins.
#[derive(Debug)]
pub struct CutRule {
    name: &'static str,
    pattern: Regex,
}

impl CutRule {
    /// Short human-readable name of the transition phrase.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Byte offset of the last match in `text`.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<usize> {
        self.pattern.find_iter(text).last().map(|m| m.start())
    }
}

/// The cut rules, in the order they are evaluated.
#[must_use]
pub fn cut_rules() -> &'static [CutRule] {
    &CUT_RULES
}

/// Truncates `text` at the first cut rule that matches.
///
/// Returns the kept text and the rule that fired, or the whole text and
/// `None` when no rule matches.
#[must_use]
pub fn apply_cut_rules(text: &str) -> (&str, Option<&'static CutRule>) {
    cut_rules()
        .iter()
        .find_map(|rule| rule.find(text).map(|at| (&text[..at], Some(rule))))
        .unwrap_or((text, None))
}

/// Identifier and cleaned title parsed out of a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// The leading identifier, if the blob starts with one.
    pub identifier: Option<Identifier>,
    /// Single-line, whitespace-normalised title. May be empty.
    pub title: String,
}

/// Parses the identifier and title out of a raw blob.
///
/// ```
/// use control_tree::domain::title::extract;
///
/// let extracted = extract("2 Do the thing, including, but not limited to: sub-detail here");
/// assert_eq!(extracted.identifier.unwrap().to_string(), "2");
/// assert_eq!(extracted.title, "Do the thing");
/// ```
#[must_use]
pub fn extract(blob: &str) -> Extracted {
    let text = blob.trim();
    if text.is_empty() {
        return Extracted {
            identifier: None,
            title: String::new(),
        };
    }

    let (identifier, body) = match token_len(text) {
        Some(len) => (text[..len].trim_end().parse().ok(), &text[len..]),
        None => (None, text),
    };

    let (candidate, _) = apply_cut_rules(body);

    Extracted {
        identifier,
        title: clean(candidate),
    }
}

/// Collapses all whitespace (line breaks included) to single spaces and turns
/// a trailing comma into a full stop.
fn clean(text: &str) -> String {
    let mut cleaned = collapse_whitespace(text);
    if cleaned.ends_with(',') {
        cleaned.pop();
        cleaned.push('.');
    }
    cleaned
}

/// Joins the words of `text` with single spaces, trimming both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
