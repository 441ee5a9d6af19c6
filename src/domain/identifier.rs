use std::{fmt, ops::Deref, str::FromStr, sync::LazyLock};

use non_empty_string::NonEmptyString;
use nonempty::NonEmpty;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Leading identifier token: optional uppercase letter, dot-separated numeric
/// segments, then whitespace. Anchored at the start of the text.
static IDENTIFIER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]?[0-9]+(?:\.[0-9]+)*\s").expect("identifier token pattern is valid")
});

/// Returns the identifier token that `text` begins with, if any.
///
/// The token is returned without its trailing whitespace. Leading whitespace
/// or punctuation before the first character means there is no token.
///
/// This is the only place blob boundaries and node identifiers are decided,
/// so both the assembler and the title extractor go through it.
///
/// ```
/// use control_tree::domain::identifier::match_identifier;
///
/// assert_eq!(match_identifier("1.2.3 Some text"), Some("1.2.3"));
/// assert_eq!(match_identifier("A1.1 Appendix"), Some("A1.1"));
/// assert_eq!(match_identifier(" 1.2 indented"), None);
/// assert_eq!(match_identifier("1.2"), None);
/// ```
#[must_use]
pub fn match_identifier(text: &str) -> Option<&str> {
    token_len(text).map(|len| text[..len].trim_end())
}

/// Byte length of the leading identifier token, including the whitespace
/// character that terminates it.
pub(crate) fn token_len(text: &str) -> Option<usize> {
    IDENTIFIER_TOKEN.find(text).map(|m| m.end())
}

/// A validated string containing only ASCII digits (`[0-9]+`).
///
/// Stored as text so that leading zeros survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment(NonEmptyString);

impl Segment {
    /// Creates a new `Segment` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSegmentError` if the string is empty or contains
    /// characters other than ASCII digits.
    pub fn new(s: String) -> Result<Self, InvalidSegmentError> {
        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidSegmentError(s));
        }

        NonEmptyString::new(s).map(Self).map_err(InvalidSegmentError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Segment {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a segment doesn't match the required pattern `[0-9]+`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid identifier segment '{0}': must be non-empty and contain only digits (0-9)")]
pub struct InvalidSegmentError(String);

/// A hierarchical requirement identifier.
///
/// Format: `{PREFIX?}{SEGMENT}(.{SEGMENT})*`, where:
/// - `PREFIX` is an optional single uppercase letter (e.g. `A` for appendix
///   requirements)
/// - each `SEGMENT` is a run of ASCII digits
///
/// Examples: `1`, `1.1`, `12.10.7`, `A1.2.3`
///
/// The number of segments is the depth of the requirement in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    prefix: Option<char>,
    segments: NonEmpty<Segment>,
}

impl Identifier {
    /// Create an identifier from pre-validated parts.
    #[must_use]
    pub const fn new(prefix: Option<char>, segments: NonEmpty<Segment>) -> Self {
        Self { prefix, segments }
    }

    /// Returns the letter prefix, if present.
    #[must_use]
    pub const fn prefix(&self) -> Option<char> {
        self.prefix
    }

    /// Returns the numeric segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(Segment::as_str)
    }

    /// The number of segments, which is the depth of the identifier in the
    /// hierarchy (`1` → 1, `1.1` → 2, `A1.2.3` → 3).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The identifier one level up, with the last segment removed.
    ///
    /// Returns `None` for top-level identifiers.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let mut segments: Vec<Segment> = self.segments.iter().cloned().collect();
        segments.pop();
        NonEmpty::from_vec(segments).map(|segments| Self::new(self.prefix, segments))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(prefix) = self.prefix {
            write!(f, "{prefix}")?;
        }
        let joined = self.segments().collect::<Vec<_>>().join(".");
        write!(f, "{joined}")
    }
}

/// Errors that can occur during identifier parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The input was empty.
    #[error("Empty identifier")]
    Empty,

    /// Malformed structure (e.g. a prefix with no segments).
    #[error("Invalid identifier format: {0}")]
    Syntax(String),

    /// A segment was empty or not numeric.
    #[error(transparent)]
    Segment(#[from] InvalidSegmentError),
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(first) = s.chars().next() else {
            return Err(Error::Empty);
        };

        let (prefix, rest) = if first.is_ascii_uppercase() {
            (Some(first), &s[first.len_utf8()..])
        } else {
            (None, s)
        };

        if rest.is_empty() {
            return Err(Error::Syntax(s.to_string()));
        }

        let segments = rest
            .split('.')
            .map(|segment| Segment::new(segment.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        let segments = NonEmpty::from_vec(segments).ok_or_else(|| Error::Syntax(s.to_string()))?;

        Ok(Self::new(prefix, segments))
    }
}

impl TryFrom<&str> for Identifier {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl TryFrom<String> for Identifier {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Identifier> for String {
    fn from(identifier: Identifier) -> Self {
        identifier.to_string()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("1 Install controls", Some("1"); "single segment")]
    #[test_case("1.1 Firewall", Some("1.1"); "two segments")]
    #[test_case("12.10.7 Incident response", Some("12.10.7"); "multi digit segments")]
    #[test_case("A1.2.3 Appendix", Some("A1.2.3"); "letter prefix")]
    #[test_case("1.1\nDocumented", Some("1.1"); "newline terminated")]
    #[test_case("1.1\tTabbed", Some("1.1"); "tab terminated")]
    #[test_case("1.1", None; "no trailing whitespace")]
    #[test_case(" 1.1 Leading space", None; "leading whitespace")]
    #[test_case("(1.1) Parenthesised", None; "leading punctuation")]
    #[test_case("AB1 Two letters", None; "two letter prefix")]
    #[test_case("a1 Lowercase", None; "lowercase prefix")]
    #[test_case("1. Trailing dot", None; "trailing dot")]
    #[test_case("1.1.a Letter segment", None; "letter segment")]
    #[test_case("Requirements and Testing Procedures", None; "header text")]
    #[test_case("", None; "empty")]
    fn matches_identifier_token(text: &str, expected: Option<&str>) {
        assert_eq!(match_identifier(text), expected);
    }

    #[test]
    fn token_len_includes_terminating_whitespace() {
        assert_eq!(token_len("1.1 Firewall"), Some(4));
        assert_eq!(token_len("Firewall"), None);
    }

    #[test_case("1", None, &["1"]; "single")]
    #[test_case("1.2.3", None, &["1", "2", "3"]; "nested")]
    #[test_case("A1.2", Some('A'), &["1", "2"]; "prefixed")]
    #[test_case("01.002", None, &["01", "002"]; "leading zeros kept")]
    fn parses_valid_identifier(s: &str, prefix: Option<char>, segments: &[&str]) {
        let identifier = Identifier::from_str(s).unwrap();
        assert_eq!(identifier.prefix(), prefix);
        assert_eq!(identifier.segments().collect::<Vec<_>>(), segments);
        assert_eq!(identifier.depth(), segments.len());
        assert_eq!(identifier.to_string(), s);
    }

    #[test]
    fn parse_empty_fails() {
        assert_eq!(Identifier::from_str(""), Err(Error::Empty));
    }

    #[test]
    fn parse_prefix_only_fails() {
        assert!(matches!(Identifier::from_str("A"), Err(Error::Syntax(_))));
    }

    #[test_case("1..2"; "empty segment")]
    #[test_case("1.2."; "trailing dot")]
    #[test_case(".1"; "leading dot")]
    #[test_case("1.x"; "non numeric segment")]
    #[test_case("a1"; "lowercase prefix")]
    #[test_case("1 2"; "embedded space")]
    fn parse_invalid_segment_fails(s: &str) {
        assert!(matches!(Identifier::from_str(s), Err(Error::Segment(_))));
    }

    #[test]
    fn matched_tokens_always_parse() {
        for text in ["1 a", "1.1 b", "A1.1.1 c", "12.10.7\nd"] {
            let token = match_identifier(text).unwrap();
            assert!(Identifier::try_from(token).is_ok(), "{token} should parse");
        }
    }

    #[test]
    fn parent_drops_last_segment() {
        let identifier = Identifier::try_from("A1.2.3").unwrap();
        let parent = identifier.parent().unwrap();
        assert_eq!(parent.to_string(), "A1.2");
        assert_eq!(parent.parent().unwrap().to_string(), "A1");
        assert!(parent.parent().unwrap().parent().is_none());
    }

    #[test]
    fn serializes_as_string() {
        let identifier = Identifier::try_from("1.2.3").unwrap();
        let json = serde_json::to_string(&identifier).unwrap();
        assert_eq!(json, "\"1.2.3\"");

        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identifier);

        assert!(serde_json::from_str::<Identifier>("\"1..2\"").is_err());
    }

    #[test]
    fn error_display() {
        let error = Identifier::from_str("1.x").unwrap_err();
        assert_eq!(
            format!("{error}"),
            "Invalid identifier segment 'x': must be non-empty and contain only digits (0-9)"
        );
        assert_eq!(format!("{}", Error::Empty), "Empty identifier");
    }
}
