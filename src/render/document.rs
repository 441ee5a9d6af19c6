//! Structured-document encoding.
//!
//! A static metadata header followed by one record per node, indented two
//! spaces per nesting level:
//!
//! ```yaml
//! policy: PCI-DSS
//! ...
//! controls:
//!   - id: Req-1
//!     title: 'Install and maintain network security controls.'
//!     levels:
//!       - base
//!     status: not applicable
//!     controls:
//!     - id: Req-1.1
//!       ...
//!       rules: []
//!
//! ```
//!
//! Titles are single-quoted and word-wrapped; the output loads as YAML.

use crate::{
    domain::{Config, Header, Visit},
    ControlTree,
};

const INDENT: &str = "  ";

/// Renders the whole document, header included.
#[must_use]
pub fn render(tree: &ControlTree, config: &Config) -> String {
    let mut lines = header(&config.header, &config.level);
    for visit in tree.depth_first() {
        record(&mut lines, visit, config);
    }

    let mut text = lines.join("\n").trim_end().to_string();
    text.push('\n');
    text
}

fn header(header: &Header, level: &str) -> Vec<String> {
    vec![
        format!("policy: {}", header.policy),
        format!("title: {}", header.title),
        format!("id: {}", header.id),
        format!("version: {}", quote(&header.version)),
        format!("source: {}", header.source),
        "levels:".to_string(),
        format!("{INDENT}- id: {level}"),
        "controls:".to_string(),
    ]
}

fn record(lines: &mut Vec<String>, visit: Visit<'_>, config: &Config) {
    let indent = INDENT.repeat(visit.level);
    let node = visit.node;
    let identifier = node
        .identifier()
        .map(ToString::to_string)
        .unwrap_or_default();

    lines.push(format!("{indent}- id: {}{identifier}", config.id_prefix));
    lines.extend(title(node.title(), &indent, config.wrap_width()));
    lines.push(format!("{indent}  levels:"));
    lines.push(format!("{indent}    - {}", config.level));
    lines.push(format!("{indent}  status: {}", config.status));

    if node.is_leaf() {
        lines.push(format!("{indent}  rules: []"));
        lines.push(String::new());
    } else {
        lines.push(format!("{indent}  controls:"));
    }
}

/// The `title:` field, wrapped so that each line of title text fits
/// `wrap_width` once the indentation and field label are accounted for.
///
/// The surrounding quotes are not counted.
fn title(title: &str, indent: &str, wrap_width: usize) -> Vec<String> {
    let label = format!("{indent}  title: ");
    let continuation = format!("{indent}    ");
    let width = wrap_width.saturating_sub(label.chars().count()).max(1);

    let wrapped = wrap(&title.replace('\'', "''"), width);
    if wrapped.is_empty() {
        return vec![format!("{label}''")];
    }
    let last = wrapped.len() - 1;

    wrapped
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let (lead, open) = if index == 0 {
                (label.as_str(), "'")
            } else {
                (continuation.as_str(), "")
            };
            let close = if index == last { "'" } else { "" };
            format!("{lead}{open}{line}{close}")
        })
        .collect()
}

/// Single-quotes a YAML scalar.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Greedy word wrap at whitespace, without hyphenation.
///
/// Words longer than `width` are kept whole on their own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.chars().count();
        if line.is_empty() {
            line.push_str(word);
            line_width = word_width;
        } else if line_width + 1 + word_width <= width {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_width = word_width;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
