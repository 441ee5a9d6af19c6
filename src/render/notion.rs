//! Conversion of nested-object records into Notion import blocks.
//!
//! Every record becomes a `heading_1` block titled `"{id} — {title}"`. Its
//! children are one explanatory paragraph followed by the converted child
//! records.

use serde::Serialize;

use super::nested::NodeRecord;

/// A Notion block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    object: &'static str,
    #[serde(flatten)]
    content: Content,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Content {
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: RichText },
    Paragraph { paragraph: RichText },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RichText {
    rich_text: Vec<TextSpan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TextSpan {
    #[serde(rename = "type")]
    kind: &'static str,
    text: Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Text {
    content: String,
}

impl RichText {
    fn plain(content: String) -> Self {
        Self {
            rich_text: vec![TextSpan {
                kind: "text",
                text: Text { content },
            }],
        }
    }
}

impl Block {
    /// A top-level heading with nested blocks.
    #[must_use]
    pub fn heading(title: String, children: Vec<Self>) -> Self {
        Self {
            object: "block",
            content: Content::Heading1 {
                heading_1: RichText::plain(title),
            },
            children,
        }
    }

    /// A plain text paragraph.
    #[must_use]
    pub fn paragraph(text: String) -> Self {
        Self {
            object: "block",
            content: Content::Paragraph {
                paragraph: RichText::plain(text),
            },
            children: Vec::new(),
        }
    }

    /// The block's text.
    #[must_use]
    pub fn text(&self) -> &str {
        let (Content::Heading1 { heading_1: rich } | Content::Paragraph { paragraph: rich }) =
            &self.content;
        rich.rich_text
            .first()
            .map_or("", |span| span.text.content.as_str())
    }

    /// Nested blocks.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }
}

fn heading_title(record: &NodeRecord) -> String {
    match &record.id {
        Some(id) => format!("{id} — {}", record.title),
        None => record.title.clone(),
    }
}

fn convert_record(record: &NodeRecord, note: &str) -> Block {
    let children = std::iter::once(Block::paragraph(note.to_string()))
        .chain(record.children.iter().map(|child| convert_record(child, note)))
        .collect();
    Block::heading(heading_title(record), children)
}

/// Converts top-level records, preserving order, annotating every heading
/// with `note`.
#[must_use]
pub fn convert(records: &[NodeRecord], note: &str) -> Vec<Block> {
    records
        .iter()
        .map(|record| convert_record(record, note))
        .collect()
}

/// Renders blocks as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(blocks: &[Block]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(blocks)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const NOTE: &str = "Parsed from the source standard.";

    fn record(id: &str, title: &str, children: Vec<NodeRecord>) -> NodeRecord {
        NodeRecord {
            id: Some(id.to_string()),
            title: title.to_string(),
            children,
        }
    }

    #[test]
    fn heading_wraps_note_and_children() {
        let records = vec![record(
            "1",
            "Install controls.",
            vec![record("1.1", "Processes", Vec::new())],
        )];

        let blocks = convert(&records, NOTE);
        let value = serde_json::to_value(&blocks).unwrap();

        assert_eq!(
            value,
            json!([{
                "object": "block",
                "type": "heading_1",
                "heading_1": {"rich_text": [{"type": "text", "text": {"content": "1 — Install controls."}}]},
                "children": [
                    {
                        "object": "block",
                        "type": "paragraph",
                        "paragraph": {"rich_text": [{"type": "text", "text": {"content": NOTE}}]}
                    },
                    {
                        "object": "block",
                        "type": "heading_1",
                        "heading_1": {"rich_text": [{"type": "text", "text": {"content": "1.1 — Processes"}}]},
                        "children": [{
                            "object": "block",
                            "type": "paragraph",
                            "paragraph": {"rich_text": [{"type": "text", "text": {"content": NOTE}}]}
                        }]
                    }
                ]
            }])
        );
    }

    #[test]
    fn preserves_record_order() {
        let records = vec![
            record("3", "c", Vec::new()),
            record("1", "a", Vec::new()),
        ];

        let titles: Vec<_> = convert(&records, NOTE)
            .iter()
            .map(|block| block.text().to_string())
            .collect();

        assert_eq!(titles, ["3 — c", "1 — a"]);
    }

    #[test]
    fn missing_identifier_uses_bare_title() {
        let records = vec![NodeRecord {
            id: None,
            title: "Loose".into(),
            children: Vec::new(),
        }];

        let blocks = convert(&records, NOTE);

        assert_eq!(blocks[0].text(), "Loose");
        assert_eq!(blocks[0].children().len(), 1);
        assert_eq!(blocks[0].children()[0].text(), NOTE);
    }

    #[test]
    fn json_keeps_non_ascii() {
        let blocks = convert(&[record("1", "Überblick", Vec::new())], NOTE);
        let json = to_json(&blocks).unwrap();
        assert!(json.contains("1 — Überblick"));
    }
}
