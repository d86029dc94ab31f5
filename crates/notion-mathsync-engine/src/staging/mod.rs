use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::blocks::{Block, Extraction, rule_for};
use crate::spans::{RichTextRun, kinds::BlockMath};

/// One staged row per fetched block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// Flattens fetched blocks into records, preserving order.
pub fn flatten(blocks: &[Block]) -> Vec<FlatRecord> {
    blocks.iter().map(flatten_block).collect()
}

/// Flattens a single block using the extraction rule for its type.
///
/// Types without a rule are read through their `rich_text`, if any.
pub fn flatten_block(block: &Block) -> FlatRecord {
    let extraction = rule_for(&block.kind)
        .map(|rule| rule.extraction)
        .unwrap_or(Extraction::RichText { legacy_key: None });

    let text = match extraction {
        Extraction::RichText { legacy_key } => block
            .runs("rich_text")
            .or_else(|| legacy_key.and_then(|key| block.runs(key)))
            .map(|runs| join_runs(&runs))
            .unwrap_or_default(),
        Extraction::Expression => block
            .payload()
            .and_then(|p| p.get("expression"))
            .and_then(|e| e.as_str())
            .map(|e| format!("{d}{e}{d}", d = BlockMath::DELIM))
            .unwrap_or_default(),
        Extraction::Nothing => String::new(),
    };

    FlatRecord {
        id: block.id.clone(),
        kind: block.kind.clone(),
        text,
    }
}

fn join_runs(runs: &[RichTextRun]) -> String {
    runs.iter().map(RichTextRun::flat_text).collect()
}

/// Writes records as JSON Lines, one object per record.
pub fn write_jsonl<W: Write>(records: &[FlatRecord], mut writer: W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spans::Span;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn block(value: serde_json::Value) -> Block {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn paragraph_joins_text_and_equation_runs() {
        let b = block(json!({
            "id": "p1",
            "type": "paragraph",
            "paragraph": {"rich_text": [
                {"type": "text", "text": {"content": "Energy: "}},
                {"type": "equation", "equation": {"expression": "E=mc^2"}},
                {"type": "text", "text": {"content": " is famous"}}
            ]}
        }));
        assert_eq!(
            flatten_block(&b),
            FlatRecord {
                id: "p1".into(),
                kind: "paragraph".into(),
                text: "Energy: $$E=mc^2$$ is famous".into(),
            }
        );
    }

    #[test]
    fn trailing_dollar_before_equation_run_joins_the_equation() {
        let b = block(json!({
            "id": "p2",
            "type": "paragraph",
            "paragraph": {"rich_text": [
                {"type": "text", "text": {"content": "cost $"}},
                {"type": "equation", "equation": {"expression": "x"}}
            ]}
        }));
        let record = flatten_block(&b);
        assert_eq!(record.text, "cost $$$x$$");

        // The block pattern closes at the first `$$`, so the literal `$` is absorbed
        assert_eq!(
            crate::spans::extract(&record.text),
            vec![Span::text("cost "), Span::block_equation("$x")]
        );
    }

    #[test]
    fn code_prefers_rich_text_over_legacy_text() {
        let b = block(json!({
            "id": "c1",
            "type": "code",
            "code": {
                "rich_text": [{"type": "text", "text": {"content": "new"}}],
                "text": [{"type": "text", "text": {"content": "old"}}],
                "language": "rust"
            }
        }));
        assert_eq!(flatten_block(&b).text, "new");
    }

    #[test]
    fn code_falls_back_to_legacy_text() {
        let b = block(json!({
            "id": "c2",
            "type": "code",
            "code": {"text": [{"type": "text", "text": {"content": "x = 1"}}]}
        }));
        assert_eq!(flatten_block(&b).text, "x = 1");
    }

    #[test]
    fn equation_block_becomes_block_math() {
        let b = block(json!({
            "id": "e1",
            "type": "equation",
            "equation": {"expression": "a^2+b^2"}
        }));
        assert_eq!(flatten_block(&b).text, "$$a^2+b^2$$");
    }

    #[test]
    fn divider_and_unknown_payloads_are_empty() {
        let divider = block(json!({"id": "d", "type": "divider", "divider": {}}));
        let image = block(json!({"id": "i", "type": "image", "image": {"type": "external"}}));
        assert_eq!(flatten_block(&divider).text, "");
        assert_eq!(flatten_block(&image).text, "");
    }

    #[test]
    fn unknown_type_with_rich_text_is_still_read() {
        let b = block(json!({
            "id": "t",
            "type": "toggle",
            "toggle": {"rich_text": [{"type": "text", "text": {"content": "more"}}]}
        }));
        assert_eq!(flatten_block(&b).text, "more");
    }

    #[test]
    fn jsonl_has_one_line_per_record() {
        let records = vec![
            FlatRecord {
                id: "a".into(),
                kind: "paragraph".into(),
                text: "one".into(),
            },
            FlatRecord {
                id: "b".into(),
                kind: "divider".into(),
                text: String::new(),
            },
        ];
        let mut out = Vec::new();
        write_jsonl(&records, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"id":"a","type":"paragraph","text":"one"}"#
        );
        let back: FlatRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(back, records[1]);
    }
}
