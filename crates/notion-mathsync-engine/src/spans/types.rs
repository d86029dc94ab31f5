use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    extract::extract,
    kinds::{BlockMath, InlineMath},
    run::RichTextRun,
};

/// Which marker wrapped an equation in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// `$$ ... $$`
    Block,
    /// `$ ... $`
    Inline,
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Block => BlockMath::DELIM,
            Delimiter::Inline => InlineMath::DELIM,
        }
    }
}

/// A typed fragment of record text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Span {
    /// Plain text, kept verbatim including surrounding whitespace.
    Text(String),
    /// An equation body with its delimiters stripped and whitespace trimmed.
    Equation {
        expression: String,
        /// The marker it was written with, so rendering can rewrap it.
        delimiter: Delimiter,
    },
}

impl Span {
    pub fn text(content: impl Into<String>) -> Self {
        Span::Text(content.into())
    }

    /// Block-delimited equation (`$$ ... $$`).
    pub fn block_equation(expression: impl Into<String>) -> Self {
        Span::Equation {
            expression: expression.into(),
            delimiter: Delimiter::Block,
        }
    }

    /// Inline equation (`$ ... $`).
    pub fn inline_equation(expression: impl Into<String>) -> Self {
        Span::Equation {
            expression: expression.into(),
            delimiter: Delimiter::Inline,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Span::Text(content) => f.write_str(content),
            Span::Equation {
                expression,
                delimiter,
            } => {
                let d = delimiter.as_str();
                write!(f, "{d}{expression}{d}")
            }
        }
    }
}

/// Record content handed to the extractor.
///
/// Records that were already segmented carry their spans and pass through
/// untouched, so extraction can be rerun safely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordContent {
    Text(String),
    Spans(Vec<Span>),
}

impl RecordContent {
    /// Segments text content; returns already-segmented content unchanged.
    pub fn into_spans(self) -> Vec<Span> {
        match self {
            RecordContent::Text(text) => extract(&text),
            RecordContent::Spans(spans) => spans,
        }
    }
}

impl From<String> for RecordContent {
    fn from(text: String) -> Self {
        RecordContent::Text(text)
    }
}

impl From<&str> for RecordContent {
    fn from(text: &str) -> Self {
        RecordContent::Text(text.to_string())
    }
}

impl From<Vec<Span>> for RecordContent {
    fn from(spans: Vec<Span>) -> Self {
        RecordContent::Spans(spans)
    }
}

/// Content that is neither a string nor a list of rich text runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported record content: expected a string or a rich text list, found {found}")]
pub struct MalformedInputError {
    pub found: &'static str,
}

impl TryFrom<Value> for RecordContent {
    type Error = MalformedInputError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(RecordContent::Text(text)),
            Value::Array(_) => {
                let runs: Vec<RichTextRun> = serde_json::from_value(value)
                    .map_err(|_| MalformedInputError {
                        found: "an array of non-rich-text values",
                    })?;
                Ok(RecordContent::Spans(
                    runs.iter().map(RichTextRun::to_span).collect(),
                ))
            }
            Value::Null => Err(MalformedInputError { found: "null" }),
            Value::Bool(_) => Err(MalformedInputError { found: "a boolean" }),
            Value::Number(_) => Err(MalformedInputError { found: "a number" }),
            Value::Object(_) => Err(MalformedInputError { found: "an object" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn display_rewraps_equations_in_their_delimiter() {
        assert_eq!(Span::block_equation("E=mc^2").to_string(), "$$E=mc^2$$");
        assert_eq!(Span::inline_equation("x").to_string(), "$x$");
        assert_eq!(Span::text(" as is ").to_string(), " as is ");
    }

    #[test]
    fn string_value_becomes_text_content() {
        let content = RecordContent::try_from(json!("a $x$")).unwrap();
        assert_eq!(content, RecordContent::Text("a $x$".to_string()));
    }

    #[test]
    fn rich_text_array_passes_through_as_spans() {
        let value = json!([
            {"type": "text", "text": {"content": "a "}},
            {"type": "equation", "equation": {"expression": "x"}}
        ]);
        let content = RecordContent::try_from(value).unwrap();
        assert_eq!(
            content.into_spans(),
            vec![Span::text("a "), Span::inline_equation("x")]
        );
    }

    #[test]
    fn unsupported_values_are_malformed() {
        let err = RecordContent::try_from(json!(42)).unwrap_err();
        assert_eq!(err.found, "a number");
        assert!(err.to_string().contains("expected a string"));

        assert!(RecordContent::try_from(json!(null)).is_err());
        assert!(RecordContent::try_from(json!({"content": "x"})).is_err());
        assert!(RecordContent::try_from(json!([1, 2])).is_err());
    }
}
