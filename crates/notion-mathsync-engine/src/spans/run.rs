use serde::{Deserialize, Serialize};

use super::{
    kinds::BlockMath,
    types::{Delimiter, Span},
};

/// One rich text run as the document API reads and writes it.
///
/// Inbound runs carry extra fields (annotations, href) that are ignored.
/// Run kinds other than `text` and `equation` are read through `plain_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextRun {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equation: Option<EquationContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationContent {
    pub expression: String,
}

impl RichTextRun {
    pub const TEXT: &'static str = "text";
    pub const EQUATION: &'static str = "equation";

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: Self::TEXT.to_string(),
            text: Some(TextContent {
                content: content.into(),
            }),
            equation: None,
            plain_text: None,
        }
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        Self {
            kind: Self::EQUATION.to_string(),
            text: None,
            equation: Some(EquationContent {
                expression: expression.into(),
            }),
            plain_text: None,
        }
    }

    /// Text this run contributes to a flat record.
    ///
    /// Equation runs are wrapped in the block math delimiter with no padding.
    pub fn flat_text(&self) -> String {
        match (self.kind.as_str(), &self.text, &self.equation) {
            (Self::TEXT, Some(text), _) => text.content.clone(),
            (Self::EQUATION, _, Some(eq)) => {
                format!("{d}{}{d}", eq.expression, d = BlockMath::DELIM)
            }
            _ => self.plain_text.clone().unwrap_or_default(),
        }
    }

    /// Converts an already-segmented run back into a span.
    ///
    /// Rich text equations render inline, so they come back as inline spans.
    pub fn to_span(&self) -> Span {
        match (self.kind.as_str(), &self.text, &self.equation) {
            (Self::TEXT, Some(text), _) => Span::Text(text.content.clone()),
            (Self::EQUATION, _, Some(eq)) => Span::Equation {
                expression: eq.expression.clone(),
                delimiter: Delimiter::Inline,
            },
            _ => Span::Text(self.plain_text.clone().unwrap_or_default()),
        }
    }
}

impl From<&Span> for RichTextRun {
    fn from(span: &Span) -> Self {
        match span {
            Span::Text(content) => RichTextRun::text(content.as_str()),
            Span::Equation { expression, .. } => RichTextRun::equation(expression.as_str()),
        }
    }
}
