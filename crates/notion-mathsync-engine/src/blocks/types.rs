use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value};

use crate::spans::RichTextRun;

/// A block as the document API returns it.
///
/// Only the common fields are typed. Everything else, including the
/// type-named payload, stays in `fields`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Block {
    /// The payload object named by the block's type, if present.
    pub fn payload(&self) -> Option<&Value> {
        self.fields.get(&self.kind)
    }

    /// Rich text runs stored under `key` in the payload.
    ///
    /// Runs that fail to decode are skipped rather than failing the block.
    pub fn runs(&self, key: &str) -> Option<Vec<RichTextRun>> {
        let array = self.payload()?.get(key)?.as_array()?;
        Some(
            array
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect(),
        )
    }
}

/// Content of an outbound block, under its type-named key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutputBody {
    /// Dividers carry an empty object.
    Empty {},
    RichText {
        rich_text: Vec<RichTextRun>,
    },
    Code {
        rich_text: Vec<RichTextRun>,
        language: &'static str,
    },
}

/// A block shaped for the append-children endpoint.
///
/// Serializes as `{"type": T, T: body}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBlock {
    pub kind: &'static str,
    pub body: OutputBody,
}

impl OutputBlock {
    /// Runs carried by this block; empty for dividers.
    pub fn runs(&self) -> &[RichTextRun] {
        match &self.body {
            OutputBody::Empty {} => &[],
            OutputBody::RichText { rich_text } | OutputBody::Code { rich_text, .. } => rich_text,
        }
    }
}

impl Serialize for OutputBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", self.kind)?;
        map.serialize_entry(self.kind, &self.body)?;
        map.end()
    }
}
