/// How a fetched block's payload becomes flat record text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Join the payload's `rich_text` runs. When `legacy_key` is set and
    /// `rich_text` is absent, runs are read from that key instead.
    RichText { legacy_key: Option<&'static str> },
    /// Wrap the payload's `expression` field in block math delimiters.
    Expression,
    /// No text at all.
    Nothing,
}

/// The outbound body a block type is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    /// Empty object body (dividers).
    Empty,
    /// `rich_text` runs.
    RichText,
    /// `rich_text` runs plus a fixed language tag.
    Code { language: &'static str },
}

/// Whether a block with no spans is still written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emptiness {
    Emit,
    SkipWhenEmpty,
}

/// Everything the pipeline knows about one block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRule {
    pub kind: &'static str,
    pub extraction: Extraction,
    /// `None` means the type is flattened but never written back.
    pub wrapper: Option<Wrapper>,
    pub emptiness: Emptiness,
}

impl BlockRule {
    const fn written(kind: &'static str, wrapper: Wrapper, emptiness: Emptiness) -> Self {
        let extraction = match wrapper {
            Wrapper::Empty => Extraction::Nothing,
            Wrapper::RichText => Extraction::RichText { legacy_key: None },
            Wrapper::Code { .. } => Extraction::RichText {
                legacy_key: Some("text"),
            },
        };
        Self {
            kind,
            extraction,
            wrapper: Some(wrapper),
            emptiness,
        }
    }
}

/// Language tag given to every code block written back.
pub const CODE_LANGUAGE: &str = "python";

pub static RULES: &[BlockRule] = &[
    BlockRule::written("paragraph", Wrapper::RichText, Emptiness::SkipWhenEmpty),
    BlockRule::written("heading_1", Wrapper::RichText, Emptiness::Emit),
    BlockRule::written("heading_2", Wrapper::RichText, Emptiness::Emit),
    BlockRule::written("heading_3", Wrapper::RichText, Emptiness::Emit),
    BlockRule::written("quote", Wrapper::RichText, Emptiness::Emit),
    BlockRule::written("bulleted_list_item", Wrapper::RichText, Emptiness::Emit),
    BlockRule::written(
        "code",
        Wrapper::Code {
            language: CODE_LANGUAGE,
        },
        Emptiness::Emit,
    ),
    BlockRule::written("divider", Wrapper::Empty, Emptiness::Emit),
    BlockRule {
        kind: "equation",
        extraction: Extraction::Expression,
        wrapper: None,
        emptiness: Emptiness::Emit,
    },
];

/// Looks up the rule for a block type name.
pub fn rule_for(kind: &str) -> Option<&'static BlockRule> {
    RULES.iter().find(|rule| rule.kind == kind)
}
