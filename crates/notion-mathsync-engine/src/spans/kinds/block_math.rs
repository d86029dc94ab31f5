use regex::Regex;
use std::sync::LazyLock;

/// Block-level math (`$$ ... $$`) with owned delimiter and pattern.
pub struct BlockMath;

static PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$(.*?)\$\$").expect("block math pattern is valid"));

impl BlockMath {
    /// The delimiter that opens and closes block math.
    pub const DELIM: &'static str = "$$";

    /// Non-greedy, multi-line pattern. Capture group 1 is the raw body.
    pub fn pattern() -> &'static Regex {
        &PATTERN
    }
}
