use regex::Regex;
use std::sync::LazyLock;

/// Inline math (`$ ... $`) with owned delimiter and pattern.
///
/// The body must be at least one character, contain no `$` and no line break.
/// A bare `$$` left over from an unterminated block delimiter therefore never
/// matches and stays literal text.
pub struct InlineMath;

static PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([^$\n]+?)\$").expect("inline math pattern is valid"));

impl InlineMath {
    /// The delimiter that opens and closes inline math.
    pub const DELIM: &'static str = "$";

    /// Non-greedy, same-line pattern. Capture group 1 is the raw body.
    pub fn pattern() -> &'static Regex {
        &PATTERN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_single_line_body() {
        let caps = InlineMath::pattern().captures("so $x^2$ holds").unwrap();
        assert_eq!(&caps[1], "x^2");
    }

    #[test]
    fn does_not_cross_line_breaks() {
        assert!(InlineMath::pattern().captures("$a\nb$").is_none());
    }

    #[test]
    fn bare_double_dollar_is_not_inline_math() {
        assert!(InlineMath::pattern().captures("cost $$ here").is_none());
    }

    #[test]
    fn lone_dollar_is_not_inline_math() {
        assert!(InlineMath::pattern().captures("price is $5").is_none());
    }
}
