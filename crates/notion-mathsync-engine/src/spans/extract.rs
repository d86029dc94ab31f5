use regex::Regex;

use super::{
    kinds::{BlockMath, InlineMath},
    types::{Delimiter, Span},
};

/// Segments record text into an ordered sequence of [`Span`]s.
///
/// Block math is split out first; each resulting text span is then split on
/// inline math. Whitespace in text spans is kept verbatim, equation bodies are
/// trimmed, and empty bodies vanish without leaving an empty text span behind.
///
/// # Examples
///
/// ```
/// use notion_mathsync_engine::spans::{extract, Span};
///
/// let spans = extract("Energy: $$E=mc^2$$ and $x$.");
/// assert_eq!(
///     spans,
///     vec![
///         Span::text("Energy: "),
///         Span::block_equation("E=mc^2"),
///         Span::text(" and "),
///         Span::inline_equation("x"),
///         Span::text("."),
///     ]
/// );
/// ```
pub fn extract(text: &str) -> Vec<Span> {
    let mut out = Vec::new();
    for span in split_on(BlockMath::pattern(), text, Delimiter::Block) {
        match span {
            Span::Text(content) => {
                out.extend(split_on(InlineMath::pattern(), &content, Delimiter::Inline))
            }
            equation => out.push(equation),
        }
    }
    out
}

/// Renders spans back into one string, rewrapping each equation in its delimiter.
pub fn render(spans: &[Span]) -> String {
    spans.iter().map(Span::to_string).collect()
}

fn split_on(pattern: &Regex, text: &str, delimiter: Delimiter) -> Vec<Span> {
    // Helper to push a text fragment, skipping empty ones
    fn push_text(out: &mut Vec<Span>, fragment: &str) {
        if !fragment.is_empty() {
            out.push(Span::Text(fragment.to_string()));
        }
    }

    let mut out = vec![];
    let mut consumed = 0;

    for caps in pattern.captures_iter(text) {
        let (Some(full), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_text(&mut out, &text[consumed..full.start()]);

        let expression = body.as_str().trim();
        if !expression.is_empty() {
            out.push(Span::Equation {
                expression: expression.to_string(),
                delimiter,
            });
        }
        consumed = full.end();
    }

    push_text(&mut out, &text[consumed..]);
    out
}
