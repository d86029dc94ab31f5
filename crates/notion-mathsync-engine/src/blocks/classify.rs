use crate::spans::{RichTextRun, Span};

use super::{
    table::{Emptiness, Wrapper, rule_for},
    types::{OutputBlock, OutputBody},
};

/// Routes a block type and its spans to the block that gets written back.
///
/// Returns `None` for types without a wrapper and for empty spans under a
/// `SkipWhenEmpty` rule.
pub fn classify(kind: &str, spans: &[Span]) -> Option<OutputBlock> {
    let Some(rule) = rule_for(kind) else {
        log::debug!("Unhandled block type {kind:?}, not written back");
        return None;
    };
    let Some(wrapper) = rule.wrapper else {
        log::debug!("Block type {kind:?} is read-only, not written back");
        return None;
    };
    if spans.is_empty() && rule.emptiness == Emptiness::SkipWhenEmpty {
        log::debug!("Skipping empty {kind} block");
        return None;
    }

    let runs = || spans.iter().map(RichTextRun::from).collect::<Vec<_>>();
    let body = match wrapper {
        Wrapper::Empty => OutputBody::Empty {},
        Wrapper::RichText => OutputBody::RichText { rich_text: runs() },
        Wrapper::Code { language } => OutputBody::Code {
            rich_text: runs(),
            language,
        },
    };

    Some(OutputBlock {
        kind: rule.kind,
        body,
    })
}
