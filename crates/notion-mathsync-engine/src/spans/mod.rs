//! # Span Extraction
//!
//! Two-pass re-segmentation of flat record text into typed text/equation spans.
//!
//! ## Passes
//!
//! 1. **Block math**: `$$ ... $$` is matched non-greedily across line breaks.
//!    Text between matches is kept verbatim; equation bodies are trimmed.
//! 2. **Inline math**: only the text spans from pass 1 are rescanned for
//!    `$ ... $` on a single line. Equations from pass 1 are never re-entered.
//!
//! Empty equation bodies and empty text fragments are dropped. Unterminated
//! delimiters stay literal text, so extraction never fails on content.
//!
//! ## Modules
//!
//! - **`types`**: `Span`, `Delimiter`, `RecordContent`, `MalformedInputError`
//! - **`kinds`**: Delimiter-owning types (`BlockMath`, `InlineMath`)
//! - **`run`**: `RichTextRun`, the wire form of a span
//! - **`extract`**: `extract()` and its inverse `render()`
//!
//! ## Round Trip
//!
//! For balanced delimiters with non-empty, unpadded bodies,
//! `render(&extract(text)) == text`.

pub mod extract;
pub mod kinds;
pub mod run;
pub mod types;

pub use extract::{extract, render};
pub use run::RichTextRun;
pub use types::{Delimiter, MalformedInputError, RecordContent, Span};
