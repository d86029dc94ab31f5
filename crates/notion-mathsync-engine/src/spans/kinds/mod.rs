//! # Math Kinds
//!
//! Types that own their math delimiters and match patterns.
//!
//! ## Types
//!
//! - **`BlockMath`**: `DELIM = "$$"`, body may span lines
//! - **`InlineMath`**: `DELIM = "$"`, body stays on one line and holds no `$`
//!
//! The extractor asks these types for their patterns; it never hardcodes `$`.

pub mod block_math;
pub mod inline_math;

pub use block_math::BlockMath;
pub use inline_math::InlineMath;
