//! # Block Routing
//!
//! Table-driven handling of remote block types, in both directions.
//!
//! ## Phases
//!
//! 1. **Flattening** (`Extraction`): a fetched [`Block`]'s payload becomes the
//!    text of one flat record.
//! 2. **Classification** (`classify`): a block type plus its spans becomes an
//!    [`OutputBlock`] ready to write, or is skipped.
//!
//! ## Modules
//!
//! - **`types`**: `Block` (inbound) and `OutputBlock` (outbound)
//! - **`table`**: `BlockRule` entries keyed by type name
//! - **`classify`**: `classify()` driven by the table
//!
//! ## Adding a Type
//!
//! One `BlockRule` entry in `table::RULES`. Neither phase branches on type names.

pub mod classify;
pub mod table;
pub mod types;

pub use classify::classify;
pub use table::{BlockRule, Emptiness, Extraction, Wrapper, rule_for};
pub use types::{Block, OutputBlock, OutputBody};
