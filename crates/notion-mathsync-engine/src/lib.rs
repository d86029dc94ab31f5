pub mod blocks;
pub mod client;
pub mod spans;
pub mod staging;
pub mod sync;

// Re-export key types for easier usage
pub use blocks::{Block, OutputBlock, OutputBody, classify};
pub use client::{ClientSettings, NotionClient};
pub use spans::{
    Delimiter, MalformedInputError, RecordContent, RichTextRun, Span, extract, render,
};
pub use staging::{FlatRecord, flatten, write_jsonl};
pub use sync::{
    BatchOutcome, ChildrenPage, DocumentApi, FetchReport, PageFailure, Prepared, SyncError,
    SyncOptions, SyncReport, Synchronizer, WriteReport, convert,
};
