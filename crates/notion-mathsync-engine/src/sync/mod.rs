//! # Document Synchronization
//!
//! Fetch → flatten → re-segment → classify → batched write, against any
//! [`DocumentApi`].
//!
//! ## Failure Isolation
//!
//! - A failed children page aborts only that parent's branch; blocks already
//!   collected are kept and the failure is recorded.
//! - A failed batch aborts only that batch; later batches still run.
//!
//! Nothing is retried. Every failure ends up in the returned report, so partial
//! progress is always visible to the caller.

pub mod error;
pub mod fetch;
pub mod report;
pub mod write;

use std::time::Duration;

use serde::Deserialize;

use crate::blocks::{Block, OutputBlock, classify};
use crate::spans::RecordContent;
use crate::staging::{FlatRecord, flatten};

pub use error::SyncError;
pub use fetch::{FetchReport, PageFailure};
pub use report::SyncReport;
pub use write::{BatchOutcome, WriteReport};

/// One page of a block's children.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildrenPage {
    pub results: Vec<Block>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// The remote document service, as the synchronizer sees it.
pub trait DocumentApi {
    /// Fetches one page of `parent_id`'s children, starting at `cursor`.
    fn children_page(&self, parent_id: &str, cursor: Option<&str>)
    -> Result<ChildrenPage, SyncError>;

    /// Appends `children` to `parent_id`, in order.
    fn append_children(&self, parent_id: &str, children: &[OutputBlock]) -> Result<(), SyncError>;
}

impl<A: DocumentApi + ?Sized> DocumentApi for &A {
    fn children_page(
        &self,
        parent_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChildrenPage, SyncError> {
        (**self).children_page(parent_id, cursor)
    }

    fn append_children(&self, parent_id: &str, children: &[OutputBlock]) -> Result<(), SyncError> {
        (**self).append_children(parent_id, children)
    }
}

/// Write-side tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Blocks per append call.
    pub batch_size: usize,
    /// Pause between consecutive append calls.
    pub batch_delay: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            batch_delay: Duration::ZERO,
        }
    }
}

/// Everything fetched and transformed, ready to be written.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub fetch: FetchReport,
    pub records: Vec<FlatRecord>,
    pub blocks: Vec<OutputBlock>,
}

/// Drives one page's round trip through the document API.
pub struct Synchronizer<A> {
    api: A,
    page_id: String,
    options: SyncOptions,
}

impl<A: DocumentApi> Synchronizer<A> {
    pub fn new(api: A, page_id: impl Into<String>, options: SyncOptions) -> Self {
        Self {
            api,
            page_id: page_id.into(),
            options,
        }
    }

    /// Fetches the page and transforms every block. Nothing is written.
    pub fn prepare(&self) -> Prepared {
        let fetch = self.fetch_all(&self.page_id);
        let records = flatten(&fetch.blocks);
        let blocks = convert(&records);
        log::info!(
            "Fetched {} blocks, {} to write back",
            fetch.blocks.len(),
            blocks.len()
        );
        Prepared {
            fetch,
            records,
            blocks,
        }
    }

    /// Writes prepared blocks back to the page in batches.
    ///
    /// Nothing is written when the fetch produced no blocks.
    pub fn upload(&self, prepared: Prepared) -> SyncReport {
        let write = if prepared.fetch.blocks.is_empty() {
            log::warn!("No content fetched from {}, skipping upload", self.page_id);
            WriteReport::default()
        } else {
            self.write_batches(&self.page_id, &prepared.blocks, self.options.batch_size)
        };

        SyncReport {
            fetched: prepared.fetch.blocks.len(),
            converted: prepared.blocks.len(),
            page_failures: prepared.fetch.failures,
            write,
        }
    }

    /// Full pipeline: [`prepare`](Self::prepare) then [`upload`](Self::upload).
    pub fn run(&self) -> SyncReport {
        let prepared = self.prepare();
        self.upload(prepared)
    }
}

/// Re-segments each record and keeps the blocks that classify to an output.
pub fn convert(records: &[FlatRecord]) -> Vec<OutputBlock> {
    records
        .iter()
        .filter_map(|record| {
            let spans = RecordContent::from(record.text.as_str()).into_spans();
            classify(&record.kind, &spans)
        })
        .collect()
}
