use std::fmt;

use super::{PageFailure, WriteReport};

/// Outcome of a full run, with counts for every stage.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub fetched: usize,
    pub converted: usize,
    pub page_failures: Vec<PageFailure>,
    pub write: WriteReport,
}

impl SyncReport {
    /// False when nothing was fetched, any page failed, or any batch failed.
    pub fn is_success(&self) -> bool {
        self.fetched > 0 && self.page_failures.is_empty() && self.write.is_complete()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fetched:   {} blocks", self.fetched)?;
        writeln!(f, "Converted: {} blocks", self.converted)?;
        write!(
            f,
            "Uploaded:  {} of {} blocks",
            self.write.uploaded, self.write.attempted
        )?;

        for failure in &self.page_failures {
            write!(
                f,
                "\nFetch of children of {} failed: {}",
                failure.parent_id, failure.error
            )?;
        }
        for batch in &self.write.batches {
            if let Some(error) = &batch.error {
                write!(
                    f,
                    "\nBatch {} ({} blocks) failed: {error}",
                    batch.index, batch.size
                )?;
            }
        }
        Ok(())
    }
}
