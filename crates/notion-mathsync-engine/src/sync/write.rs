use std::thread;

use crate::blocks::OutputBlock;

use super::{DocumentApi, SyncError, Synchronizer};

/// Result of one append call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// 1-based position of the batch.
    pub index: usize,
    pub size: usize,
    pub error: Option<SyncError>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub batches: Vec<BatchOutcome>,
    /// Blocks in batches that were accepted.
    pub uploaded: usize,
    /// Blocks handed to the writer.
    pub attempted: usize,
}

impl WriteReport {
    /// Indices of accepted batches.
    pub fn succeeded(&self) -> Vec<usize> {
        self.batches
            .iter()
            .filter(|b| b.is_ok())
            .map(|b| b.index)
            .collect()
    }

    /// Indices of rejected batches.
    pub fn failed(&self) -> Vec<usize> {
        self.batches
            .iter()
            .filter(|b| !b.is_ok())
            .map(|b| b.index)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.uploaded == self.attempted
    }
}

impl<A: DocumentApi> Synchronizer<A> {
    /// Appends `blocks` to `parent_id` in contiguous chunks of `batch_size`.
    ///
    /// Chunks are sent in order. A rejected chunk is recorded and the next
    /// chunk is still sent. A zero `batch_size` is treated as one.
    pub fn write_batches(
        &self,
        parent_id: &str,
        blocks: &[OutputBlock],
        batch_size: usize,
    ) -> WriteReport {
        let mut report = WriteReport {
            attempted: blocks.len(),
            ..WriteReport::default()
        };

        for (i, chunk) in blocks.chunks(batch_size.max(1)).enumerate() {
            if i > 0 && !self.options.batch_delay.is_zero() {
                thread::sleep(self.options.batch_delay);
            }
            let index = i + 1;

            let error = match self.api.append_children(parent_id, chunk) {
                Ok(()) => {
                    report.uploaded += chunk.len();
                    log::info!("Batch {index}: uploaded {} blocks", chunk.len());
                    None
                }
                Err(error) => {
                    if error.is_rate_limited() {
                        log::warn!("Batch {index} was rate limited, consider a longer batch delay");
                    }
                    log::warn!("Batch {index} failed: {error}");
                    Some(error)
                }
            };

            report.batches.push(BatchOutcome {
                index,
                size: chunk.len(),
                error,
            });
        }

        report
    }
}
