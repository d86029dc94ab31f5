use std::collections::{HashSet, VecDeque};

use crate::blocks::Block;

use super::{DocumentApi, SyncError, Synchronizer};

/// A children page that could not be fetched. Its branch was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub parent_id: String,
    pub error: SyncError,
}

/// All blocks collected, in depth-first pre-order, plus any page failures.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub blocks: Vec<Block>,
    pub failures: Vec<PageFailure>,
}

/// A parent whose children are still being paged through.
struct Pending {
    parent_id: String,
    cursor: Option<String>,
    buffered: VecDeque<Block>,
    exhausted: bool,
    seen_cursors: HashSet<String>,
}

impl Pending {
    fn new(parent_id: &str) -> Self {
        Self {
            parent_id: parent_id.to_string(),
            cursor: None,
            buffered: VecDeque::new(),
            exhausted: false,
            seen_cursors: HashSet::new(),
        }
    }
}

impl<A: DocumentApi> Synchronizer<A> {
    /// Fetches every descendant of `root_id`.
    ///
    /// Each block is followed by its own descendants before its next sibling.
    /// Uses an explicit stack of pending parents, so document depth does not
    /// grow the call stack. Pages are requested lazily: the next page of a
    /// parent is only fetched once the previous page's subtrees are done.
    pub fn fetch_all(&self, root_id: &str) -> FetchReport {
        let mut report = FetchReport::default();
        let mut stack = vec![Pending::new(root_id)];

        while let Some(top) = stack.last_mut() {
            if let Some(block) = top.buffered.pop_front() {
                let child = block.has_children.then(|| Pending::new(&block.id));
                report.blocks.push(block);
                if let Some(child) = child {
                    stack.push(child);
                }
                continue;
            }

            if top.exhausted {
                stack.pop();
                continue;
            }

            match self
                .api
                .children_page(&top.parent_id, top.cursor.as_deref())
            {
                Ok(page) => {
                    log::debug!(
                        "Fetched {} children of {} (more: {})",
                        page.results.len(),
                        top.parent_id,
                        page.has_more
                    );
                    top.buffered.extend(page.results);
                    top.exhausted = true;
                    // A missing cursor ends paging even if more is claimed
                    if let (true, Some(next)) = (page.has_more, page.next_cursor) {
                        if top.seen_cursors.insert(next.clone()) {
                            top.exhausted = false;
                            top.cursor = Some(next);
                        } else {
                            log::warn!(
                                "Cursor {next} for {} was already returned, stopping",
                                top.parent_id
                            );
                            report.failures.push(PageFailure {
                                parent_id: top.parent_id.clone(),
                                error: SyncError::MalformedResponse(format!(
                                    "next_cursor {next} repeats an earlier cursor"
                                )),
                            });
                        }
                    }
                }
                Err(error) => {
                    log::warn!("Abandoning children of {}: {error}", top.parent_id);
                    report.failures.push(PageFailure {
                        parent_id: top.parent_id.clone(),
                        error,
                    });
                    stack.pop();
                }
            }
        }

        report
    }
}
