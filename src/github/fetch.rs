use crate::error::Result;
use crate::model::{CommitRecord, RawCommit};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

/// A paginated source of raw commit objects. Pages are numbered from 1.
pub trait CommitPages {
    fn fetch_page(&self, page: u32) -> Result<Vec<RawCommit>>;
}

/// Request pages until one comes back empty. Any failure aborts the whole
/// fetch and discards the pages already collected.
pub fn fetch_commits_with_progress<S: CommitPages>(
    source: &S,
    show_progress: bool,
) -> Result<Vec<CommitRecord>> {
    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut commits: Vec<CommitRecord> = Vec::new();
    let mut page = 1u32;

    loop {
        debug!(page, collected = commits.len(), "fetching commit page");
        pb.set_message(format!("Fetching page {page} ({} commits so far)", commits.len()));

        let batch = match source.fetch_page(page) {
            Ok(batch) => batch,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        if batch.is_empty() {
            break;
        }

        commits.extend(batch.into_iter().map(CommitRecord::from));
        page += 1;
    }

    pb.finish_with_message(format!("Fetched {} commits", commits.len()));
    debug!(pages = page - 1, total = commits.len(), "pagination finished");
    Ok(commits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommitLogError;
    use crate::model::RawCommitDetail;
    use std::cell::RefCell;

    struct FakePages {
        pages: Vec<Result<Vec<RawCommit>>>,
        requested: RefCell<Vec<u32>>,
    }

    impl FakePages {
        fn new(pages: Vec<Result<Vec<RawCommit>>>) -> Self {
            Self { pages, requested: RefCell::new(Vec::new()) }
        }
    }

    impl CommitPages for FakePages {
        fn fetch_page(&self, page: u32) -> Result<Vec<RawCommit>> {
            self.requested.borrow_mut().push(page);
            match self.pages.get(page as usize - 1) {
                Some(Ok(batch)) => Ok(batch.clone()),
                Some(Err(CommitLogError::Http { status, reason, detail })) => Err(CommitLogError::Http {
                    status: *status,
                    reason: reason.clone(),
                    detail: detail.clone(),
                }),
                Some(Err(other)) => panic!("unsupported fake error {other}"),
                None => Ok(Vec::new()),
            }
        }
    }

    fn fetch_commits(source: &FakePages) -> Result<Vec<CommitRecord>> {
        fetch_commits_with_progress(source, false)
    }

    fn commits(page: usize, n: usize) -> Vec<RawCommit> {
        (0..n)
            .map(|i| RawCommit {
                sha: format!("{page:02}{i:038}"),
                commit: RawCommitDetail {
                    message: format!("page {page} commit {i}\n\nbody"),
                    author: None,
                },
                author: None,
            })
            .collect()
    }

    #[test]
    fn stops_at_first_empty_page() {
        let source = FakePages::new(vec![Ok(commits(1, 100)), Ok(commits(2, 3)), Ok(Vec::new())]);
        let result = fetch_commits(&source).unwrap();

        assert_eq!(result.len(), 103);
        assert_eq!(*source.requested.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn preserves_delivery_order() {
        let source = FakePages::new(vec![Ok(commits(1, 2)), Ok(commits(2, 2))]);
        let result = fetch_commits(&source).unwrap();
        let messages: Vec<_> = result.iter().map(|c| c.message.as_str()).collect();

        assert_eq!(
            messages,
            vec!["page 1 commit 0", "page 1 commit 1", "page 2 commit 0", "page 2 commit 1"]
        );
        assert!(result.iter().all(|c| c.hash.len() == 7));
    }

    #[test]
    fn empty_first_page_is_not_an_error() {
        let source = FakePages::new(vec![Ok(Vec::new())]);
        assert!(fetch_commits(&source).unwrap().is_empty());
        assert_eq!(*source.requested.borrow(), vec![1]);
    }

    #[test]
    fn error_on_later_page_discards_everything() {
        let source = FakePages::new(vec![
            Ok(commits(1, 100)),
            Err(CommitLogError::Http {
                status: 502,
                reason: "Bad Gateway".to_string(),
                detail: None,
            }),
            Ok(commits(3, 1)),
        ]);

        match fetch_commits(&source) {
            Err(CommitLogError::Http { status, .. }) => assert_eq!(status, 502),
            other => panic!("expected http error, got {other:?}"),
        }
        assert_eq!(*source.requested.borrow(), vec![1, 2]);
    }
}
