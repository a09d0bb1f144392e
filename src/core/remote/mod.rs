//! Remote collaborators: the repository the scanner reads from and the
//! issue tracker its findings are resolved against.

mod github;

pub use github::GitHubClient;

use async_trait::async_trait;

use crate::error::Result;

/// Whether a tracked issue is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
}

/// Read access to one repository's branches.
#[async_trait]
pub trait SourceProvider {
    /// All file paths of the branch's recursive tree, in listing order.
    async fn list_files(&self, branch: &str) -> Result<Vec<String>>;

    /// Full text content of one file on one branch.
    async fn read_file(&self, branch: &str, path: &str) -> Result<String>;
}

/// Issue status lookup on the tracker.
#[async_trait]
pub trait IssueTracker {
    async fn issue_state(&self, owner: &str, repo: &str, number: u64) -> Result<IssueState>;
}
