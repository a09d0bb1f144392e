use std::collections::HashMap;

use tracing::debug;

use crate::error::{TestwardenError, Result};
use super::remote::{IssueState, IssueTracker};

/// Decides whether a disabled test's tracking issue is already closed.
///
/// Resolution failures never abort a scan: every failure path collapses
/// to `false` at this boundary. Duplicate links are resolved once per
/// run.
pub struct IssueResolver<'a> {
    tracker: &'a dyn IssueTracker,
    resolved: HashMap<String, bool>,
}

impl<'a> IssueResolver<'a> {
    pub fn new(tracker: &'a dyn IssueTracker) -> Self {
        Self {
            tracker,
            resolved: HashMap::new(),
        }
    }

    /// True iff the link points at an issue this resolver understands
    /// and the tracker reports it closed.
    pub async fn can_be_reenabled(&mut self, issue_link: Option<&str>) -> bool {
        let link = match issue_link {
            Some(link) => link,
            None => return false,
        };

        if let Some(&known) = self.resolved.get(link) {
            return known;
        }

        let closed = match self.resolve(link).await {
            Ok(state) => state == IssueState::Closed,
            Err(e) => {
                debug!("Could not resolve issue {}: {}", link, e);
                false
            }
        };

        self.resolved.insert(link.to_string(), closed);
        closed
    }

    /// `Result`-typed core, kept separate so the failure paths stay
    /// visible. Only GitHub issue links are understood; the owner, repo
    /// and issue number come from the URL's trailing path segments.
    async fn resolve(&self, link: &str) -> Result<IssueState> {
        if !link.contains("github.com") {
            return Err(TestwardenError::Resolver(format!(
                "Unsupported tracker host in {}",
                link
            )));
        }

        let parts: Vec<&str> = link.split('/').collect();
        if parts.len() < 4 {
            return Err(TestwardenError::Resolver(format!(
                "Malformed issue link {}",
                link
            )));
        }

        let number: u64 = parts[parts.len() - 1].parse().map_err(|_| {
            TestwardenError::Resolver(format!("No issue number in {}", link))
        })?;
        let owner = parts[parts.len() - 4];
        let repo = parts[parts.len() - 3];

        self.tracker.issue_state(owner, repo, number).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Tracker fake that records lookups and closes a fixed issue set.
    struct FakeTracker {
        closed: Vec<(String, String, u64)>,
        calls: AtomicUsize,
    }

    impl FakeTracker {
        fn closing(closed: Vec<(&str, &str, u64)>) -> Self {
            Self {
                closed: closed
                    .into_iter()
                    .map(|(o, r, n)| (o.to_string(), r.to_string(), n))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IssueTracker for FakeTracker {
        async fn issue_state(&self, owner: &str, repo: &str, number: u64) -> Result<IssueState> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let key = (owner.to_string(), repo.to_string(), number);
            if self.closed.contains(&key) {
                Ok(IssueState::Closed)
            } else {
                Ok(IssueState::Open)
            }
        }
    }

    struct UnreachableTracker;

    #[async_trait]
    impl IssueTracker for UnreachableTracker {
        async fn issue_state(&self, _owner: &str, _repo: &str, _number: u64) -> Result<IssueState> {
            Err(TestwardenError::Fetch("tracker unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn absent_link_is_never_reenableable() {
        let tracker = FakeTracker::closing(vec![]);
        let mut resolver = IssueResolver::new(&tracker);

        assert!(!resolver.can_be_reenabled(None).await);
        assert_eq!(tracker.call_count(), 0);
    }

    #[tokio::test]
    async fn foreign_tracker_hosts_are_not_resolved() {
        let tracker = FakeTracker::closing(vec![]);
        let mut resolver = IssueResolver::new(&tracker);

        let link = "https://issue.redhat.com/projects/browse/QUARKUS-2812";
        assert!(!resolver.can_be_reenabled(Some(link)).await);
        assert_eq!(tracker.call_count(), 0);
    }

    #[tokio::test]
    async fn closed_issue_resolves_true_open_resolves_false() {
        let tracker = FakeTracker::closing(vec![("org", "repo", 42)]);
        let mut resolver = IssueResolver::new(&tracker);

        assert!(
            resolver
                .can_be_reenabled(Some("https://github.com/org/repo/issues/42"))
                .await
        );
        assert!(
            !resolver
                .can_be_reenabled(Some("https://github.com/org/repo/issues/43"))
                .await
        );
    }

    #[tokio::test]
    async fn tracker_failure_resolves_false() {
        let tracker = UnreachableTracker;
        let mut resolver = IssueResolver::new(&tracker);

        assert!(
            !resolver
                .can_be_reenabled(Some("https://github.com/org/repo/issues/42"))
                .await
        );
    }

    #[tokio::test]
    async fn malformed_github_link_resolves_false() {
        let tracker = FakeTracker::closing(vec![]);
        let mut resolver = IssueResolver::new(&tracker);

        assert!(!resolver.can_be_reenabled(Some("https://github.com/about")).await);
        assert_eq!(tracker.call_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_links_hit_the_tracker_once() {
        let tracker = FakeTracker::closing(vec![("org", "repo", 42)]);
        let mut resolver = IssueResolver::new(&tracker);

        let link = "https://github.com/org/repo/issues/42";
        assert!(resolver.can_be_reenabled(Some(link)).await);
        assert!(resolver.can_be_reenabled(Some(link)).await);
        assert_eq!(tracker.call_count(), 1);
    }
}
