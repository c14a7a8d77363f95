//! URL-keyed index over all fetched pull requests.
//!
//! Flattens per-repository record sets into one `html_url → record` map so
//! grading results can be joined regardless of which repository the pull
//! belongs to.

use std::collections::{BTreeMap, HashSet};

use courseboard_shared::PullRequestRecord;

/// Deduplicated index from pull URL to its full record.
///
/// Built once per batch from the per-repository sequences in their fixed
/// caller-supplied order. Duplicate URLs across repositories are an accepted
/// data-quality assumption: the later occurrence silently wins.
#[derive(Debug, Clone, Default)]
pub struct PullIndex {
    by_url: BTreeMap<String, PullRequestRecord>,
}

impl PullIndex {
    /// Build the index by concatenating all repositories' pulls in order.
    /// Last occurrence of a duplicate `html_url` wins; no error is raised.
    pub fn build(repo_pulls: &[Vec<PullRequestRecord>]) -> Self {
        let mut by_url = BTreeMap::new();
        for pulls in repo_pulls {
            for pull in pulls {
                if let Some(prev) = by_url.insert(pull.html_url.clone(), pull.clone()) {
                    tracing::debug!(
                        url = %pull.html_url,
                        prev_id = prev.id,
                        "duplicate pull URL, later record wins"
                    );
                }
            }
        }
        Self { by_url }
    }

    /// Look up a pull by its `html_url`.
    pub fn get(&self, url: &str) -> Option<&PullRequestRecord> {
        self.by_url.get(url)
    }

    /// Iterate over all indexed pulls.
    pub fn pulls(&self) -> impl Iterator<Item = &PullRequestRecord> {
        self.by_url.values()
    }

    /// Number of distinct pull URLs.
    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }
}

/// Distinct pull authors across all repositories, in first-seen order.
///
/// Used to decide which public profiles to fetch.
pub fn distinct_logins(repo_pulls: &[Vec<PullRequestRecord>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut logins = Vec::new();
    for pulls in repo_pulls {
        for pull in pulls {
            if seen.insert(pull.user.login.clone()) {
                logins.push(pull.user.login.clone());
            }
        }
    }
    logins
}
