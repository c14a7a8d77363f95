//! Assignment merge engine.
//!
//! Folds the ordered stream of grading results against the pull index and
//! profile directory into one [`MergedUser`] per distinct contributor login,
//! with assignment history attached in processing order.

use std::collections::BTreeMap;

use tracing::debug;

use courseboard_shared::{
    AssignmentRecord, AssignmentResult, GithubInfo, MergedUser, ProfileRecord, PullRequestRecord,
};

use crate::profiles::ProfileDirectory;
use crate::pull_index::PullIndex;

/// Merge grading results into per-login user records.
///
/// Per item, in strict input order:
/// 1. Resolve the pull via `assignment.url`; if unknown, drop the item
///    silently and continue (upstream data sources lag, partial data is
///    expected, and failing the whole batch would be disproportionate).
/// 2. On the first sighting of the pull author's login, construct the user
///    via [`new_merged_user`].
/// 3. Append the stripped result to the user's assignment history.
///
/// Every login with at least one resolvable result appears exactly once in
/// the output, with all its resolvable assignments present in input order.
/// Re-processing the same input appends again; there is no deduplication.
pub fn merge_users(
    index: &PullIndex,
    directory: &ProfileDirectory,
    results: &[AssignmentResult],
) -> BTreeMap<String, MergedUser> {
    let mut users: BTreeMap<String, MergedUser> = BTreeMap::new();

    for result in results {
        let Some(pull) = index.get(&result.assignment.url) else {
            debug!(url = %result.assignment.url, name = %result.name, "unresolvable assignment, dropped");
            continue;
        };

        let login = &pull.user.login;
        let user = users
            .entry(login.clone())
            .or_insert_with(|| new_merged_user(pull, result, directory.get(login)));

        user.assignments.push(strip_result(result));
    }

    users
}

/// Build a fully-populated user record from its first resolvable result.
///
/// Field-level fallbacks when the profile is missing (or a profile field is
/// null): identity fields come from the pull author, `github.name` from the
/// grading result, the remaining profile strings default to empty, and the
/// follower counters to 0.
pub fn new_merged_user(
    pull: &PullRequestRecord,
    result: &AssignmentResult,
    profile: Option<&ProfileRecord>,
) -> MergedUser {
    let github = GithubInfo {
        name: profile
            .and_then(|p| p.name.clone())
            .unwrap_or_else(|| result.name.clone()),
        id: profile
            .map(|p| p.id.to_string())
            .unwrap_or_else(|| pull.user.id.to_string()),
        login: profile
            .map(|p| p.login.clone())
            .unwrap_or_else(|| pull.user.login.clone()),
        avatar_url: profile
            .map(|p| p.avatar_url.clone())
            .unwrap_or_else(|| pull.user.avatar_url.clone()),
        html_url: profile
            .map(|p| p.html_url.clone())
            .unwrap_or_else(|| pull.user.html_url.clone()),
        url: profile.map(|p| p.url.clone()).unwrap_or_default(),
        company: profile.and_then(|p| p.company.clone()).unwrap_or_default(),
        blog: profile.and_then(|p| p.blog.clone()).unwrap_or_default(),
        location: profile.and_then(|p| p.location.clone()).unwrap_or_default(),
        email: profile.and_then(|p| p.email.clone()).unwrap_or_default(),
        bio: profile.and_then(|p| p.bio.clone()).unwrap_or_default(),
        followers: profile.map(|p| p.followers).unwrap_or(0),
        following: profile.map(|p| p.following).unwrap_or(0),
    };

    MergedUser {
        name: result.name.clone(),
        github,
        assignments: Vec::new(),
    }
}

/// Strip `name`, `feedback`, `assignment` from a result and flatten the
/// assignment URL onto the record.
fn strip_result(result: &AssignmentResult) -> AssignmentRecord {
    AssignmentRecord {
        extra: result.extra.clone(),
        url: result.assignment.url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{profile, pull, result};

    fn index_of(pulls: Vec<Vec<courseboard_shared::PullRequestRecord>>) -> PullIndex {
        PullIndex::build(&pulls)
    }

    #[test]
    fn join_completeness_resolvable_results_appear() {
        let index = index_of(vec![vec![pull("https://x/1", "a", 1)]]);
        let directory = ProfileDirectory::build(&[]);
        let results = vec![result("A", None, "https://x/1", 10)];

        let users = merge_users(&index, &directory, &results);
        assert_eq!(users.len(), 1);
        let user = &users["a"];
        assert_eq!(user.assignments.len(), 1);
        assert_eq!(user.assignments[0].url, "https://x/1");
        assert_eq!(user.assignments[0].extra["score"], 10);
    }

    #[test]
    fn join_safety_unresolvable_results_dropped() {
        let index = index_of(vec![vec![pull("https://x/1", "a", 1)]]);
        let directory = ProfileDirectory::build(&[]);
        let results = vec![
            result("A", None, "https://x/1", 10),
            result("B", None, "https://x/404", 99),
            result("A", None, "https://x/1", 20),
        ];

        let users = merge_users(&index, &directory, &results);
        // The bad reference creates no user and does not stop the loop.
        assert_eq!(users.len(), 1);
        assert_eq!(users["a"].assignments.len(), 2);
    }

    #[test]
    fn fallback_completeness_without_profile() {
        let index = index_of(vec![vec![pull("https://x/1", "a", 7)]]);
        let directory = ProfileDirectory::build(&[]);
        let results = vec![result("Ahn", None, "https://x/1", 10)];

        let users = merge_users(&index, &directory, &results);
        let github = &users["a"].github;
        assert_eq!(github.name, "Ahn");
        assert_eq!(github.id, "7");
        assert_eq!(github.login, "a");
        assert_eq!(github.avatar_url, "https://avatars.example.com/u/7");
        assert_eq!(github.html_url, "https://github.com/a");
        for empty in [
            &github.url,
            &github.company,
            &github.blog,
            &github.location,
            &github.email,
            &github.bio,
        ] {
            assert!(empty.is_empty());
        }
        assert_eq!(github.followers, 0);
        assert_eq!(github.following, 0);
    }

    #[test]
    fn profile_fields_used_when_present() {
        let index = index_of(vec![vec![pull("https://x/1", "a", 7)]]);
        let directory = ProfileDirectory::build(&[profile("a", 7)]);
        let results = vec![result("Ahn", None, "https://x/1", 10)];

        let users = merge_users(&index, &directory, &results);
        let github = &users["a"].github;
        assert_eq!(github.name, "a (real name)");
        assert_eq!(github.company, "Acme");
        assert_eq!(github.followers, 10);
        // Top-level name still comes from the grading result.
        assert_eq!(users["a"].name, "Ahn");
    }

    #[test]
    fn null_profile_name_falls_back_to_result_name() {
        let mut p = profile("a", 7);
        p.name = None;
        p.bio = None;
        let index = index_of(vec![vec![pull("https://x/1", "a", 7)]]);
        let directory = ProfileDirectory::build(&[p]);
        let results = vec![result("Ahn", None, "https://x/1", 10)];

        let users = merge_users(&index, &directory, &results);
        assert_eq!(users["a"].github.name, "Ahn");
        assert_eq!(users["a"].github.bio, "");
        // Non-null profile fields still win.
        assert_eq!(users["a"].github.followers, 10);
    }

    #[test]
    fn same_login_appends_not_duplicates() {
        let index = index_of(vec![vec![
            pull("https://x/1", "a", 1),
            pull("https://x/2", "a", 1),
        ]]);
        let directory = ProfileDirectory::build(&[]);
        let results = vec![
            result("A", None, "https://x/1", 10),
            result("A", None, "https://x/2", 20),
        ];

        let users = merge_users(&index, &directory, &results);
        assert_eq!(users.len(), 1);
        assert_eq!(users["a"].assignments.len(), 2);
    }

    #[test]
    fn same_url_twice_appends_two_entries_to_one_user() {
        let index = index_of(vec![vec![pull("https://x/1", "a", 1)]]);
        let directory = ProfileDirectory::build(&[]);
        let results = vec![
            result("A", None, "https://x/1", 10),
            result("A", None, "https://x/1", 20),
        ];

        let users = merge_users(&index, &directory, &results);
        assert_eq!(users.len(), 1);
        assert_eq!(users["a"].assignments.len(), 2);
        assert_eq!(users["a"].assignments[0].extra["score"], 10);
        assert_eq!(users["a"].assignments[1].extra["score"], 20);
    }

    #[test]
    fn order_preservation_filtered_subsequence() {
        let index = index_of(vec![vec![
            pull("https://x/1", "a", 1),
            pull("https://x/3", "a", 1),
        ]]);
        let directory = ProfileDirectory::build(&[]);
        let results = vec![
            result("A", None, "https://x/1", 1),
            result("A", None, "https://x/2", 2), // unresolvable
            result("A", None, "https://x/3", 3),
        ];

        let users = merge_users(&index, &directory, &results);
        let scores: Vec<i64> = users["a"]
            .assignments
            .iter()
            .map(|a| a.extra["score"].as_i64().unwrap())
            .collect();
        assert_eq!(scores, vec![1, 3]);
    }

    #[test]
    fn idempotent_overwrite_doubles_assignments() {
        let index = index_of(vec![vec![pull("https://x/1", "a", 1)]]);
        let directory = ProfileDirectory::build(&[]);
        let once = vec![result("A", None, "https://x/1", 10)];
        let twice: Vec<_> = once.iter().chain(once.iter()).cloned().collect();

        let users = merge_users(&index, &directory, &twice);
        // Documents current behavior: no deduplication across runs.
        assert_eq!(users["a"].assignments.len(), 2);
    }

    #[test]
    fn stripped_record_has_no_name_feedback_assignment() {
        let index = index_of(vec![vec![pull("https://x/1", "a", 1)]]);
        let directory = ProfileDirectory::build(&[]);
        let results = vec![result("A", Some("nice"), "https://x/1", 10)];

        let users = merge_users(&index, &directory, &results);
        let record = serde_json::to_value(&users["a"].assignments[0]).unwrap();
        assert!(record.get("name").is_none());
        assert!(record.get("feedback").is_none());
        assert!(record.get("assignment").is_none());
        assert_eq!(record["url"], "https://x/1");
        assert_eq!(record["score"], 10);
    }
}
