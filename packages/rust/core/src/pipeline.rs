//! End-to-end snapshot build: pulls + profiles + grading results → snapshot.
//!
//! Single-threaded and synchronous: all inputs are fully materialized before
//! this runs, and the build performs no I/O and has no suspension points.
//! Grading results are processed strictly in input order, which fixes both
//! assignment-append order per user and last-write-wins key resolution.

use tracing::{info, instrument};

use courseboard_shared::{AssignmentResult, ProfileRecord, PullRequestRecord, Snapshot};

use crate::details::build_assignment_details;
use crate::feedback::extract_feedbacks;
use crate::merge::merge_users;
use crate::profiles::ProfileDirectory;
use crate::pull_index::PullIndex;
use crate::ranking::RankingAnnotator;

/// Build the consolidated snapshot from in-memory inputs.
///
/// `repo_pulls` holds one record sequence per tracked repository in fixed
/// caller-supplied order; `repo_count` is the ranking denominator (normally
/// `repo_pulls.len()`, but supplied separately since repositories with no
/// stored pulls still count toward completion).
#[instrument(skip_all, fields(
    repos = repo_pulls.len(),
    profiles = profiles.len(),
    results = results.len(),
))]
pub fn build_snapshot(
    repo_pulls: &[Vec<PullRequestRecord>],
    profiles: &[ProfileRecord],
    results: &[AssignmentResult],
    repo_count: usize,
    annotator: &dyn RankingAnnotator,
) -> Snapshot {
    let index = PullIndex::build(repo_pulls);
    let directory = ProfileDirectory::build(profiles);

    let users = merge_users(&index, &directory, results);
    let feedbacks = extract_feedbacks(results);
    let assignment_details = build_assignment_details(&index);

    let ranked = annotator.annotate(users, repo_count);

    info!(
        pulls = index.len(),
        users = ranked.len(),
        feedbacks = feedbacks.len(),
        details = assignment_details.len(),
        "snapshot built"
    );

    Snapshot {
        users: ranked,
        feedbacks,
        assignment_details,
    }
}
