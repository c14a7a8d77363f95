//! Core merge/aggregation pipeline for Courseboard.
//!
//! Reconciles three heterogeneous record sets keyed by different identifiers
//! (pull URL, login, numeric id) into a single ranked per-user view:
//! - [`pull_index`] — URL-keyed index over all fetched pulls
//! - [`profiles`] — login-keyed profile directory
//! - [`merge`] — the assignment merge engine
//! - [`feedback`] / [`details`] — secondary URL-keyed maps
//! - [`ranking`] — the annotator contract and default scorer
//! - [`pipeline`] — end-to-end snapshot build

pub mod details;
pub mod feedback;
pub mod merge;
pub mod pipeline;
pub mod profiles;
pub mod pull_index;
pub mod ranking;

#[cfg(test)]
pub(crate) mod testutil;

pub use details::build_assignment_details;
pub use feedback::extract_feedbacks;
pub use merge::{merge_users, new_merged_user};
pub use pipeline::build_snapshot;
pub use profiles::ProfileDirectory;
pub use pull_index::{PullIndex, distinct_logins};
pub use ranking::{CompletionRanking, RankingAnnotator};
