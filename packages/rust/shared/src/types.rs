//! Core domain types for the Courseboard data pipeline.
//!
//! Three upstream record sets (pull requests, public profiles, grading
//! results) are joined into one consolidated [`Snapshot`]. The JSON shape of
//! the snapshot is the contract with the downstream presentation layer, so
//! field names and nesting here are load-bearing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pull requests
// ---------------------------------------------------------------------------

/// The author block embedded in every pull request record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullAuthor {
    /// Numeric GitHub user id.
    pub id: u64,
    /// GitHub login (join key into the profile directory).
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// One pull request as fetched from the code-hosting platform.
///
/// `html_url` is the unique join key used by the pull index; records are
/// immutable after fetch. Unknown upstream fields are ignored on deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub id: u64,
    /// Unique join key across all repositories.
    pub html_url: String,
    pub user: PullAuthor,
    pub title: String,
    /// PR description — null for empty descriptions upstream.
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Public profile attributes for one contributor, keyed by `login`.
///
/// A contributor may have no profile record at all; individual fields may
/// also be null upstream. Both cases fall back to pull-derived or empty
/// values during the merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Join key.
    pub login: String,
    pub name: Option<String>,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    pub url: String,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
}

// ---------------------------------------------------------------------------
// Assignment results
// ---------------------------------------------------------------------------

/// Reference from a grading result to the pull request it was graded on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRef {
    /// Join key into the pull index.
    pub url: String,
}

/// One grading outcome for a single (user, assignment) pair.
///
/// The grading backend attaches a variable set of score fields per
/// assignment; they are carried opaquely via `extra` and re-emitted on the
/// merged user's assignment history unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResult {
    /// Participant display name as registered with the course backend.
    pub name: String,
    /// Instructor feedback text, if any was left.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub assignment: AssignmentRef,
    /// Opaque per-assignment score fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Merged users
// ---------------------------------------------------------------------------

/// The `github` block of a merged user.
///
/// Every field has a deterministic fallback when no profile record exists
/// for the login: `name`/`id`/`login`/`avatar_url`/`html_url` come from the
/// pull request (or the assignment result's name), the remaining string
/// fields default to empty, and the counters default to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubInfo {
    pub name: String,
    /// Stringified numeric id when derived from the pull author.
    pub id: String,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    pub url: String,
    pub company: String,
    pub blog: String,
    pub location: String,
    pub email: String,
    pub bio: String,
    pub followers: u64,
    pub following: u64,
}

/// An assignment attached to a merged user: the grading result with `name`,
/// `feedback` and `assignment` stripped, plus a flat `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    pub url: String,
}

/// The unified per-contributor record, keyed internally by the pull-request
/// author's login. Created on the first grading result that resolves to a
/// known pull, then appended to for every later result of the same login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedUser {
    pub name: String,
    pub github: GithubInfo,
    /// Assignment history in original processing order.
    pub assignments: Vec<AssignmentRecord>,
}

/// A merged user annotated by the ranking step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedUser {
    #[serde(flatten)]
    pub user: MergedUser,
    /// 1-based dense rank (ties share a rank).
    pub rank: usize,
    /// Assignment-completion ratio over the tracked repository count.
    pub score: f64,
    /// Percentage of users ranked at or below this one.
    pub percentile: f64,
}

// ---------------------------------------------------------------------------
// Secondary maps
// ---------------------------------------------------------------------------

/// Instructor feedback for one assignment URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub name: String,
    pub feedback: String,
}

/// Flattened per-pull detail record, one per known pull regardless of merge
/// status. Uses camelCase on the wire, unlike the raw pull records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetail {
    pub id: u64,
    /// Author login.
    pub user: String,
    pub title: String,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The consolidated output structure handed to the snapshot writer.
///
/// This is the sole contract with the downstream consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// login → ranked merged user.
    pub users: BTreeMap<String, RankedUser>,
    /// assignment URL → instructor feedback.
    pub feedbacks: BTreeMap<String, Feedback>,
    /// pull URL → flattened pull detail.
    #[serde(rename = "assignmentDetails")]
    pub assignment_details: BTreeMap<String, AssignmentDetail>,
}
