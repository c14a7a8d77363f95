//! Shared types, error model, and configuration for Courseboard.
//!
//! This crate is the foundation depended on by all other Courseboard crates.
//! It provides:
//! - [`CourseboardError`] — the unified error type
//! - Domain types ([`PullRequestRecord`], [`ProfileRecord`], [`AssignmentResult`],
//!   [`MergedUser`], [`Snapshot`], …)
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CourseConfig, DefaultsConfig, GithubConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, validate_course_access, validate_repos,
};
pub use error::{CourseboardError, Result};
pub use types::{
    AssignmentDetail, AssignmentRecord, AssignmentRef, AssignmentResult, Feedback, GithubInfo,
    MergedUser, ProfileRecord, PullAuthor, PullRequestRecord, RankedUser, Snapshot,
};
