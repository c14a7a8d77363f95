//! GitHub fetch collaborator for the Courseboard pipeline.
//!
//! Provides [`GithubClient`] — paginated pull-request listing per cohort
//! repository and public profile lookup per contributor login.

pub mod client;

pub use client::GithubClient;
