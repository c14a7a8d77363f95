//! Course backend fetch collaborator for the Courseboard pipeline.

pub mod client;

pub use client::CourseClient;
