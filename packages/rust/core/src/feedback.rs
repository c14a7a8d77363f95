//! Instructor feedback extraction.

use std::collections::BTreeMap;

use courseboard_shared::{AssignmentResult, Feedback};

/// Derive the URL-keyed feedback map from the grading result stream.
///
/// Only results carrying both a non-empty assignment URL and non-empty
/// feedback text produce an entry. Later entries with the same URL overwrite
/// earlier ones, consistent with pull-index semantics. Feedback extraction
/// does not require the URL to resolve in the pull index.
pub fn extract_feedbacks(results: &[AssignmentResult]) -> BTreeMap<String, Feedback> {
    let mut feedbacks = BTreeMap::new();

    for result in results {
        let url = &result.assignment.url;
        let Some(text) = result.feedback.as_deref().filter(|t| !t.is_empty()) else {
            continue;
        };
        if url.is_empty() {
            continue;
        }
        feedbacks.insert(
            url.clone(),
            Feedback {
                name: result.name.clone(),
                feedback: text.to_string(),
            },
        );
    }

    feedbacks
}
