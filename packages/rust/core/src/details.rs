//! Flattened per-pull detail records.

use std::collections::BTreeMap;

use courseboard_shared::AssignmentDetail;

use crate::pull_index::PullIndex;

/// Build the URL-keyed detail map from the pull index.
///
/// One entry per known pull regardless of merge or assignment status: this
/// map is a superset view of all fetched pulls, not filtered by
/// participation.
pub fn build_assignment_details(index: &PullIndex) -> BTreeMap<String, AssignmentDetail> {
    index
        .pulls()
        .map(|pull| {
            (
                pull.html_url.clone(),
                AssignmentDetail {
                    id: pull.id,
                    user: pull.user.login.clone(),
                    title: pull.title.clone(),
                    body: pull.body.clone(),
                    created_at: pull.created_at,
                    updated_at: pull.updated_at,
                    url: pull.html_url.clone(),
                },
            )
        })
        .collect()
}
