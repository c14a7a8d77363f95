//! Ranking annotation over the merged user set.
//!
//! The merge pipeline depends only on the [`RankingAnnotator`] contract; the
//! scoring algorithm behind it is swappable and not part of the merge core.

use std::collections::BTreeMap;

use courseboard_shared::{MergedUser, RankedUser};

/// External contract consumed by the snapshot pipeline: annotate every
/// merged user with rank data, given the total tracked repository count as
/// the denominator for completion-based scoring.
///
/// Implementations must be pure and side-effect-free; the same input always
/// yields the same output, and the user set is passed through unchanged
/// apart from the added rank fields.
pub trait RankingAnnotator {
    fn annotate(
        &self,
        users: BTreeMap<String, MergedUser>,
        repo_count: usize,
    ) -> BTreeMap<String, RankedUser>;
}

/// Default annotator: ranks by assignment-completion ratio.
///
/// `score = assignments / repo_count`, users sorted by score descending with
/// login as the tie-breaker, dense 1-based ranks (equal scores share a
/// rank), and percentile = share of users scoring at or below.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionRanking;

impl RankingAnnotator for CompletionRanking {
    fn annotate(
        &self,
        users: BTreeMap<String, MergedUser>,
        repo_count: usize,
    ) -> BTreeMap<String, RankedUser> {
        let denominator = repo_count.max(1) as f64;
        let total = users.len();

        let mut scored: Vec<(String, MergedUser, f64)> = users
            .into_iter()
            .map(|(login, user)| {
                let score = user.assignments.len() as f64 / denominator;
                (login, user, score)
            })
            .collect();

        // Descending by score; BTreeMap iteration already yields logins in
        // ascending order, and the sort is stable, so ties stay login-sorted.
        scored.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

        let mut ranked = BTreeMap::new();
        let mut rank = 0;
        let mut prev_score = f64::NAN;
        let mut at_or_below = total;

        for (position, (login, user, score)) in scored.into_iter().enumerate() {
            if score != prev_score {
                rank += 1;
                prev_score = score;
                // All users from here on score at or below this value.
                at_or_below = total - position;
            }
            let percentile = if total == 0 {
                0.0
            } else {
                at_or_below as f64 / total as f64 * 100.0
            };
            ranked.insert(
                login,
                RankedUser {
                    user,
                    rank,
                    score,
                    percentile,
                },
            );
        }

        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::new_merged_user;
    use crate::testutil::{pull, result};
    use courseboard_shared::AssignmentRecord;

    fn user_with_assignments(login: &str, count: usize) -> MergedUser {
        let mut user = new_merged_user(
            &pull(&format!("https://x/{login}"), login, 1),
            &result(login, None, &format!("https://x/{login}"), 0),
            None,
        );
        for i in 0..count {
            user.assignments.push(AssignmentRecord {
                extra: serde_json::Map::new(),
                url: format!("https://x/{login}/{i}"),
            });
        }
        user
    }

    fn users_of(entries: &[(&str, usize)]) -> BTreeMap<String, MergedUser> {
        entries
            .iter()
            .map(|(login, n)| (login.to_string(), user_with_assignments(login, *n)))
            .collect()
    }

    #[test]
    fn scores_are_completion_ratios() {
        let ranked = CompletionRanking.annotate(users_of(&[("a", 5), ("b", 10)]), 10);
        assert_eq!(ranked["b"].score, 1.0);
        assert_eq!(ranked["a"].score, 0.5);
        assert_eq!(ranked["b"].rank, 1);
        assert_eq!(ranked["a"].rank, 2);
    }

    #[test]
    fn ties_share_a_dense_rank() {
        let ranked = CompletionRanking.annotate(users_of(&[("a", 3), ("b", 3), ("c", 1)]), 10);
        assert_eq!(ranked["a"].rank, 1);
        assert_eq!(ranked["b"].rank, 1);
        assert_eq!(ranked["c"].rank, 2);
        // Tied users also share a percentile.
        assert_eq!(ranked["a"].percentile, ranked["b"].percentile);
    }

    #[test]
    fn percentile_counts_users_at_or_below() {
        let ranked = CompletionRanking.annotate(users_of(&[("a", 4), ("b", 2), ("c", 1)]), 10);
        assert_eq!(ranked["a"].percentile, 100.0);
        assert!((ranked["b"].percentile - 200.0 / 3.0).abs() < 1e-9);
        assert!((ranked["c"].percentile - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn user_set_passes_through_unchanged() {
        let users = users_of(&[("a", 2)]);
        let ranked = CompletionRanking.annotate(users.clone(), 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked["a"].user, users["a"]);
    }

    #[test]
    fn zero_repo_count_does_not_divide_by_zero() {
        let ranked = CompletionRanking.annotate(users_of(&[("a", 2)]), 0);
        assert_eq!(ranked["a"].score, 2.0);
    }

    #[test]
    fn empty_user_set_yields_empty_output() {
        let ranked = CompletionRanking.annotate(BTreeMap::new(), 10);
        assert!(ranked.is_empty());
    }
}
