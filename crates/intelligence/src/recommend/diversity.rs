//! Category and type spread over the ranked candidates.
//!
//! Selection runs in three passes over the rank-ordered list:
//! 1. each required category group contributes its best candidate,
//! 2. the best candidate of each unseen category is added until
//!    `min_categories` distinct categories are present,
//! 3. the remaining candidates are taken greedily while they stay under the
//!    per-category and per-type caps and keep the diversity score above the
//!    configured floor.
//!
//! Seeded items bypass the type cap. The output keeps rank order.
//!
//! [`diversity_score`] never drops below 0.5, so the default floor of 0.3
//! never rejects a candidate. The per-category and per-type caps are what
//! actually bound the greedy pass; the floor only bites when configured
//! above 0.5.

use super::RecommendationItem;
use crate::catalog::RecommendationCategory;
use crate::config::DiversityConfig;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Rank order: score descending, then priority descending, then id.
pub(crate) fn by_rank(a: &RecommendationItem, b: &RecommendationItem) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.priority().total_cmp(&a.priority()))
        .then_with(|| a.id().cmp(b.id()))
}

/// How different `candidate` is from the items accepted so far (0.5 - 1.0).
///
/// Averages `1 - share/2` over the share of accepted items with the same type
/// and the share with the same category. An empty accepted set scores 1.0.
pub fn diversity_score(candidate: &RecommendationItem, accepted: &[&RecommendationItem]) -> f64 {
    if accepted.is_empty() {
        return 1.0;
    }
    let total = accepted.len() as f64;
    let same_type = accepted
        .iter()
        .filter(|i| i.template.rec_type == candidate.template.rec_type)
        .count() as f64;
    let same_category = accepted
        .iter()
        .filter(|i| i.category() == candidate.category())
        .count() as f64;
    let type_diversity = 1.0 - same_type / total * 0.5;
    let category_diversity = 1.0 - same_category / total * 0.5;
    (type_diversity + category_diversity) / 2.0
}

/// Pick at most `max_results` items from `candidates` under `config`.
///
/// `required` lists category groups that must be represented when any
/// candidate belongs to them, e.g. pain relief or medical for a user in
/// severe pain.
pub fn select_diverse(
    mut candidates: Vec<RecommendationItem>,
    config: &DiversityConfig,
    required: &[Vec<RecommendationCategory>],
    max_results: usize,
) -> Vec<RecommendationItem> {
    candidates.sort_by(by_rank);
    let mut taken = vec![false; candidates.len()];
    let mut count = 0usize;

    for group in required {
        if count >= max_results {
            break;
        }
        if let Some(index) = (0..candidates.len())
            .find(|&i| !taken[i] && group.contains(&candidates[i].category()))
        {
            taken[index] = true;
            count += 1;
        }
    }

    let mut categories: HashSet<RecommendationCategory> = (0..candidates.len())
        .filter(|&i| taken[i])
        .map(|i| candidates[i].category())
        .collect();
    while categories.len() < config.min_categories && count < max_results {
        let Some(index) = (0..candidates.len())
            .find(|&i| !taken[i] && !categories.contains(&candidates[i].category()))
        else {
            break;
        };
        taken[index] = true;
        categories.insert(candidates[index].category());
        count += 1;
    }
    let seeded = count;

    for index in 0..candidates.len() {
        if count >= max_results {
            break;
        }
        if taken[index] {
            continue;
        }
        let accepted: Vec<&RecommendationItem> = (0..candidates.len())
            .filter(|&i| taken[i])
            .map(|i| &candidates[i])
            .collect();
        let candidate = &candidates[index];
        let same_category = accepted
            .iter()
            .filter(|i| i.category() == candidate.category())
            .count();
        let same_type = accepted
            .iter()
            .filter(|i| i.template.rec_type == candidate.template.rec_type)
            .count();
        if same_category >= config.max_per_category || same_type >= config.max_per_type {
            continue;
        }
        if diversity_score(candidate, &accepted) < config.min_diversity {
            continue;
        }
        taken[index] = true;
        count += 1;
    }

    tracing::debug!(
        target: "cyclecare::diversity",
        candidates = candidates.len(),
        seeded,
        selected = count,
        "selected diverse recommendations"
    );

    let mut selected: Vec<RecommendationItem> = candidates
        .into_iter()
        .zip(taken)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect();
    selected.truncate(max_results);
    selected
}
