//! Prune catalog entries whose trigger conditions the snapshot does not meet.

use crate::catalog::{RecommendationConditions, RecommendationTemplate};
use crate::snapshot::UserDataSnapshot;
use std::collections::HashSet;

/// Whether every populated condition dimension holds for `snapshot`.
///
/// Ranges are inclusive. A phase requirement fails when the current phase is
/// unknown. Symptom requirements cannot be checked until symptom capture
/// exists upstream, so they never exclude an entry.
pub fn conditions_satisfied(
    conditions: &RecommendationConditions,
    snapshot: &UserDataSnapshot,
) -> bool {
    if let Some(range) = conditions.pain_level {
        if !range.contains(snapshot.current_pain()) {
            return false;
        }
    }
    if let Some(range) = conditions.efficiency {
        if !range.contains(snapshot.current_efficiency()) {
            return false;
        }
    }
    if !conditions.phases.is_empty() {
        let in_phase = snapshot
            .current_phase()
            .is_some_and(|phase| conditions.phases.contains(&phase));
        if !in_phase {
            return false;
        }
    }
    true
}

/// Entries that are not ignored and whose conditions hold, in catalog order.
pub fn filter_candidates<'a>(
    entries: &'a [RecommendationTemplate],
    snapshot: &UserDataSnapshot,
    ignored: &HashSet<String>,
) -> Vec<&'a RecommendationTemplate> {
    let candidates: Vec<&RecommendationTemplate> = entries
        .iter()
        .filter(|t| !ignored.contains(&t.id))
        .filter(|t| conditions_satisfied(&t.conditions, snapshot))
        .collect();
    tracing::debug!(
        target: "cyclecare::filter",
        catalog = entries.len(),
        ignored = ignored.len(),
        eligible = candidates.len(),
        "filtered catalog"
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{NumericRange, RecommendationCategory, RecommendationType};
    use crate::test_support::snapshot_with;
    use crate::types::CyclePhase;

    fn template(id: &str) -> RecommendationTemplate {
        RecommendationTemplate::new(
            id,
            RecommendationType::Tip,
            RecommendationCategory::SelfCare,
            50.0,
        )
    }

    #[test]
    fn test_unconditioned_always_passes() {
        let snapshot = snapshot_with(0.0, 100.0, None);
        assert!(conditions_satisfied(&RecommendationConditions::default(), &snapshot));
    }

    #[test]
    fn test_ranges_are_inclusive_and_open_ended() {
        let snapshot = snapshot_with(7.0, 60.0, None);
        assert!(conditions_satisfied(
            &template("a").pain(NumericRange::between(7.0, 10.0)).conditions,
            &snapshot
        ));
        assert!(conditions_satisfied(
            &template("b").efficiency(NumericRange::at_most(60.0)).conditions,
            &snapshot
        ));
        assert!(!conditions_satisfied(
            &template("c").efficiency(NumericRange::at_least(60.5)).conditions,
            &snapshot
        ));
    }

    #[test]
    fn test_all_dimensions_must_hold() {
        let snapshot = snapshot_with(8.0, 90.0, None);
        let conditions = template("a")
            .pain(NumericRange::at_least(5.0))
            .efficiency(NumericRange::at_most(70.0))
            .conditions;
        assert!(!conditions_satisfied(&conditions, &snapshot));
    }

    #[test]
    fn test_phase_membership() {
        let conditions = template("a")
            .phases(&[CyclePhase::Luteal, CyclePhase::Menstrual])
            .conditions;
        assert!(conditions_satisfied(
            &conditions,
            &snapshot_with(3.0, 80.0, Some(CyclePhase::Luteal))
        ));
        assert!(!conditions_satisfied(
            &conditions,
            &snapshot_with(3.0, 80.0, Some(CyclePhase::Ovulation))
        ));
        assert!(!conditions_satisfied(&conditions, &snapshot_with(3.0, 80.0, None)));
    }

    #[test]
    fn test_symptoms_do_not_exclude() {
        let conditions = template("a").symptoms(&["bloating"]).conditions;
        assert!(conditions_satisfied(&conditions, &snapshot_with(0.0, 100.0, None)));
    }

    #[test]
    fn test_ignored_entries_are_dropped() {
        let entries = vec![template("keep"), template("drop")];
        let ignored: HashSet<String> = ["drop".to_string()].into_iter().collect();
        let snapshot = snapshot_with(2.0, 90.0, None);
        let kept: Vec<_> = filter_candidates(&entries, &snapshot, &ignored)
            .into_iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(kept, vec!["keep"]);
    }
}
