//! The catalog shipped with the engine.

use super::{NumericRange, RecommendationCategory as C, RecommendationTemplate, RecommendationType as T};
use crate::types::CyclePhase;

pub(super) const VERSION: &str = "builtin-2024.2";

pub(super) fn entries() -> Vec<RecommendationTemplate> {
    vec![
        // Always eligible
        RecommendationTemplate::new("heat-therapy-basics", T::Article, C::PainRelief, 85.0)
            .link("/articles/heat-therapy")
            .meta("reading_minutes", "4"),
        RecommendationTemplate::new("cycle-tracking-guide", T::Tool, C::Education, 80.0)
            .link("/tools/cycle-tracker"),
        RecommendationTemplate::new("balanced-cycle-nutrition", T::Article, C::Nutrition, 78.0)
            .link("/articles/cycle-nutrition")
            .meta("reading_minutes", "6"),
        RecommendationTemplate::new("sleep-hygiene-routine", T::Tip, C::Sleep, 75.0),
        RecommendationTemplate::new("gentle-stretching", T::Action, C::Exercise, 72.0)
            .meta("duration", "10 min"),
        RecommendationTemplate::new("hydration-reminder", T::Tip, C::SelfCare, 70.0),
        RecommendationTemplate::new("mood-journal", T::Tool, C::Emotional, 60.0)
            .link("/tools/mood-journal"),
        RecommendationTemplate::new("period-kit-checklist", T::Tip, C::Lifestyle, 55.0),
        // Pain-gated
        RecommendationTemplate::new("severe-pain-medical-guidance", T::Article, C::Medical, 95.0)
            .pain(NumericRange::between(7.0, 10.0))
            .link("/articles/severe-pain")
            .meta("urgency", "high"),
        RecommendationTemplate::new("when-to-see-a-doctor", T::Article, C::Medical, 88.0)
            .pain(NumericRange::at_least(8.0))
            .link("/articles/see-a-doctor"),
        RecommendationTemplate::new("pain-relief-breathing", T::Action, C::PainRelief, 90.0)
            .pain(NumericRange::between(6.0, 10.0))
            .meta("duration", "5 min"),
        RecommendationTemplate::new("analgesic-timing", T::Tip, C::Medical, 82.0)
            .pain(NumericRange::at_least(5.0)),
        RecommendationTemplate::new("heating-pad-timer", T::Tool, C::PainRelief, 84.0)
            .pain(NumericRange::at_least(4.0))
            .link("/tools/heat-timer"),
        RecommendationTemplate::new("acupressure-points", T::Action, C::PainRelief, 70.0)
            .pain(NumericRange::between(3.0, 7.0)),
        RecommendationTemplate::new("light-walk", T::Action, C::Exercise, 65.0)
            .pain(NumericRange::between(0.0, 3.0))
            .meta("duration", "20 min"),
        RecommendationTemplate::new("pain-position-sleep", T::Tip, C::Sleep, 71.0)
            .pain(NumericRange::at_least(5.0)),
        RecommendationTemplate::new("symptom-log-tool", T::Tool, C::Education, 68.0)
            .pain(NumericRange::at_least(6.0))
            .link("/tools/symptom-log"),
        // Work-impact gated
        RecommendationTemplate::new("workload-adjustment-plan", T::Scenario, C::WorkAdjustment, 90.0)
            .efficiency(NumericRange::at_most(60.0)),
        RecommendationTemplate::new("meeting-day-strategy", T::Scenario, C::WorkAdjustment, 80.0)
            .pain(NumericRange::at_least(5.0))
            .efficiency(NumericRange::at_most(70.0)),
        RecommendationTemplate::new("focus-block-technique", T::Tip, C::WorkAdjustment, 72.0)
            .efficiency(NumericRange::between(40.0, 80.0)),
        RecommendationTemplate::new("remote-work-request", T::Scenario, C::WorkAdjustment, 75.0)
            .efficiency(NumericRange::at_most(50.0))
            .link("/scenarios/remote-work"),
        RecommendationTemplate::new("peak-energy-planning", T::Tip, C::WorkAdjustment, 60.0)
            .efficiency(NumericRange::at_least(80.0)),
        RecommendationTemplate::new("stress-relief-meditation", T::Tool, C::Emotional, 77.0)
            .pain(NumericRange::at_least(4.0))
            .efficiency(NumericRange::at_most(70.0))
            .meta("duration", "8 min"),
        // Phase gated
        RecommendationTemplate::new("iron-rich-foods", T::Article, C::Nutrition, 76.0)
            .phases(&[CyclePhase::Menstrual]),
        RecommendationTemplate::new("menstrual-rest-day", T::Action, C::SelfCare, 78.0)
            .phases(&[CyclePhase::Menstrual])
            .pain(NumericRange::at_least(4.0)),
        RecommendationTemplate::new("follicular-strength-training", T::Action, C::Exercise, 68.0)
            .phases(&[CyclePhase::Follicular]),
        RecommendationTemplate::new("ovulation-energy-tips", T::Tip, C::Lifestyle, 62.0)
            .phases(&[CyclePhase::Ovulation]),
        RecommendationTemplate::new("luteal-craving-management", T::Article, C::Nutrition, 70.0)
            .phases(&[CyclePhase::Luteal]),
        RecommendationTemplate::new("premenstrual-mood-support", T::Scenario, C::Emotional, 74.0)
            .phases(&[CyclePhase::Luteal]),
        // Symptom gated
        RecommendationTemplate::new("bloating-relief-diet", T::Tip, C::Nutrition, 66.0)
            .symptoms(&["bloating"]),
        RecommendationTemplate::new("headache-management", T::Article, C::Medical, 73.0)
            .symptoms(&["headache"]),
    ]
}
