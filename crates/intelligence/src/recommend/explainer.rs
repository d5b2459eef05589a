//! Generate human-readable explanations for recommendations.

use crate::catalog::{RecommendationCategory, RecommendationTemplate};
use crate::config::Locale;
use crate::snapshot::{CycleRegularity, PainTrend, UserDataSnapshot};
use crate::stats::round1;
use crate::types::CyclePhase;

const HIGH_PAIN: f64 = 7.0;
const MODERATE_PAIN: f64 = 4.0;
const LOW_EFFICIENCY: f64 = 60.0;
const REDUCED_EFFICIENCY: f64 = 80.0;
const MAX_CLAUSES: usize = 3;

/// One observation about the user that can justify a recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Clause {
    HighPain(f64),
    ModeratePain(f64),
    PainRising,
    PainEasing,
    PainErratic,
    Phase(CyclePhase),
    LowEfficiency(f64),
    ReducedEfficiency(f64),
    IrregularCycle,
}

impl Clause {
    fn render(self, locale: Locale) -> String {
        match (locale, self) {
            (Locale::En, Clause::HighPain(p)) => format!("your pain level is high ({p}/10)"),
            (Locale::En, Clause::ModeratePain(p)) => {
                format!("you are experiencing moderate pain ({p}/10)")
            }
            (Locale::En, Clause::PainRising) => "your pain has been trending upward".to_string(),
            (Locale::En, Clause::PainEasing) => "your pain has been easing".to_string(),
            (Locale::En, Clause::PainErratic) => "your pain levels vary widely".to_string(),
            (Locale::En, Clause::Phase(phase)) => format!("you are in the {phase} phase"),
            (Locale::En, Clause::LowEfficiency(e)) => format!("your work efficiency is low ({e}%)"),
            (Locale::En, Clause::ReducedEfficiency(e)) => {
                format!("your work efficiency is below its best ({e}%)")
            }
            (Locale::En, Clause::IrregularCycle) => "your cycle looks irregular".to_string(),
            (Locale::Zh, Clause::HighPain(p)) => format!("您的疼痛程度较高（{p}/10）"),
            (Locale::Zh, Clause::ModeratePain(p)) => format!("您正经历中度疼痛（{p}/10）"),
            (Locale::Zh, Clause::PainRising) => "疼痛呈上升趋势".to_string(),
            (Locale::Zh, Clause::PainEasing) => "疼痛正在缓解".to_string(),
            (Locale::Zh, Clause::PainErratic) => "疼痛程度波动较大".to_string(),
            (Locale::Zh, Clause::Phase(phase)) => format!("您目前处于{}", zh_phase(phase)),
            (Locale::Zh, Clause::LowEfficiency(e)) => format!("您的工作效率较低（{e}%）"),
            (Locale::Zh, Clause::ReducedEfficiency(e)) => format!("您的工作效率有所下降（{e}%）"),
            (Locale::Zh, Clause::IrregularCycle) => "您的周期不太规律".to_string(),
        }
    }
}

fn zh_phase(phase: CyclePhase) -> &'static str {
    match phase {
        CyclePhase::Menstrual => "月经期",
        CyclePhase::Follicular => "卵泡期",
        CyclePhase::Ovulation => "排卵期",
        CyclePhase::Luteal => "黄体期",
    }
}

/// Which snapshot dimensions a template speaks to.
struct Focus {
    pain: bool,
    efficiency: bool,
    phase: bool,
    cycle: bool,
}

impl Focus {
    fn of(template: &RecommendationTemplate) -> Self {
        let conditions = &template.conditions;
        let general = conditions.is_unconditioned();
        let category = template.category;
        Self {
            pain: general || conditions.pain_level.is_some() || category.is_pain_focused(),
            efficiency: general
                || conditions.efficiency.is_some()
                || category == RecommendationCategory::WorkAdjustment,
            phase: general
                || !conditions.phases.is_empty()
                || matches!(
                    category,
                    RecommendationCategory::Nutrition | RecommendationCategory::Exercise
                ),
            cycle: general
                || matches!(
                    category,
                    RecommendationCategory::Medical | RecommendationCategory::Education
                ),
        }
    }
}

fn clauses_for(template: &RecommendationTemplate, snapshot: &UserDataSnapshot) -> Vec<Clause> {
    let focus = Focus::of(template);
    let mut clauses = Vec::new();

    if focus.pain {
        let pain = round1(snapshot.current_pain());
        if pain >= HIGH_PAIN {
            clauses.push(Clause::HighPain(pain));
        } else if pain >= MODERATE_PAIN {
            clauses.push(Clause::ModeratePain(pain));
        }
        match snapshot.period.pain_trend {
            PainTrend::Increasing => clauses.push(Clause::PainRising),
            PainTrend::Decreasing => clauses.push(Clause::PainEasing),
            PainTrend::Irregular => clauses.push(Clause::PainErratic),
            PainTrend::Stable => {}
        }
    }
    if focus.phase {
        if let Some(phase) = snapshot.current_phase() {
            clauses.push(Clause::Phase(phase));
        }
    }
    if focus.efficiency {
        let efficiency = round1(snapshot.current_efficiency());
        if efficiency < LOW_EFFICIENCY {
            clauses.push(Clause::LowEfficiency(efficiency));
        } else if efficiency < REDUCED_EFFICIENCY {
            clauses.push(Clause::ReducedEfficiency(efficiency));
        }
    }
    // Irregularity needs at least two measured cycles to mean anything.
    if focus.cycle
        && snapshot.period.regularity == CycleRegularity::Irregular
        && snapshot.period.cycle_lengths.len() >= 2
    {
        clauses.push(Clause::IrregularCycle);
    }

    clauses.truncate(MAX_CLAUSES);
    clauses
}

fn join_clauses(parts: &[String], locale: Locale) -> String {
    match locale {
        Locale::Zh => parts.join("，"),
        Locale::En => match parts {
            [] => String::new(),
            [only] => only.clone(),
            [init @ .., last] => format!("{} and {}", init.join(", "), last),
        },
    }
}

/// Justification for recommending `template` to the user behind `snapshot`.
pub fn generate_reason(
    template: &RecommendationTemplate,
    snapshot: &UserDataSnapshot,
    locale: Locale,
) -> String {
    let parts: Vec<String> = clauses_for(template, snapshot)
        .into_iter()
        .map(|clause| clause.render(locale))
        .collect();

    if parts.is_empty() {
        return match locale {
            Locale::En => "Recommended to support your overall cycle health.".to_string(),
            Locale::Zh => "推荐此内容，帮助您维护整体周期健康。".to_string(),
        };
    }

    let joined = join_clauses(&parts, locale);
    match locale {
        Locale::En => format!("Recommended because {joined}."),
        Locale::Zh => format!("由于{joined}，为您推荐此内容。"),
    }
}

/// Justification used by the cold-start path, where nothing is known yet.
pub fn cold_start_reason(locale: Locale) -> String {
    match locale {
        Locale::En => {
            "A well-rated starting point while we learn more about your cycle.".to_string()
        }
        Locale::Zh => "适合大多数人的基础建议，记录更多数据后将为您提供个性化推荐。".to_string(),
    }
}

/// Generate a summary of multiple recommendations.
pub fn summarize_recommendations(count: usize, categories: usize, personalized: bool) -> String {
    let mut parts = Vec::new();

    parts.push(format!("Found {} recommendations", count));

    if categories > 0 {
        parts.push(format!("across {} categories", categories));
    }

    if personalized {
        parts.push("tailored to your recent history".to_string());
    } else {
        parts.push("from the starter set".to_string());
    }

    parts.join(", ")
}
