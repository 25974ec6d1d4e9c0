//! Categorical subjective/plan text.
//!
//! Each field is picked from its candidates with the rule engine's weights
//! (times a progress bias) using exactly one reserved draw, then checked
//! against what actually moved this visit.

use meridian_core::models::clinical::{FrequencyLevel, SymptomChange};
use meridian_core::rules::{RuleContext, RuleEngine};
use meridian_core::whitelist::OptionWhitelist;
use tracing::debug;

use crate::rng::{SeededGenerator, VisitDraw};

pub const POSITIVE_REASONS: [&str; 5] = [
    "can move joint more freely and with less pain",
    "physical activity no longer causes distress",
    "reduced level of pain",
    "continuous treatment",
    "sleep quality improved",
];

pub const NEGATIVE_REASONS: [&str; 5] = [
    "did not have good rest",
    "weather change",
    "prolonged sitting at work",
    "did not do the home exercise as instructed",
    "stopped treatment for a while",
];

pub const NEUTRAL_REASONS: [&str; 3] = [
    "maintaining regular treatment",
    "no significant change in daily activity",
    "continuous treatment",
];

pub const POSITIVE_CONNECTORS: [&str; 3] = ["because of", "as a result of", "thanks to"];
pub const NEGATIVE_CONNECTORS: [&str; 2] = ["due to", "because of"];
pub const NEUTRAL_CONNECTORS: [&str; 2] = ["with", "while"];

/// Plan focus phrases and whether they suit the early part of the course.
pub const TREATMENT_FOCUS: [(&str, bool); 5] = [
    ("continue to emphasize reducing pain and inflammation", true),
    ("relieve muscle tightness and spasm", true),
    ("improve range of motion", false),
    ("strengthen muscles and improve function", false),
    ("promote circulation and relieve pain", true),
];

/// Bias factor applied to options that match the course phase.
const PHASE_BIAS: f64 = 1.5;
/// Pain drop that turns a sampled exacerbation into an improvement.
const MEANINGFUL_PAIN_DROP: f64 = 0.5;

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Sample one candidate. Always consumes exactly one draw; returns `None`
/// when no candidate carries a positive weight.
pub fn weighted_pick(
    rng: &mut SeededGenerator,
    slot: VisitDraw,
    rules: &dyn RuleEngine,
    field: &str,
    candidates: &[String],
    context: &RuleContext<'_>,
    bias: impl Fn(&str) -> f64,
) -> Option<String> {
    let scored: Vec<(String, f64)> = if candidates.is_empty() {
        Vec::new()
    } else {
        rules
            .weighted_options(field, candidates, context)
            .into_iter()
            .filter(|w| candidates.contains(&w.option))
            .map(|w| {
                let weight = w.weight * bias(&w.option);
                (w.option, weight)
            })
            .filter(|(_, weight)| weight.is_finite() && *weight > 0.0)
            .collect()
    };
    let total: f64 = scored.iter().map(|(_, w)| w).sum();
    if scored.is_empty() || total <= 0.0 {
        rng.reserve(slot);
        debug!(field, "no weighted option; using default");
        return None;
    }

    let mut remaining = rng.next_f64() * total;
    for (option, weight) in &scored {
        if remaining < *weight {
            return Some(option.clone());
        }
        remaining -= weight;
    }
    scored.last().map(|(option, _)| option.clone())
}

/// Whitelisted options for `field`, or `defaults` when the templates don't
/// define it.
pub fn candidates_for(
    whitelist: &dyn OptionWhitelist,
    field: &str,
    defaults: &[&str],
) -> Vec<String> {
    match whitelist.options_for_field(field) {
        Some(options) if !options.is_empty() => options.to_vec(),
        _ => owned(defaults),
    }
}

/// Candidate symptom-change phrases.
pub fn symptom_change_candidates(whitelist: &dyn OptionWhitelist, field: &str) -> Vec<String> {
    let defaults: Vec<&str> = SymptomChange::ALL.iter().map(SymptomChange::phrase).collect();
    candidates_for(whitelist, field, &defaults)
}

/// Improvement grows likelier as the course progresses; exacerbation fades.
pub fn symptom_change_bias(progress: f64) -> impl Fn(&str) -> f64 {
    move |option: &str| match SymptomChange::classify(option) {
        Some(SymptomChange::Improvement) => 1.0 + progress,
        Some(SymptomChange::Similar) => 1.0 - 0.5 * progress,
        Some(SymptomChange::Exacerbate) => 0.3 * (1.0 - progress),
        None => 1.0,
    }
}

/// What moved this visit, as seen by the symptom-change guards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evidence {
    pub pain_delta: f64,
    /// An objective finding moved (ROM, strength, tightness, tenderness or
    /// spasm).
    pub objective_moved: bool,
    pub rebounding: bool,
    pub progress: f64,
}

impl Evidence {
    pub fn any_positive(&self) -> bool {
        self.pain_delta > 0.0 || self.objective_moved
    }
}

/// Reconcile the sampled category with the visit's evidence.
pub fn guard_symptom_change(
    sampled: SymptomChange,
    evidence: &Evidence,
    late_progress: f64,
) -> SymptomChange {
    let mut change = sampled;
    if change == SymptomChange::Improvement && !evidence.any_positive() {
        change = SymptomChange::Similar;
    }
    if change == SymptomChange::Exacerbate {
        if evidence.pain_delta >= MEANINGFUL_PAIN_DROP {
            change = SymptomChange::Improvement;
        } else if !evidence.rebounding {
            change = SymptomChange::Similar;
        }
    }
    if evidence.progress > late_progress && evidence.any_positive() {
        change = SymptomChange::Improvement;
    }
    change
}

fn reason_pool(change: SymptomChange) -> &'static [&'static str] {
    match change {
        SymptomChange::Improvement => &POSITIVE_REASONS,
        SymptomChange::Exacerbate => &NEGATIVE_REASONS,
        SymptomChange::Similar => &NEUTRAL_REASONS,
    }
}

fn connector_pool(change: SymptomChange) -> &'static [&'static str] {
    match change {
        SymptomChange::Improvement => &POSITIVE_CONNECTORS,
        SymptomChange::Exacerbate => &NEGATIVE_CONNECTORS,
        SymptomChange::Similar => &NEUTRAL_CONNECTORS,
    }
}

/// Candidates for a category-pooled field: whitelisted options that belong
/// to the category's pool, or the whole pool when none do.
fn pooled_candidates(
    whitelist: &dyn OptionWhitelist,
    field: &str,
    pool: &[&str],
) -> Vec<String> {
    let allowed: Vec<String> = whitelist
        .options_for_field(field)
        .unwrap_or_default()
        .iter()
        .filter(|option| pool.contains(&option.as_str()))
        .cloned()
        .collect();
    if allowed.is_empty() { owned(pool) } else { allowed }
}

pub fn reason_candidates(
    whitelist: &dyn OptionWhitelist,
    field: &str,
    change: SymptomChange,
) -> Vec<String> {
    pooled_candidates(whitelist, field, reason_pool(change))
}

pub fn connector_candidates(
    whitelist: &dyn OptionWhitelist,
    field: &str,
    change: SymptomChange,
) -> Vec<String> {
    pooled_candidates(whitelist, field, connector_pool(change))
}

/// Accept `picked` when it belongs to `candidates`, else rotate through
/// them by visit index.
pub fn resolve_pooled(picked: Option<String>, candidates: &[String], visit_index: u32) -> String {
    match picked {
        Some(option) if candidates.contains(&option) => option,
        _ => candidates
            .get(visit_index as usize % candidates.len().max(1))
            .cloned()
            .unwrap_or_default(),
    }
}

pub fn treatment_focus_candidates(whitelist: &dyn OptionWhitelist, field: &str) -> Vec<String> {
    let defaults: Vec<&str> = TREATMENT_FOCUS.iter().map(|(text, _)| *text).collect();
    candidates_for(whitelist, field, &defaults)
}

/// Early-course phrases are favored before the halfway point, the rest
/// after it. Whitelisted phrases outside the table are unbiased.
pub fn treatment_focus_bias(progress: f64) -> impl Fn(&str) -> f64 {
    let early_phase = progress < 0.5;
    move |option: &str| match TREATMENT_FOCUS.iter().find(|(text, _)| *text == option) {
        Some((_, early)) if *early == early_phase => PHASE_BIAS,
        _ => 1.0,
    }
}

/// Pain-frequency phrase for `level`: the best-weighted whitelisted option
/// naming the level, or the canonical phrase. Consumes no draws.
pub fn frequency_phrase(
    level: FrequencyLevel,
    whitelist: &dyn OptionWhitelist,
    rules: &dyn RuleEngine,
    field: &str,
    context: &RuleContext<'_>,
) -> String {
    let label = level.label().to_ascii_lowercase();
    let matching: Vec<String> = whitelist
        .options_for_field(field)
        .unwrap_or_default()
        .iter()
        .filter(|option| option.to_ascii_lowercase().starts_with(&label))
        .cloned()
        .collect();
    if matching.is_empty() {
        return level.phrase().to_string();
    }

    let mut best: Option<(String, f64)> = None;
    for weighted in rules.weighted_options(field, &matching, context) {
        if !matching.contains(&weighted.option) || !weighted.weight.is_finite() {
            continue;
        }
        if best.as_ref().is_none_or(|(_, w)| weighted.weight > *w) {
            best = Some((weighted.option, weighted.weight));
        }
    }
    best.map_or_else(|| matching[0].clone(), |(option, _)| option)
}
