//! Treatment goals: derivation from the intake and clamping of explicit ones.

use meridian_core::models::clinical::{Chronicity, SeverityLevel};
use meridian_core::models::grading::snap_half;
use meridian_core::models::request::{GoalTriple, TreatmentGoals};
use meridian_core::models::schedule::Dimension;

use crate::goal_path::GoalInput;

/// Upper end of each dimension's grade scale.
pub fn grade_ceiling(dimension: Dimension) -> u8 {
    match dimension {
        Dimension::SymptomScale => 10,
        Dimension::Tenderness | Dimension::Spasm => 4,
        Dimension::AdlPrimary
        | Dimension::AdlSecondary
        | Dimension::Tightness
        | Dimension::StrengthGrade => 5,
    }
}

fn triple(start: u8, st: u8, lt: u8) -> GoalTriple {
    GoalTriple::new(f64::from(start), f64::from(st), f64::from(lt))
}

/// Derive goals from the intake when none are given.
///
/// Chronic courses aim for a smaller pain reduction; grade goals depend only
/// on the severity band.
pub fn derive_goals(
    severity: SeverityLevel,
    start_pain: f64,
    chronicity: Chronicity,
    pain_floor: f64,
) -> TreatmentGoals {
    let r = severity.rank();
    let (st_ratio, lt_ratio) = if chronicity.is_chronic() {
        (0.75, 0.45)
    } else {
        (0.6, 0.3)
    };
    let st_pain = snap_half(start_pain * st_ratio).max(pain_floor).min(start_pain);
    let lt_pain = snap_half(start_pain * lt_ratio).max(pain_floor).min(st_pain);

    let tightness = r + 1;
    let tenderness = (r + 1).min(4);
    let spasm = r.clamp(1, 4);
    let symptom = 5 + r;
    let strength = 4 - r;
    let adl_primary = r + 1;
    let adl_secondary = r.max(1);

    TreatmentGoals {
        pain: GoalTriple::new(start_pain, st_pain, lt_pain),
        symptom_scale: triple(symptom, symptom - 2, symptom.saturating_sub(4).max(1)),
        tightness: triple(
            tightness,
            tightness.saturating_sub(1).max(1),
            tightness.saturating_sub(2).max(1),
        ),
        tenderness: triple(
            tenderness,
            tenderness.saturating_sub(2).max(1),
            tenderness.saturating_sub(3).max(1),
        ),
        spasm: triple(spasm, spasm - 1, spasm.saturating_sub(2)),
        strength_grade: triple(strength, (strength + 1).min(5), (strength + 2).min(5)),
        adl_primary: triple(
            adl_primary,
            adl_primary.saturating_sub(1).max(1),
            adl_primary.saturating_sub(2).max(1),
        ),
        adl_secondary: triple(
            adl_secondary,
            adl_secondary.saturating_sub(1).max(1),
            adl_secondary.saturating_sub(2).max(1),
        ),
    }
}

fn clamp_grade(triple: GoalTriple, ceiling: u8) -> GoalTriple {
    let clamp = |v: f64| v.round().clamp(0.0, f64::from(ceiling));
    GoalTriple::new(clamp(triple.start), clamp(triple.st), clamp(triple.lt))
}

/// Pull explicit goals into range: grades onto their scales, pain goals
/// within `[floor, start_pain]` and never above each other.
pub fn clamp_goals(goals: &TreatmentGoals, start_pain: f64, pain_floor: f64) -> TreatmentGoals {
    let st_pain = goals.pain.st.clamp(pain_floor, start_pain);
    let lt_pain = goals.pain.lt.clamp(pain_floor, st_pain);
    let grade = |dimension: Dimension| {
        clamp_grade(goals.for_dimension(dimension), grade_ceiling(dimension))
    };

    TreatmentGoals {
        pain: GoalTriple::new(start_pain, st_pain, lt_pain),
        symptom_scale: grade(Dimension::SymptomScale),
        tightness: grade(Dimension::Tightness),
        tenderness: grade(Dimension::Tenderness),
        spasm: grade(Dimension::Spasm),
        strength_grade: grade(Dimension::StrengthGrade),
        adl_primary: grade(Dimension::AdlPrimary),
        adl_secondary: grade(Dimension::AdlSecondary),
    }
}

/// Scheduler input for every goal-scheduled dimension.
pub fn goal_inputs(goals: &TreatmentGoals) -> Vec<GoalInput> {
    Dimension::ALL
        .into_iter()
        .map(|dimension| {
            let t = goals.for_dimension(dimension);
            GoalInput::new(dimension, t.start, t.st, t.lt)
        })
        .collect()
}
