use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::clinical::{
    BodyPart, Chronicity, FrequencyLevel, InsuranceType, Laterality, SeverityLevel,
};
use crate::models::schedule::{Dimension, GoalSchedule};
use crate::models::visit::{SelectedMuscles, VisitState};

/// Start value plus short-term and long-term goals for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GoalTriple {
    pub start: f64,
    pub st: f64,
    pub lt: f64,
}

impl GoalTriple {
    pub fn new(start: f64, st: f64, lt: f64) -> Self {
        Self { start, st, lt }
    }
}

/// Goals for every trending dimension of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreatmentGoals {
    pub pain: GoalTriple,
    pub symptom_scale: GoalTriple,
    pub tightness: GoalTriple,
    pub tenderness: GoalTriple,
    pub spasm: GoalTriple,
    pub strength_grade: GoalTriple,
    pub adl_primary: GoalTriple,
    pub adl_secondary: GoalTriple,
}

impl TreatmentGoals {
    pub fn for_dimension(&self, dimension: Dimension) -> GoalTriple {
        match dimension {
            Dimension::SymptomScale => self.symptom_scale,
            Dimension::AdlPrimary => self.adl_primary,
            Dimension::AdlSecondary => self.adl_secondary,
            Dimension::Tightness => self.tightness,
            Dimension::Tenderness => self.tenderness,
            Dimension::Spasm => self.spasm,
            Dimension::StrengthGrade => self.strength_grade,
        }
    }
}

/// Everything needed to generate (or resume) a treatment course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GenerationRequest {
    pub body_part: BodyPart,
    pub laterality: Laterality,
    pub chronicity: Chronicity,
    pub severity: SeverityLevel,
    #[serde(default)]
    pub insurance: InsuranceType,
    pub start_pain: f64,
    pub tx_count: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seed: Option<u32>,
    /// First visit index to generate. Defaults to 1, or to the visit after
    /// the continuation's last visit.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start_visit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub continuation: Option<ContinuationState>,
    /// Explicit goals; derived from severity and start pain when absent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub goals: Option<TreatmentGoals>,
    #[serde(default)]
    pub diagnosis_patterns: Vec<String>,
}

impl GenerationRequest {
    /// A fresh course with neutral defaults for the optional fields.
    pub fn new(
        body_part: BodyPart,
        severity: SeverityLevel,
        start_pain: f64,
        tx_count: u32,
    ) -> Self {
        Self {
            body_part,
            laterality: Laterality::Bilateral,
            chronicity: Chronicity::Acute,
            severity,
            insurance: InsuranceType::None,
            start_pain,
            tx_count,
            seed: None,
            start_visit: None,
            continuation: None,
            goals: None,
            diagnosis_patterns: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_chronicity(mut self, chronicity: Chronicity) -> Self {
        self.chronicity = chronicity;
        self
    }

    pub fn with_goals(mut self, goals: TreatmentGoals) -> Self {
        self.goals = Some(goals);
        self
    }

    pub fn resuming(mut self, continuation: ContinuationState) -> Self {
        self.continuation = Some(continuation);
        self
    }
}

/// Running values of an in-progress course, enough to resume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContinuationState {
    /// Last completed visit.
    pub visit_index: u32,
    pub progress: f64,
    /// Pain at the course baseline (initial evaluation).
    pub baseline_pain: f64,
    pub pain: f64,
    pub pain_label: f64,
    pub severity: SeverityLevel,
    pub frequency: FrequencyLevel,
    pub symptom_scale: u8,
    pub tightness: u8,
    pub tenderness: u8,
    pub spasm: u8,
    pub adl_primary: u8,
    pub adl_secondary: u8,
    pub strength_grade_index: u8,
    pub rom_deficit: f64,
    pub strength_deficit: f64,
    pub muscles: SelectedMuscles,
    pub acupoints: Vec<String>,
    /// Dimensions shown rebounded on the captured visit; the next visit
    /// reverses them.
    #[serde(default)]
    pub rebounds: Vec<Dimension>,
}

impl ContinuationState {
    /// Capture the running values after `visit`. A rebounding grade is
    /// recorded at its baseline, since the rebound reverses on the next visit.
    pub fn from_visit(visit: &VisitState) -> Self {
        let base = |dimension: Dimension, shown: u8| {
            if visit.is_rebounding(dimension) {
                shown.saturating_sub(1)
            } else {
                shown
            }
        };
        Self {
            visit_index: visit.visit_index,
            progress: visit.progress,
            baseline_pain: visit.pain_scale_current + visit.cumulative_pain_drop,
            pain: visit.pain_scale_current,
            pain_label: visit.pain_scale_label,
            severity: visit.severity,
            frequency: visit.frequency,
            symptom_scale: visit.symptom_scale,
            tightness: base(Dimension::Tightness, visit.tightness_grading),
            tenderness: base(Dimension::Tenderness, visit.tenderness_grading),
            spasm: base(Dimension::Spasm, visit.spasm_grading),
            adl_primary: visit.adl.primary_grade,
            adl_secondary: visit.adl.secondary_grade,
            strength_grade_index: visit.strength_grade_index,
            rom_deficit: visit.rom_deficit,
            strength_deficit: visit.strength_deficit,
            muscles: visit.muscles.clone(),
            acupoints: visit.acupoints.clone(),
            rebounds: visit.rebounds.clone(),
        }
    }
}

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GenerationResult {
    pub states: Vec<VisitState>,
    /// Seed actually used; record it to replay the run.
    pub used_seed: u32,
    /// Generator draws consumed by the run.
    pub draws: u64,
    pub schedule: GoalSchedule,
}
