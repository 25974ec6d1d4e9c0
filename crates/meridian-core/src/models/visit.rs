use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::clinical::{FrequencyLevel, SeverityLevel, SymptomChange, Trend};
use crate::models::schedule::{Channel, Dimension};

/// Affected muscles for the three overlapping finding categories.
///
/// `spasm ⊆ tenderness ⊆ tightness` holds by construction. Lists are ordered
/// by selection: earlier entries are the more central findings and are kept
/// longest when the lists shrink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectedMuscles {
    pub tightness: Vec<String>,
    pub tenderness: Vec<String>,
    pub spasm: Vec<String>,
}

impl SelectedMuscles {
    pub fn counts(&self) -> MuscleCounts {
        MuscleCounts {
            tightness: self.tightness.len(),
            tenderness: self.tenderness.len(),
            spasm: self.spasm.len(),
        }
    }

    /// True when spasm ⊆ tenderness ⊆ tightness.
    pub fn is_nested(&self) -> bool {
        self.spasm.iter().all(|m| self.tenderness.contains(m))
            && self.tenderness.iter().all(|m| self.tightness.contains(m))
    }
}

/// List sizes per finding category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MuscleCounts {
    pub tightness: usize,
    pub tenderness: usize,
    pub spasm: usize,
}

impl MuscleCounts {
    /// True when every category in `self` fits within `max`.
    pub fn fits_within(&self, max: &MuscleCounts) -> bool {
        self.tightness <= max.tightness
            && self.tenderness <= max.tenderness
            && self.spasm <= max.spasm
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdlSnapshot {
    pub primary_grade: u8,
    pub secondary_grade: u8,
    pub primary_text: String,
    pub secondary_text: String,
    pub primary_activities: Vec<String>,
    pub secondary_activities: Vec<String>,
}

/// Measured range of one motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RomReading {
    pub motion: String,
    pub degrees: u32,
    pub normal_degrees: u32,
}

/// Per-visit trend of every tracked channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrendSet {
    pub symptom_scale: Trend,
    pub severity: Trend,
    pub frequency: Trend,
    pub adl: Trend,
    pub tightness: Trend,
    pub tenderness: Trend,
    pub spasm: Trend,
    pub rom: Trend,
    pub strength: Trend,
}

impl TrendSet {
    /// True when any objective finding moved this visit.
    pub fn objective_moved(&self) -> bool {
        [self.rom, self.strength, self.tightness, self.tenderness, self.spasm]
            .iter()
            .any(Trend::is_changed)
    }
}

/// Synthetic daily-life loads that bias pain noise upward. Each in `[0, 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DisruptionLoads {
    pub sleep: f64,
    pub workload: f64,
    pub weather: f64,
    pub adherence: f64,
}

impl DisruptionLoads {
    pub fn combined(&self) -> f64 {
        (self.sleep + self.workload + self.weather + self.adherence) / 4.0
    }
}

/// The assessment section's categorical phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentBlock {
    pub present: String,
    pub patient_change: String,
    pub what_changed: String,
    pub physical_change: String,
    pub finding_type: String,
    pub tolerated: String,
    pub response: String,
    pub adverse_effect: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubjectiveEcho {
    pub pain_moved: bool,
    pub frequency_moved: bool,
    pub adl_moved: bool,
    pub symptom_scale_moved: bool,
    pub symptom_change: SymptomChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ObjectiveEcho {
    pub rom: Trend,
    pub strength: Trend,
    pub tightness: Trend,
    pub tenderness: Trend,
    pub spasm: Trend,
    pub any_moved: bool,
}

/// Summary of what moved this visit on each side of the note, consumed by
/// the assessment-consistency checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SoaChain {
    pub subjective: SubjectiveEcho,
    pub objective: ObjectiveEcho,
    /// Whether the assessment used the strong ("improvement") wording.
    pub assessment_strong: bool,
}

/// One visit of a generated treatment course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VisitState {
    pub visit_index: u32,
    pub progress: f64,

    pub pain_scale_current: f64,
    pub pain_scale_label: f64,
    /// Drop of the current pain since the previous visit.
    pub pain_delta: f64,
    /// Drop of the current pain since the course baseline.
    pub cumulative_pain_drop: f64,
    pub severity: SeverityLevel,
    /// Symptom scale in tenths (7 = 70%).
    pub symptom_scale: u8,
    pub frequency: FrequencyLevel,
    pub frequency_phrase: String,

    pub tightness_grading: u8,
    pub tightness_text: String,
    pub tenderness_grading: u8,
    pub tenderness_text: String,
    pub spasm_grading: u8,
    pub spasm_text: String,
    pub muscles: SelectedMuscles,

    pub adl: AdlSnapshot,
    pub strength_grade_index: u8,
    pub strength_grade: String,
    pub rom_deficit: f64,
    pub strength_deficit: f64,
    pub rom_readings: Vec<RomReading>,
    pub trends: TrendSet,

    pub symptom_change: SymptomChange,
    pub reason: String,
    pub connector: String,
    pub treatment_focus: String,

    pub assessment: AssessmentBlock,
    pub dimension_score: f64,
    pub changed_dims: Vec<Channel>,
    pub soa_chain: SoaChain,

    /// Dimensions displayed one grade worse than their baseline this visit.
    pub rebounds: Vec<Dimension>,
    pub acupoints: Vec<String>,
    pub disruption: DisruptionLoads,
}

impl VisitState {
    pub fn is_rebounding(&self, dimension: Dimension) -> bool {
        self.rebounds.contains(&dimension)
    }
}
