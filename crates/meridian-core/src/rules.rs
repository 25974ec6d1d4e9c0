//! Rule engine seam.
//!
//! The weighted-option rule engine lives outside this workspace. The engine
//! calls it once per categorical field per visit and applies its own
//! progress bias on top of the returned weights.

use serde::{Deserialize, Serialize};

use crate::models::clinical::{BodyPart, Chronicity, InsuranceType, Laterality};

/// Field paths the engine asks the rule engine about.
pub mod fields {
    pub const SYMPTOM_CHANGE: &str = "subjective.symptomChange";
    pub const REASON: &str = "subjective.reason";
    pub const CONNECTOR: &str = "subjective.connector";
    pub const PAIN_FREQUENCY: &str = "subjective.painFrequency";
    pub const TREATMENT_FOCUS: &str = "plan.treatmentFocus";
}

/// Snapshot of the patient and visit handed to the rule engine.
#[derive(Debug, Clone)]
pub struct RuleContext<'a> {
    pub insurance: InsuranceType,
    pub body_part: BodyPart,
    pub laterality: Laterality,
    pub chronicity: Chronicity,
    pub pain: f64,
    pub progress: f64,
    pub visit_index: u32,
    pub diagnosis_patterns: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedOption {
    pub option: String,
    pub weight: f64,
    /// Rule ids or descriptions that contributed to the weight.
    pub reasons: Vec<String>,
}

pub trait RuleEngine: Send + Sync {
    /// Weight every candidate for `field`. Options not among `candidates`
    /// are ignored by the caller.
    fn weighted_options(
        &self,
        field: &str,
        candidates: &[String],
        context: &RuleContext<'_>,
    ) -> Vec<WeightedOption>;
}

/// Gives every candidate the same weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRules;

impl RuleEngine for UniformRules {
    fn weighted_options(
        &self,
        _field: &str,
        candidates: &[String],
        _context: &RuleContext<'_>,
    ) -> Vec<WeightedOption> {
        candidates
            .iter()
            .map(|option| WeightedOption {
                option: option.clone(),
                weight: 1.0,
                reasons: Vec::new(),
            })
            .collect()
    }
}
