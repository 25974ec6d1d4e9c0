use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Lowercase and fold `-`/space separators so "Lower Back", "lower-back"
/// and "lower_back" all parse the same.
fn normalize(input: &str) -> String {
    input
        .trim()
        .to_ascii_lowercase()
        .replace(['-', ' '], "_")
}

/// Treated body region. Closed set: every variant has a region table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BodyPart {
    Neck,
    Shoulder,
    Elbow,
    LowerBack,
    Hip,
    Knee,
}

impl BodyPart {
    pub const ALL: [BodyPart; 6] = [
        BodyPart::Neck,
        BodyPart::Shoulder,
        BodyPart::Elbow,
        BodyPart::LowerBack,
        BodyPart::Hip,
        BodyPart::Knee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Neck => "neck",
            BodyPart::Shoulder => "shoulder",
            BodyPart::Elbow => "elbow",
            BodyPart::LowerBack => "lower_back",
            BodyPart::Hip => "hip",
            BodyPart::Knee => "knee",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyPart {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "neck" | "cervical" => Ok(BodyPart::Neck),
            "shoulder" => Ok(BodyPart::Shoulder),
            "elbow" => Ok(BodyPart::Elbow),
            "lower_back" | "lbp" | "lumbar" => Ok(BodyPart::LowerBack),
            "hip" => Ok(BodyPart::Hip),
            "knee" => Ok(BodyPart::Knee),
            _ => Err(CoreError::UnknownBodyPart(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Laterality {
    Left,
    Right,
    Bilateral,
    Midline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Chronicity {
    Acute,
    Subacute,
    Chronic,
}

impl Chronicity {
    pub fn is_chronic(&self) -> bool {
        matches!(self, Chronicity::Chronic)
    }
}

impl FromStr for Chronicity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "acute" => Ok(Chronicity::Acute),
            "subacute" | "sub_acute" => Ok(Chronicity::Subacute),
            "chronic" => Ok(Chronicity::Chronic),
            _ => Err(CoreError::UnknownChronicity(s.to_string())),
        }
    }
}

/// Payer category, passed through to the rule engine context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InsuranceType {
    #[default]
    None,
    Commercial,
    Medicare,
    WorkersComp,
    PersonalInjury,
}

/// Five-band severity scale. Ordering is clinical: `Mild < … < Severe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SeverityLevel {
    Mild,
    MildToModerate,
    Moderate,
    ModerateToSevere,
    Severe,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 5] = [
        SeverityLevel::Mild,
        SeverityLevel::MildToModerate,
        SeverityLevel::Moderate,
        SeverityLevel::ModerateToSevere,
        SeverityLevel::Severe,
    ];

    /// 0 (mild) through 4 (severe).
    pub fn rank(&self) -> u8 {
        match self {
            SeverityLevel::Mild => 0,
            SeverityLevel::MildToModerate => 1,
            SeverityLevel::Moderate => 2,
            SeverityLevel::ModerateToSevere => 3,
            SeverityLevel::Severe => 4,
        }
    }

    /// Inverse of [`rank`](Self::rank); ranks above 4 saturate at severe.
    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 => SeverityLevel::Mild,
            1 => SeverityLevel::MildToModerate,
            2 => SeverityLevel::Moderate,
            3 => SeverityLevel::ModerateToSevere,
            _ => SeverityLevel::Severe,
        }
    }

    /// Fixed pain-band mapping on the 0–10 scale.
    pub fn from_pain(pain: f64) -> Self {
        if pain >= 9.0 {
            SeverityLevel::Severe
        } else if pain >= 7.0 {
            SeverityLevel::ModerateToSevere
        } else if pain >= 5.0 {
            SeverityLevel::Moderate
        } else if pain >= 3.0 {
            SeverityLevel::MildToModerate
        } else {
            SeverityLevel::Mild
        }
    }

    /// One band milder, saturating at mild.
    pub fn milder(&self) -> Self {
        Self::from_rank(self.rank().saturating_sub(1))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityLevel::Mild => "mild",
            SeverityLevel::MildToModerate => "mild to moderate",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::ModerateToSevere => "moderate to severe",
            SeverityLevel::Severe => "severe",
        }
    }
}

impl FromStr for SeverityLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "mild" => Ok(SeverityLevel::Mild),
            "mild_to_moderate" => Ok(SeverityLevel::MildToModerate),
            "moderate" => Ok(SeverityLevel::Moderate),
            "moderate_to_severe" => Ok(SeverityLevel::ModerateToSevere),
            "severe" => Ok(SeverityLevel::Severe),
            _ => Err(CoreError::UnknownSeverity(s.to_string())),
        }
    }
}

/// How often symptoms are present. Ordering: `Intermittent < … < Constant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FrequencyLevel {
    Intermittent,
    Occasional,
    Frequent,
    Constant,
}

impl FrequencyLevel {
    pub const ALL: [FrequencyLevel; 4] = [
        FrequencyLevel::Intermittent,
        FrequencyLevel::Occasional,
        FrequencyLevel::Frequent,
        FrequencyLevel::Constant,
    ];

    pub fn rank(&self) -> u8 {
        match self {
            FrequencyLevel::Intermittent => 0,
            FrequencyLevel::Occasional => 1,
            FrequencyLevel::Frequent => 2,
            FrequencyLevel::Constant => 3,
        }
    }

    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 => FrequencyLevel::Intermittent,
            1 => FrequencyLevel::Occasional,
            2 => FrequencyLevel::Frequent,
            _ => FrequencyLevel::Constant,
        }
    }

    /// Starting frequency for an initial evaluation at the given severity.
    pub fn for_severity(severity: SeverityLevel) -> Self {
        match severity {
            SeverityLevel::Severe | SeverityLevel::ModerateToSevere => FrequencyLevel::Constant,
            SeverityLevel::Moderate => FrequencyLevel::Frequent,
            SeverityLevel::MildToModerate => FrequencyLevel::Occasional,
            SeverityLevel::Mild => FrequencyLevel::Intermittent,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FrequencyLevel::Intermittent => "Intermittent",
            FrequencyLevel::Occasional => "Occasional",
            FrequencyLevel::Frequent => "Frequent",
            FrequencyLevel::Constant => "Constant",
        }
    }

    /// Canonical pain-frequency phrase used when the whitelist has no entry.
    pub fn phrase(&self) -> &'static str {
        match self {
            FrequencyLevel::Intermittent => {
                "Intermittent (symptoms occur less than 25% of the time)"
            }
            FrequencyLevel::Occasional => {
                "Occasional (symptoms occur between 26% and 50% of the time)"
            }
            FrequencyLevel::Frequent => "Frequent (symptoms occur between 51% and 75% of the time)",
            FrequencyLevel::Constant => "Constant (symptoms occur between 76% and 100% of the time)",
        }
    }
}

impl FromStr for FrequencyLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "intermittent" => Ok(FrequencyLevel::Intermittent),
            "occasional" => Ok(FrequencyLevel::Occasional),
            "frequent" => Ok(FrequencyLevel::Frequent),
            "constant" => Ok(FrequencyLevel::Constant),
            _ => Err(CoreError::UnknownFrequency(s.to_string())),
        }
    }
}

/// How a dimension moved between two adjacent visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Trend {
    #[default]
    Stable,
    SlightlyImproved,
    Improved,
}

impl Trend {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Trend::Stable)
    }

    /// Wording for gains ("improved").
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Stable => "stable",
            Trend::SlightlyImproved => "slightly improved",
            Trend::Improved => "improved",
        }
    }

    /// Wording for findings that shrink ("reduced").
    pub fn reduced_label(&self) -> &'static str {
        match self {
            Trend::Stable => "stable",
            Trend::SlightlyImproved => "slightly reduced",
            Trend::Improved => "reduced",
        }
    }

    /// Full weight for a clear improvement, half for a slight one.
    pub fn weight_factor(&self) -> f64 {
        match self {
            Trend::Stable => 0.0,
            Trend::SlightlyImproved => 0.5,
            Trend::Improved => 1.0,
        }
    }
}

/// Patient-reported change category for the subjective section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SymptomChange {
    Improvement,
    Similar,
    Exacerbate,
}

impl SymptomChange {
    pub const ALL: [SymptomChange; 3] = [
        SymptomChange::Improvement,
        SymptomChange::Similar,
        SymptomChange::Exacerbate,
    ];

    pub fn phrase(&self) -> &'static str {
        match self {
            SymptomChange::Improvement => "improvement of symptom(s)",
            SymptomChange::Similar => "similar symptom(s)",
            SymptomChange::Exacerbate => "exacerbate of symptom(s)",
        }
    }

    /// Classify free text coming back from the rule engine or whitelist.
    pub fn classify(text: &str) -> Option<Self> {
        let lower = text.to_ascii_lowercase();
        if lower.contains("exacerbat") || lower.contains("worse") {
            Some(SymptomChange::Exacerbate)
        } else if lower.contains("improv") || lower.contains("better") {
            Some(SymptomChange::Improvement)
        } else if lower.contains("similar") || lower.contains("same") {
            Some(SymptomChange::Similar)
        } else {
            None
        }
    }
}
