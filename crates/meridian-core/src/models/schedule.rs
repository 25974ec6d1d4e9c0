use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A goal-scheduled clinical dimension: one that changes by exactly one
/// grade on each of its change visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Dimension {
    SymptomScale,
    AdlPrimary,
    AdlSecondary,
    Tightness,
    Tenderness,
    Spasm,
    StrengthGrade,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::SymptomScale,
        Dimension::AdlPrimary,
        Dimension::AdlSecondary,
        Dimension::Tightness,
        Dimension::Tenderness,
        Dimension::Spasm,
        Dimension::StrengthGrade,
    ];

    /// Relocation priority. Lower values are moved first when a visit is
    /// overloaded; symptom scale is the most protected.
    pub fn protection(&self) -> u8 {
        match self {
            Dimension::AdlSecondary => 0,
            Dimension::AdlPrimary => 1,
            Dimension::StrengthGrade => 2,
            Dimension::Spasm => 3,
            Dimension::Tenderness => 4,
            Dimension::Tightness => 5,
            Dimension::SymptomScale => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::SymptomScale => "symptom_scale",
            Dimension::AdlPrimary => "adl_primary",
            Dimension::AdlSecondary => "adl_secondary",
            Dimension::Tightness => "tightness",
            Dimension::Tenderness => "tenderness",
            Dimension::Spasm => "spasm",
            Dimension::StrengthGrade => "strength_grade",
        }
    }
}

/// A channel contributing to the composite dimension score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Channel {
    Pain,
    SymptomScale,
    Severity,
    Frequency,
    Adl,
    Tightness,
    Tenderness,
    Spasm,
    Rom,
    Strength,
}

impl Channel {
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Pain => "pain",
            Channel::SymptomScale => "symptom_scale",
            Channel::Severity => "severity",
            Channel::Frequency => "frequency",
            Channel::Adl => "adl",
            Channel::Tightness => "tightness",
            Channel::Tenderness => "tenderness",
            Channel::Spasm => "spasm",
            Channel::Rom => "rom",
            Channel::Strength => "strength",
        }
    }
}

/// The change schedule of a single dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GoalPath {
    pub dimension: Dimension,
    pub start_value: f64,
    pub st_goal: f64,
    pub lt_goal: f64,
    /// Sorted visit indices on which the dimension moves one grade.
    pub change_visits: Vec<u32>,
}

impl GoalPath {
    /// `-1.0` for dimensions that improve by decreasing (tightness),
    /// `1.0` for those that improve by increasing (strength).
    pub fn direction(&self) -> f64 {
        if self.lt_goal > self.start_value || self.st_goal > self.start_value {
            1.0
        } else {
            -1.0
        }
    }

    pub fn changes_on(&self, visit: u32) -> bool {
        self.change_visits.binary_search(&visit).is_ok()
    }
}

/// Every dimension's change schedule for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GoalSchedule {
    pub tx_count: u32,
    /// Last visit of the short-term phase.
    pub st_boundary: u32,
    pub paths: Vec<GoalPath>,
}

impl GoalSchedule {
    pub fn path(&self, dimension: Dimension) -> Option<&GoalPath> {
        self.paths.iter().find(|p| p.dimension == dimension)
    }

    pub fn changes_on(&self, dimension: Dimension, visit: u32) -> bool {
        self.path(dimension).is_some_and(|p| p.changes_on(visit))
    }

    /// Dimensions scheduled to change on `visit`, in path order.
    pub fn changes_at(&self, visit: u32) -> Vec<Dimension> {
        self.paths
            .iter()
            .filter(|p| p.changes_on(visit))
            .map(|p| p.dimension)
            .collect()
    }
}
