//! Grade-valued findings: scheduled changes, rebounds, severity and
//! frequency ratchets, and the functional deficits.

use meridian_core::models::clinical::{FrequencyLevel, SeverityLevel, Trend};
use meridian_core::models::schedule::{Dimension, GoalPath, GoalSchedule};

/// Muscle dimensions that may rebound, in draw order.
pub const BOUNCE_DIMENSIONS: [Dimension; 3] =
    [Dimension::Tightness, Dimension::Tenderness, Dimension::Spasm];

/// Baseline (non-rebounded) value of every goal-scheduled dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grades {
    pub symptom_scale: u8,
    pub adl_primary: u8,
    pub adl_secondary: u8,
    pub tightness: u8,
    pub tenderness: u8,
    pub spasm: u8,
    pub strength_grade: u8,
}

impl Grades {
    pub fn get(&self, dimension: Dimension) -> u8 {
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

    fn get_mut(&mut self, dimension: Dimension) -> &mut u8 {
        match dimension {
            Dimension::SymptomScale => &mut self.symptom_scale,
            Dimension::AdlPrimary => &mut self.adl_primary,
            Dimension::AdlSecondary => &mut self.adl_secondary,
            Dimension::Tightness => &mut self.tightness,
            Dimension::Tenderness => &mut self.tenderness,
            Dimension::Spasm => &mut self.spasm,
            Dimension::StrengthGrade => &mut self.strength_grade,
        }
    }

    /// Apply every change scheduled on `visit`, one grade toward the
    /// long-term goal and never past it. Returns the dimensions that moved.
    pub fn apply_schedule(&mut self, schedule: &GoalSchedule, visit: u32) -> Vec<Dimension> {
        let mut moved = Vec::new();
        for path in schedule.paths.iter().filter(|p| p.changes_on(visit)) {
            let slot = self.get_mut(path.dimension);
            let next = step_toward_goal(*slot, path);
            if next != *slot {
                *slot = next;
                moved.push(path.dimension);
            }
        }
        moved
    }
}

fn step_toward_goal(value: u8, path: &GoalPath) -> u8 {
    let goal = path.lt_goal.round().clamp(0.0, f64::from(u8::MAX)) as u8;
    if path.direction() > 0.0 {
        if value < goal { value + 1 } else { value }
    } else if value > goal {
        value - 1
    } else {
        value
    }
}

/// When a muscle dimension may show a one-grade rebound this visit.
#[derive(Debug, Clone, Copy)]
pub struct BounceRules<'a> {
    pub schedule: &'a GoalSchedule,
    /// Rebounds start strictly after this visit.
    pub opens_after: u32,
}

impl<'a> BounceRules<'a> {
    pub fn new(schedule: &'a GoalSchedule, window_ratio: f64) -> Self {
        Self {
            schedule,
            opens_after: (f64::from(schedule.st_boundary) * window_ratio).floor() as u32,
        }
    }

    /// True when `dimension` may rebound on `visit`. `recovering` means it
    /// rebounded on the previous visit.
    pub fn eligible(
        &self,
        dimension: Dimension,
        visit: u32,
        baseline: u8,
        recovering: bool,
    ) -> bool {
        let Some(path) = self.schedule.path(dimension) else {
            return false;
        };
        let near_change = [visit.saturating_sub(1), visit, visit + 1]
            .into_iter()
            .any(|v| path.changes_on(v));
        let grade = f64::from(baseline);

        visit > self.opens_after
            && visit < self.schedule.tx_count
            && !recovering
            && !near_change
            && grade <= path.st_goal
            && grade + 1.0 <= path.start_value
    }
}

/// Severity from the pain label, one band milder again when an ADL grade
/// dropped late enough in the course. Never worse than `previous`.
pub fn next_severity(
    previous: SeverityLevel,
    pain_label: f64,
    adl_dropped: bool,
    progress: f64,
    adl_progress: f64,
) -> SeverityLevel {
    let mut band = SeverityLevel::from_pain(pain_label);
    if adl_dropped && progress >= adl_progress {
        band = band.milder();
    }
    band.min(previous)
}

/// Frequency the course should have reached at `progress`, counting down
/// from the intake frequency. Never worse than `previous`.
pub fn next_frequency(
    previous: FrequencyLevel,
    initial: FrequencyLevel,
    progress: f64,
    chronic: bool,
) -> FrequencyLevel {
    let thresholds: [f64; 3] = if chronic {
        [0.25, 0.5, 0.75]
    } else {
        [0.3, 0.6, 0.85]
    };
    let steps = thresholds.iter().filter(|t| progress >= **t).count() as u8;
    FrequencyLevel::from_rank(initial.rank().saturating_sub(steps)).min(previous)
}

/// Chronic courses lose their functional deficits more slowly.
const CHRONIC_DAMPING: f64 = 0.7;
const MAX_DECAY_RATE: f64 = 0.15;
/// Rates below this leave the deficit unchanged.
const MIN_DECAY_RATE: f64 = 0.03;
/// Rates at or above this read as a clear improvement.
const IMPROVED_DECAY_RATE: f64 = 0.09;
/// On a pain plateau, one functional channel may still move past this.
const PLATEAU_MOVE_PROGRESS: f64 = 0.5;

/// Shrink `deficit` by a rate drawn from `draw`.
pub fn decay_deficit(deficit: f64, draw: f64, chronic: bool) -> (f64, Trend) {
    let damping = if chronic { CHRONIC_DAMPING } else { 1.0 };
    let rate = draw * MAX_DECAY_RATE * damping;
    if rate < MIN_DECAY_RATE || deficit <= 0.0 {
        return (deficit, Trend::Stable);
    }
    let next = round4(deficit * (1.0 - rate));
    if next >= deficit {
        return (deficit, Trend::Stable);
    }
    let trend = if rate >= IMPROVED_DECAY_RATE {
        Trend::Improved
    } else {
        Trend::SlightlyImproved
    };
    (next, trend)
}

/// Which functional channels may move this visit: `(rom, strength)`.
pub fn functional_moves(plateaued: bool, progress: f64, visit: u32) -> (bool, bool) {
    if !plateaued {
        (true, true)
    } else if progress >= PLATEAU_MOVE_PROGRESS {
        (visit % 2 == 0, visit % 2 == 1)
    } else {
        (false, false)
    }
}

/// Starting ROM and strength deficits for a severity band, as fractions of
/// the normal range.
pub fn initial_deficits(severity: SeverityLevel) -> (f64, f64) {
    let r = f64::from(severity.rank());
    (round4(0.10 + 0.08 * r), round4(0.08 + 0.06 * r))
}

pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Trend of a grade that improves by decreasing.
pub fn decrease_trend(previous: u8, current: u8) -> Trend {
    if current < previous {
        Trend::Improved
    } else {
        Trend::Stable
    }
}
