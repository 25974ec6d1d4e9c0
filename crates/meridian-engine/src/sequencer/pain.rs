//! Progress curve and the pain track.

use meridian_core::models::grading::{snap_half, snap_half_down};

/// Once the pain is this close to the short-term goal, it heads for the
/// long-term goal instead.
const ST_REACHED_MARGIN: f64 = 0.25;
const PLATEAU_DROP_BASE: f64 = 0.3;
const PLATEAU_DROP_PROGRESS: f64 = 0.2;

/// Smoothstep of `visit / tx_count` plus jitter, never below `previous`.
/// The final visit is always exactly `1.0`.
pub fn advance_progress(previous: f64, visit: u32, tx_count: u32, draw: f64, noise: f64) -> f64 {
    if visit >= tx_count {
        return 1.0;
    }
    let t = f64::from(visit) / f64::from(tx_count.max(1));
    let curve = t * t * (3.0 - 2.0 * t);
    let jitter = (draw * 2.0 - 1.0) * noise;
    (curve + jitter).clamp(previous, 1.0)
}

/// Fixed shape of the course the pain track moves through.
#[derive(Debug, Clone, Copy)]
pub struct PainCourse {
    pub tx_count: u32,
    pub st_boundary: u32,
    pub st_goal: f64,
    pub lt_goal: f64,
    pub floor: f64,
    pub noise: f64,
    pub plateau_tolerance: u32,
}

/// Per-visit inputs to [`PainTrack::step`].
#[derive(Debug, Clone, Copy)]
pub struct PainVisit {
    pub visit: u32,
    pub progress: f64,
    /// The visit's `PainNoise` draw.
    pub draw: f64,
    /// Combined disruption load in `[0, 1)`.
    pub load: f64,
}

/// Continuous pain, its displayed label, and how many visits in a row the
/// label has repeated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PainTrack {
    pub value: f64,
    pub label: f64,
    pub plateau_run: u32,
}

impl PainTrack {
    pub fn new(value: f64, label: f64) -> Self {
        Self {
            value,
            label,
            plateau_run: 0,
        }
    }

    /// Advance one visit. Returns true when the label did not move.
    pub fn step(&mut self, course: &PainCourse, visit: &PainVisit) -> bool {
        let previous = *self;

        let value = if visit.visit >= course.tx_count {
            previous.value.min(course.lt_goal)
        } else {
            let (target, phase_end) = if previous.value - course.st_goal <= ST_REACHED_MARGIN {
                (course.lt_goal, course.tx_count)
            } else {
                (course.st_goal, course.st_boundary.max(visit.visit))
            };
            let remaining = phase_end.saturating_sub(visit.visit) + 1;
            let base = previous.value + (target - previous.value) / f64::from(remaining);
            // Disruption loads above average push the jitter upward.
            let jitter =
                (visit.draw * 2.0 - 1.0) * course.noise + course.noise * (visit.load - 0.5);
            let lower = target.min(previous.value);
            round2((base + jitter).clamp(lower, previous.value))
        }
        .max(course.floor);

        let mut label = if visit.visit >= course.tx_count {
            snap_half_down(value)
        } else {
            snap_half(value)
        }
        .min(previous.label);

        self.value = value;
        self.plateau_run = if label == previous.label {
            previous.plateau_run + 1
        } else {
            0
        };

        // A label resting at the long-term goal is not a plateau.
        if self.plateau_run > course.plateau_tolerance
            && visit.visit < course.tx_count
            && previous.label > course.lt_goal
        {
            let drop = PLATEAU_DROP_BASE + PLATEAU_DROP_PROGRESS * visit.progress;
            self.value = round2(self.value - drop)
                .max(course.lt_goal.min(self.value))
                .max(course.floor);
            label = snap_half_down(self.value).min(previous.label);
            tracing::debug!(
                visit = visit.visit,
                run = self.plateau_run,
                label,
                "pain plateau broken"
            );
            if label < previous.label {
                self.plateau_run = 0;
            }
        }

        self.label = label;
        label == previous.label
    }

    /// Pain drop since `previous`, positive when better.
    pub fn delta_from(&self, previous: f64) -> f64 {
        round2(previous - self.value)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
