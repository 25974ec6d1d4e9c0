//! Goal-path scheduling.
//!
//! Decides on which visits each goal-scheduled dimension moves one grade.
//! The course is split at `st_boundary` into a short-term and a long-term
//! phase; each phase gets the number of single-grade changes needed to go
//! from start to ST goal and from ST goal to LT goal.
//!
//! Placement is random (one draw per placed change); everything after that
//! is a deterministic constraint pass over a visit → dimensions multimap:
//!
//! 1. pairwise deconfliction: spread shared visits onto empty ones,
//! 2. exclusivity: configured pairs never share a visit,
//! 3. global cap: no visit carries more than `max_changes_per_visit`.
//!
//! Moves always stay inside the dimension's own phase and early guard. When
//! no legal destination exists the conflict is logged and left in place.

use std::collections::BTreeMap;

use meridian_core::models::schedule::{Dimension, GoalPath, GoalSchedule};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rng::SeededGenerator;

/// Start value and goals for one dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalInput {
    pub dimension: Dimension,
    pub start: f64,
    pub st: f64,
    pub lt: f64,
}

impl GoalInput {
    pub fn new(dimension: Dimension, start: f64, st: f64, lt: f64) -> Self {
        Self {
            dimension,
            start,
            st,
            lt,
        }
    }
}

/// An earliest visit before which a dimension may not change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarlyGuard {
    pub dimension: Dimension,
    pub first_visit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Fraction of the course that belongs to the short-term phase.
    pub st_boundary_ratio: f64,
    pub max_changes_per_visit: usize,
    /// Largest shift tried by the pairwise and exclusivity passes.
    pub max_shift: u32,
    pub early_guards: Vec<EarlyGuard>,
    pub exclusive_pairs: Vec<(Dimension, Dimension)>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            st_boundary_ratio: 0.6,
            max_changes_per_visit: 3,
            max_shift: 3,
            early_guards: vec![EarlyGuard {
                dimension: Dimension::SymptomScale,
                first_visit: 3,
            }],
            exclusive_pairs: vec![(Dimension::AdlPrimary, Dimension::AdlSecondary)],
        }
    }
}

impl ScheduleConfig {
    pub fn early_guard(&self, dimension: Dimension) -> u32 {
        self.early_guards
            .iter()
            .find(|g| g.dimension == dimension)
            .map_or(1, |g| g.first_visit.max(1))
    }

    /// Partners `dimension` must never share a visit with.
    fn partners(&self, dimension: Dimension) -> impl Iterator<Item = Dimension> + '_ {
        self.exclusive_pairs.iter().filter_map(move |&(a, b)| {
            if a == dimension {
                Some(b)
            } else if b == dimension {
                Some(a)
            } else {
                None
            }
        })
    }
}

/// Last visit of the short-term phase, within `[1, tx_count]`.
pub fn st_boundary(tx_count: u32, ratio: f64) -> u32 {
    let tx_count = tx_count.max(1);
    ((f64::from(tx_count) * ratio).round() as u32).clamp(1, tx_count)
}

/// Inclusive visit range; empty when `lo > hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    lo: u32,
    hi: u32,
}

impl Span {
    fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    fn len(&self) -> u32 {
        if self.is_empty() { 0 } else { self.hi - self.lo + 1 }
    }

    fn contains(&self, visit: u32) -> bool {
        visit >= self.lo && visit <= self.hi
    }
}

fn grade_steps(from: f64, to: f64) -> u32 {
    (from - to).abs().round() as u32
}

/// Spread `steps` changes over `span`: one random visit per equal-width
/// segment, at least `min_gap` after the previous pick. One draw per change.
fn place_changes(span: Span, steps: u32, rng: &mut SeededGenerator) -> Vec<u32> {
    if steps == 0 || span.is_empty() {
        return Vec::new();
    }
    let available = span.len();
    if steps >= available {
        for _ in 0..available {
            let _ = rng.next_f64();
        }
        return (span.lo..=span.hi).collect();
    }

    let min_gap = (available / (2 * steps)).max(1);
    let mut picks = Vec::with_capacity(steps as usize);
    let mut prev: Option<u32> = None;
    for k in 0..steps {
        let seg_lo = span.lo + k * available / steps;
        let seg_hi = span.lo + (k + 1) * available / steps - 1;
        let earliest = prev
            .map_or(seg_lo, |p| seg_lo.max(p + min_gap))
            .min(seg_hi);
        let width = (seg_hi - earliest + 1) as usize;
        let pick = earliest + rng.index(width) as u32;
        picks.push(pick);
        prev = Some(pick);
    }
    picks
}

/// Visit → dimensions changing on that visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitSlots {
    slots: BTreeMap<u32, Vec<Dimension>>,
}

impl VisitSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, visit: u32, dimension: Dimension) {
        let occupants = self.slots.entry(visit).or_default();
        if !occupants.contains(&dimension) {
            occupants.push(dimension);
        }
    }

    pub fn occupants(&self, visit: u32) -> &[Dimension] {
        self.slots.get(&visit).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, visit: u32) -> usize {
        self.occupants(visit).len()
    }

    pub fn contains(&self, visit: u32, dimension: Dimension) -> bool {
        self.occupants(visit).contains(&dimension)
    }

    /// Move one change of `dimension` from `from` to `to`.
    pub fn move_change(&mut self, dimension: Dimension, from: u32, to: u32) {
        if let Some(occupants) = self.slots.get_mut(&from) {
            occupants.retain(|d| *d != dimension);
            if occupants.is_empty() {
                self.slots.remove(&from);
            }
        }
        self.insert(to, dimension);
    }

    /// Visits carrying at least `min` changes, ascending.
    pub fn crowded(&self, min: usize) -> Vec<u32> {
        self.slots
            .iter()
            .filter(|(_, occupants)| occupants.len() >= min)
            .map(|(visit, _)| *visit)
            .collect()
    }

    /// Sorted change visits of one dimension.
    pub fn change_visits(&self, dimension: Dimension) -> Vec<u32> {
        self.slots
            .iter()
            .filter(|(_, occupants)| occupants.contains(&dimension))
            .map(|(visit, _)| *visit)
            .collect()
    }

    /// The largest number of changes on any single visit.
    pub fn max_load(&self) -> usize {
        self.slots.values().map(Vec::len).max().unwrap_or(0)
    }
}

struct Scheduler<'a> {
    config: &'a ScheduleConfig,
    tx_count: u32,
    st_boundary: u32,
    slots: VisitSlots,
}

impl Scheduler<'_> {
    fn st_span(&self, dimension: Dimension) -> Span {
        Span {
            lo: self.config.early_guard(dimension),
            hi: self.st_boundary,
        }
    }

    fn lt_span(&self, dimension: Dimension) -> Span {
        Span {
            lo: (self.st_boundary + 1).max(self.config.early_guard(dimension)),
            hi: self.tx_count,
        }
    }

    /// The phase span a change on `visit` belongs to.
    fn span_for(&self, dimension: Dimension, visit: u32) -> Span {
        if visit <= self.st_boundary {
            self.st_span(dimension)
        } else {
            self.lt_span(dimension)
        }
    }

    fn conflicts_with_partner(&self, dimension: Dimension, visit: u32) -> bool {
        self.config
            .partners(dimension)
            .any(|partner| self.slots.contains(visit, partner))
    }

    /// Nearest legal destination within `max_distance`, trying `+d` before
    /// `-d`, that also satisfies `accept`.
    fn find_shift(
        &self,
        dimension: Dimension,
        from: u32,
        max_distance: u32,
        accept: impl Fn(&Self, u32) -> bool,
    ) -> Option<u32> {
        let span = self.span_for(dimension, from);
        for distance in 1..=max_distance {
            let candidates = [from.checked_add(distance), from.checked_sub(distance)];
            for to in candidates.into_iter().flatten() {
                if span.contains(to) && !self.slots.contains(to, dimension) && accept(self, to) {
                    return Some(to);
                }
            }
        }
        None
    }

    fn by_protection(&self, visit: u32) -> Vec<Dimension> {
        let mut occupants = self.slots.occupants(visit).to_vec();
        occupants.sort_by_key(|d| (d.protection(), *d));
        occupants
    }

    fn deconflict_pairs(&mut self) {
        let max_shift = self.config.max_shift;
        for visit in self.slots.crowded(2) {
            while self.slots.count(visit) >= 2 {
                let moved = self.by_protection(visit).into_iter().find_map(|dimension| {
                    self.find_shift(dimension, visit, max_shift, |s, to| {
                        s.slots.count(to) == 0
                    })
                    .map(|to| (dimension, to))
                });
                match moved {
                    Some((dimension, to)) => {
                        debug!(
                            dimension = dimension.name(),
                            from = visit,
                            to,
                            "spread shared visit"
                        );
                        self.slots.move_change(dimension, visit, to);
                    }
                    None => {
                        debug!(
                            visit,
                            count = self.slots.count(visit),
                            "shared visit left in place"
                        );
                        break;
                    }
                }
            }
        }
    }

    fn enforce_exclusive(&mut self) {
        let config = self.config;
        let cap = config.max_changes_per_visit;
        for &(a, b) in &config.exclusive_pairs {
            let shared: Vec<u32> = self
                .slots
                .change_visits(a)
                .into_iter()
                .filter(|v| self.slots.contains(*v, b))
                .collect();
            for visit in shared {
                let mut order = [a, b];
                order.sort_by_key(|d| (d.protection(), *d));
                let moved = order.into_iter().find_map(|dimension| {
                    self.find_shift(dimension, visit, config.max_shift, |s, to| {
                        s.slots.count(to) < cap && !s.conflicts_with_partner(dimension, to)
                    })
                    .map(|to| (dimension, to))
                });
                match moved {
                    Some((dimension, to)) => {
                        debug!(
                            dimension = dimension.name(),
                            from = visit,
                            to,
                            "separated exclusive pair"
                        );
                        self.slots.move_change(dimension, visit, to);
                    }
                    None => {
                        debug!(
                            visit,
                            a = a.name(),
                            b = b.name(),
                            "exclusive pair left sharing a visit"
                        );
                    }
                }
            }
        }
    }

    fn enforce_cap(&mut self) {
        let cap = self.config.max_changes_per_visit.max(1);
        let max_distance = self.tx_count;
        for visit in self.slots.crowded(cap + 1) {
            while self.slots.count(visit) > cap {
                let moved = self.by_protection(visit).into_iter().find_map(|dimension| {
                    self.find_shift(dimension, visit, max_distance, |s, to| {
                        s.slots.count(to) < cap && !s.conflicts_with_partner(dimension, to)
                    })
                    .map(|to| (dimension, to))
                });
                match moved {
                    Some((dimension, to)) => {
                        debug!(
                            dimension = dimension.name(),
                            from = visit,
                            to,
                            "relocated over cap"
                        );
                        self.slots.move_change(dimension, visit, to);
                    }
                    None => {
                        debug!(
                            visit,
                            count = self.slots.count(visit),
                            "visit over cap left in place"
                        );
                        break;
                    }
                }
            }
        }
    }
}

/// Compute the change visits of every dimension in `inputs`.
///
/// One input per dimension; later duplicates are ignored. The same
/// `(inputs, tx_count, seed)` always yields the same schedule.
pub fn compute_goal_paths(
    inputs: &[GoalInput],
    tx_count: u32,
    rng: &mut SeededGenerator,
    config: &ScheduleConfig,
) -> GoalSchedule {
    let tx_count = tx_count.max(1);
    let mut scheduler = Scheduler {
        config,
        tx_count,
        st_boundary: st_boundary(tx_count, config.st_boundary_ratio),
        slots: VisitSlots::new(),
    };

    let mut seen = Vec::with_capacity(inputs.len());
    for input in inputs {
        if seen.contains(&input.dimension) {
            debug!(dimension = input.dimension.name(), "duplicate goal input ignored");
            continue;
        }
        seen.push(input.dimension);

        let st_span = scheduler.st_span(input.dimension);
        let lt_span = scheduler.lt_span(input.dimension);
        let mut st_steps = grade_steps(input.start, input.st);
        let mut lt_steps = grade_steps(input.st, input.lt);
        // An empty phase hands its changes to the other one.
        if st_span.is_empty() {
            lt_steps += std::mem::take(&mut st_steps);
        }
        if lt_span.is_empty() {
            st_steps += std::mem::take(&mut lt_steps);
        }

        let mut placed = place_changes(st_span, st_steps, rng);
        placed.extend(place_changes(lt_span, lt_steps, rng));
        for visit in placed {
            scheduler.slots.insert(visit, input.dimension);
        }
    }

    scheduler.deconflict_pairs();
    scheduler.enforce_exclusive();
    scheduler.enforce_cap();

    let paths = seen
        .iter()
        .filter_map(|dimension| inputs.iter().find(|input| input.dimension == *dimension))
        .map(|input| GoalPath {
            dimension: input.dimension,
            start_value: input.start,
            st_goal: input.st,
            lt_goal: input.lt,
            change_visits: scheduler.slots.change_visits(input.dimension),
        })
        .collect();

    GoalSchedule {
        tx_count,
        st_boundary: scheduler.st_boundary,
        paths,
    }
}
