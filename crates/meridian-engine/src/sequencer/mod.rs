//! Visit-state sequencer.
//!
//! [`generate_course`] builds the goal schedule, then walks the visits in
//! order, carrying the running values forward. Each visit consumes exactly
//! [`DRAWS_PER_VISIT`](crate::rng::DRAWS_PER_VISIT) draws in
//! [`VISIT_DRAW_ORDER`](crate::rng::VISIT_DRAW_ORDER).

mod findings;
pub mod goals;
mod pain;
pub mod text;

use std::borrow::Cow;

use meridian_core::models::clinical::{FrequencyLevel, SeverityLevel, SymptomChange, Trend};
use meridian_core::models::grading::{
    difficulty_text, snap_half, spasm_text, strength_label, tenderness_text, tightness_text,
};
use meridian_core::models::request::{GenerationRequest, GenerationResult, TreatmentGoals};
use meridian_core::models::schedule::{Dimension, GoalSchedule};
use meridian_core::models::visit::{
    AdlSnapshot, DisruptionLoads, ObjectiveEcho, RomReading, SelectedMuscles, SoaChain,
    SubjectiveEcho, TrendSet, VisitState,
};
use meridian_core::rules::{fields, RuleContext, RuleEngine, UniformRules};
use meridian_core::whitelist::{EmptyWhitelist, OptionWhitelist};
use meridian_regions::{region_for, Region};
use tracing::{debug, info};

use crate::assessment::{compute_dimension_score, derive_assessment, DimensionDeltas, SoaInput};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::goal_path::compute_goal_paths;
use crate::muscles::{reduce, select_initial};
use crate::rng::{derive_seed, SeededGenerator, VisitDraw, ACUPOINT_STREAM, MUSCLE_STREAM};

use findings::{
    decay_deficit, decrease_trend, functional_moves, initial_deficits, next_frequency,
    next_severity, BounceRules, Grades, BOUNCE_DIMENSIONS,
};
use goals::{clamp_goals, derive_goals, goal_inputs, grade_ceiling};
use pain::{advance_progress, round2, PainCourse, PainTrack, PainVisit};

/// External collaborators injected into a generation run. Both are only
/// read.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub rules: &'a dyn RuleEngine,
    pub whitelist: &'a dyn OptionWhitelist,
}

impl Default for Collaborators<'static> {
    /// Uniform weights and no template whitelist.
    fn default() -> Self {
        Self {
            rules: &UniformRules,
            whitelist: &EmptyWhitelist,
        }
    }
}

/// Values carried from one visit to the next.
#[derive(Debug, Clone)]
struct Running {
    progress: f64,
    pain: PainTrack,
    severity: SeverityLevel,
    frequency: FrequencyLevel,
    grades: Grades,
    rom_deficit: f64,
    strength_deficit: f64,
    muscles: SelectedMuscles,
    /// Dimensions shown rebounded on the previous visit.
    rebounds: Vec<Dimension>,
}

struct Course<'a> {
    request: &'a GenerationRequest,
    collaborators: Collaborators<'a>,
    config: &'a EngineConfig,
    region: &'static dyn Region,
    schedule: &'a GoalSchedule,
    pain_course: PainCourse,
    bounce: BounceRules<'a>,
    chronic: bool,
    baseline_pain: f64,
    initial_frequency: FrequencyLevel,
    acupoints: Vec<String>,
    running: Running,
}

fn initial_grades(goals: &TreatmentGoals) -> Grades {
    let grade = |dimension: Dimension| {
        goals
            .for_dimension(dimension)
            .start
            .round()
            .clamp(0.0, f64::from(grade_ceiling(dimension))) as u8
    };
    Grades {
        symptom_scale: grade(Dimension::SymptomScale),
        adl_primary: grade(Dimension::AdlPrimary),
        adl_secondary: grade(Dimension::AdlSecondary),
        tightness: grade(Dimension::Tightness),
        tenderness: grade(Dimension::Tenderness),
        spasm: grade(Dimension::Spasm),
        strength_grade: grade(Dimension::StrengthGrade),
    }
}

/// The course's acupoints, drawn once from a stream derived from the seed.
fn select_acupoints(region: &dyn Region, seed: u32) -> Vec<String> {
    let pool = region.acupoints();
    let mut points = pool.points.clone();
    let mut rng = SeededGenerator::new(Some(derive_seed(seed, ACUPOINT_STREAM)));
    rng.shuffle(&mut points);
    points.truncate(pool.per_course);
    points
}

fn displayed(base: u8, dimension: Dimension, rebounds: &[Dimension]) -> u8 {
    base + u8::from(rebounds.contains(&dimension))
}

impl<'a> Course<'a> {
    fn new(
        request: &'a GenerationRequest,
        collaborators: Collaborators<'a>,
        config: &'a EngineConfig,
        goals: &TreatmentGoals,
        schedule: &'a GoalSchedule,
        seed: u32,
    ) -> Self {
        let region = region_for(request.body_part);
        let chronic = request.chronicity.is_chronic();
        let clamp_pain = |p: f64| p.clamp(config.pain_floor, config.pain_ceiling);

        let (running, baseline_pain, acupoints) = match &request.continuation {
            Some(c) => {
                let pain = clamp_pain(c.pain);
                let running = Running {
                    progress: c.progress.clamp(0.0, 1.0),
                    pain: PainTrack::new(pain, c.pain_label),
                    severity: c.severity,
                    frequency: c.frequency,
                    grades: Grades {
                        symptom_scale: c.symptom_scale,
                        adl_primary: c.adl_primary,
                        adl_secondary: c.adl_secondary,
                        tightness: c.tightness,
                        tenderness: c.tenderness,
                        spasm: c.spasm,
                        strength_grade: c.strength_grade_index,
                    },
                    rom_deficit: c.rom_deficit,
                    strength_deficit: c.strength_deficit,
                    muscles: c.muscles.clone(),
                    rebounds: c.rebounds.clone(),
                };
                let acupoints = if c.acupoints.is_empty() {
                    select_acupoints(region, seed)
                } else {
                    c.acupoints.clone()
                };
                (running, clamp_pain(c.baseline_pain).max(pain), acupoints)
            }
            None => {
                let pain = goals.pain.start;
                let (rom_deficit, strength_deficit) = initial_deficits(request.severity);
                let running = Running {
                    progress: 0.0,
                    pain: PainTrack::new(pain, snap_half(pain)),
                    severity: request.severity,
                    frequency: FrequencyLevel::for_severity(request.severity),
                    grades: initial_grades(goals),
                    rom_deficit,
                    strength_deficit,
                    muscles: select_initial(
                        request.body_part,
                        request.severity,
                        derive_seed(seed, MUSCLE_STREAM),
                    ),
                    rebounds: Vec::new(),
                };
                (running, pain, select_acupoints(region, seed))
            }
        };

        Self {
            request,
            collaborators,
            config,
            region,
            schedule,
            pain_course: PainCourse {
                tx_count: schedule.tx_count,
                st_boundary: schedule.st_boundary,
                st_goal: goals.pain.st,
                lt_goal: goals.pain.lt,
                floor: config.pain_floor,
                noise: config.pain_noise,
                plateau_tolerance: config.plateau_tolerance(chronic),
            },
            bounce: BounceRules::new(schedule, config.bounce_window_ratio),
            chronic,
            baseline_pain,
            initial_frequency: FrequencyLevel::for_severity(request.severity),
            acupoints,
            running,
        }
    }

    fn rule_context(&self, visit: u32) -> RuleContext<'a> {
        RuleContext {
            insurance: self.request.insurance,
            body_part: self.request.body_part,
            laterality: self.request.laterality,
            chronicity: self.request.chronicity,
            pain: self.running.pain.label,
            progress: self.running.progress,
            visit_index: visit,
            diagnosis_patterns: &self.request.diagnosis_patterns,
        }
    }

    fn step(&mut self, visit: u32, rng: &mut SeededGenerator) -> VisitState {
        let config = self.config;
        let tx_count = self.schedule.tx_count;
        let prev = self.running.clone();

        // 1. Progress.
        let progress = advance_progress(
            prev.progress,
            visit,
            tx_count,
            rng.next_f64(),
            config.progress_noise,
        );
        self.running.progress = progress;

        // 2–3. Disruption loads, pain, plateau breaker.
        let disruption = DisruptionLoads {
            sleep: rng.next_f64(),
            workload: rng.next_f64(),
            weather: rng.next_f64(),
            adherence: rng.next_f64(),
        };
        let plateaued = self.running.pain.step(
            &self.pain_course,
            &PainVisit {
                visit,
                progress,
                draw: rng.next_f64(),
                load: disruption.combined(),
            },
        );
        let pain = self.running.pain;
        let pain_delta = pain.delta_from(prev.pain.value);
        let cumulative_drop = round2(self.baseline_pain - pain.value);

        // Scheduled grade changes, then rebounds.
        let moved = self.running.grades.apply_schedule(self.schedule, visit);
        let mut rebounds = Vec::new();
        for (dimension, slot) in BOUNCE_DIMENSIONS.into_iter().zip([
            VisitDraw::TightnessBounce,
            VisitDraw::TendernessBounce,
            VisitDraw::SpasmBounce,
        ]) {
            let recovering = prev.rebounds.contains(&dimension);
            let baseline = self.running.grades.get(dimension);
            if self.bounce.eligible(dimension, visit, baseline, recovering) {
                if rng.chance(config.bounce_probability) {
                    debug!(visit, dimension = dimension.name(), "grade rebound");
                    rebounds.push(dimension);
                }
            } else {
                rng.reserve(slot);
            }
        }

        // 7. Functional deficits.
        let rom_draw = rng.next_f64();
        let strength_draw = rng.next_f64();
        let (rom_may_move, strength_may_move) = functional_moves(plateaued, progress, visit);
        let (rom_deficit, rom_trend) = if rom_may_move {
            decay_deficit(prev.rom_deficit, rom_draw, self.chronic)
        } else {
            (prev.rom_deficit, Trend::Stable)
        };
        let (strength_deficit, strength_deficit_trend) = if strength_may_move {
            decay_deficit(prev.strength_deficit, strength_draw, self.chronic)
        } else {
            (prev.strength_deficit, Trend::Stable)
        };
        self.running.rom_deficit = rom_deficit;
        self.running.strength_deficit = strength_deficit;

        // 4–5. Severity and frequency.
        let adl_primary_moved = moved.contains(&Dimension::AdlPrimary);
        let adl_secondary_moved = moved.contains(&Dimension::AdlSecondary);
        let severity = next_severity(
            prev.severity,
            pain.label,
            adl_primary_moved || adl_secondary_moved,
            progress,
            config.severity_adl_progress,
        );
        let frequency =
            next_frequency(prev.frequency, self.initial_frequency, progress, self.chronic);
        self.running.severity = severity;
        self.running.frequency = frequency;

        // 6. Muscle lists shrink with severity.
        if severity < prev.severity {
            if let Cow::Owned(trimmed) = reduce(&prev.muscles, severity) {
                debug!(visit, severity = severity.label(), "muscle lists trimmed");
                self.running.muscles = trimmed;
            }
        }

        let grades = self.running.grades;
        let muscle_trend = |dimension: Dimension, before: usize, after: usize| {
            if rebounds.contains(&dimension) || prev.rebounds.contains(&dimension) {
                Trend::Stable
            } else if moved.contains(&dimension) {
                Trend::Improved
            } else if after < before {
                Trend::SlightlyImproved
            } else {
                Trend::Stable
            }
        };
        let muscles = &self.running.muscles;
        let trends = TrendSet {
            symptom_scale: decrease_trend(prev.grades.symptom_scale, grades.symptom_scale),
            severity: if severity < prev.severity {
                Trend::Improved
            } else {
                Trend::Stable
            },
            frequency: if frequency < prev.frequency {
                Trend::Improved
            } else {
                Trend::Stable
            },
            adl: match (adl_primary_moved, adl_secondary_moved) {
                (true, true) => Trend::Improved,
                (false, false) => Trend::Stable,
                _ => Trend::SlightlyImproved,
            },
            tightness: muscle_trend(
                Dimension::Tightness,
                prev.muscles.tightness.len(),
                muscles.tightness.len(),
            ),
            tenderness: muscle_trend(
                Dimension::Tenderness,
                prev.muscles.tenderness.len(),
                muscles.tenderness.len(),
            ),
            spasm: muscle_trend(
                Dimension::Spasm,
                prev.muscles.spasm.len(),
                muscles.spasm.len(),
            ),
            rom: rom_trend,
            strength: if moved.contains(&Dimension::StrengthGrade) {
                Trend::Improved
            } else {
                strength_deficit_trend
            },
        };

        // 8–9. Subjective text.
        let context = self.rule_context(visit);
        let Collaborators { rules, whitelist } = self.collaborators;
        let evidence = text::Evidence {
            pain_delta,
            objective_moved: trends.objective_moved(),
            rebounding: !rebounds.is_empty(),
            progress,
        };

        let candidates = text::symptom_change_candidates(whitelist, fields::SYMPTOM_CHANGE);
        let sampled = text::weighted_pick(
            rng,
            VisitDraw::SymptomChangeSample,
            rules,
            fields::SYMPTOM_CHANGE,
            &candidates,
            &context,
            text::symptom_change_bias(progress),
        )
        .and_then(|option| SymptomChange::classify(&option))
        .unwrap_or(SymptomChange::Similar);
        let symptom_change =
            text::guard_symptom_change(sampled, &evidence, config.late_improvement_progress);

        let reasons = text::reason_candidates(whitelist, fields::REASON, symptom_change);
        let reason = text::resolve_pooled(
            text::weighted_pick(
                rng,
                VisitDraw::ReasonSample,
                rules,
                fields::REASON,
                &reasons,
                &context,
                |_| 1.0,
            ),
            &reasons,
            visit,
        );

        let connectors = text::connector_candidates(whitelist, fields::CONNECTOR, symptom_change);
        let connector = text::resolve_pooled(
            text::weighted_pick(
                rng,
                VisitDraw::ConnectorSample,
                rules,
                fields::CONNECTOR,
                &connectors,
                &context,
                |_| 1.0,
            ),
            &connectors,
            visit,
        );

        let focuses = text::treatment_focus_candidates(whitelist, fields::TREATMENT_FOCUS);
        let treatment_focus = text::resolve_pooled(
            text::weighted_pick(
                rng,
                VisitDraw::TreatmentFocusSample,
                rules,
                fields::TREATMENT_FOCUS,
                &focuses,
                &context,
                text::treatment_focus_bias(progress),
            ),
            &focuses,
            visit,
        );

        let frequency_phrase =
            text::frequency_phrase(frequency, whitelist, rules, fields::PAIN_FREQUENCY, &context);

        // 11. Score and assessment.
        let score = compute_dimension_score(&DimensionDeltas {
            pain_delta,
            symptom_scale: trends.symptom_scale,
            severity: trends.severity,
            frequency: trends.frequency,
            adl: trends.adl,
            tightness: trends.tightness,
            tenderness: trends.tenderness,
            spasm: trends.spasm,
            rom: trends.rom,
            strength: trends.strength,
        });
        let adl_delta = f64::from(prev.grades.adl_primary.saturating_sub(grades.adl_primary))
            + f64::from(prev.grades.adl_secondary.saturating_sub(grades.adl_secondary));
        let soa = SoaInput {
            visit_index: visit,
            progress,
            pain_delta,
            cumulative_drop,
            adl_delta,
            frequency_improved: trends.frequency.is_changed(),
            rom: trends.rom,
            strength: trends.strength,
            tightness: trends.tightness,
            tenderness: trends.tenderness,
            spasm: trends.spasm,
        };
        let assessment = derive_assessment(&soa);

        let adl_table = self.region.adl();
        let tightness_grading = displayed(grades.tightness, Dimension::Tightness, &rebounds);
        let tenderness_grading = displayed(grades.tenderness, Dimension::Tenderness, &rebounds);
        let spasm_grading = displayed(grades.spasm, Dimension::Spasm, &rebounds);

        let state = VisitState {
            visit_index: visit,
            progress,
            pain_scale_current: pain.value,
            pain_scale_label: pain.label,
            pain_delta,
            cumulative_pain_drop: cumulative_drop,
            severity,
            symptom_scale: grades.symptom_scale,
            frequency,
            frequency_phrase,
            tightness_grading,
            tightness_text: tightness_text(tightness_grading).to_string(),
            tenderness_grading,
            tenderness_text: tenderness_text(tenderness_grading).to_string(),
            spasm_grading,
            spasm_text: spasm_text(spasm_grading).to_string(),
            muscles: self.running.muscles.clone(),
            adl: AdlSnapshot {
                primary_grade: grades.adl_primary,
                secondary_grade: grades.adl_secondary,
                primary_text: difficulty_text(grades.adl_primary).to_string(),
                secondary_text: difficulty_text(grades.adl_secondary).to_string(),
                primary_activities: adl_table.primary.clone(),
                secondary_activities: adl_table.secondary.clone(),
            },
            strength_grade_index: grades.strength_grade,
            strength_grade: strength_label(grades.strength_grade).to_string(),
            rom_deficit,
            strength_deficit,
            rom_readings: self
                .region
                .rom_motions()
                .iter()
                .map(|motion| RomReading {
                    motion: motion.name.clone(),
                    degrees: (f64::from(motion.normal_degrees) * (1.0 - rom_deficit)).round()
                        as u32,
                    normal_degrees: motion.normal_degrees,
                })
                .collect(),
            trends,
            symptom_change,
            reason,
            connector,
            treatment_focus,
            assessment,
            dimension_score: score.score,
            changed_dims: score.changed_dims,
            soa_chain: SoaChain {
                subjective: SubjectiveEcho {
                    pain_moved: pain_delta > 0.0,
                    frequency_moved: trends.frequency.is_changed(),
                    adl_moved: trends.adl.is_changed(),
                    symptom_scale_moved: trends.symptom_scale.is_changed(),
                    symptom_change,
                },
                objective: ObjectiveEcho {
                    rom: trends.rom,
                    strength: trends.strength,
                    tightness: trends.tightness,
                    tenderness: trends.tenderness,
                    spasm: trends.spasm,
                    any_moved: trends.objective_moved(),
                },
                assessment_strong: soa.is_strong(),
            },
            rebounds: rebounds.clone(),
            acupoints: self.acupoints.clone(),
            disruption,
        };

        self.running.rebounds = rebounds;
        state
    }
}

/// Generate one state per visit for a treatment course.
///
/// Visits run from the start index through `tx_count`. Without a
/// continuation, a later start index still simulates the earlier visits and
/// only returns the requested ones, so a course and its tail agree. A
/// continuation resumes after its captured visit and never replays it; one
/// captured at the final visit yields no states.
pub fn generate_course(
    request: &GenerationRequest,
    collaborators: &Collaborators<'_>,
    config: &EngineConfig,
) -> Result<GenerationResult, EngineError> {
    if !(config.pain_floor < config.pain_ceiling) {
        return Err(EngineError::Config(format!(
            "pain_floor {} must be below pain_ceiling {}",
            config.pain_floor, config.pain_ceiling
        )));
    }
    if !request.start_pain.is_finite() {
        return Err(EngineError::Config(format!(
            "start_pain {} is not a number",
            request.start_pain
        )));
    }
    meridian_regions::validate_all()?;

    let tx_count = request.tx_count.max(1);
    let start_pain = request.start_pain.clamp(config.pain_floor, config.pain_ceiling);
    let goals = match &request.goals {
        Some(goals) => clamp_goals(goals, start_pain, config.pain_floor),
        None => derive_goals(
            request.severity,
            start_pain,
            request.chronicity,
            config.pain_floor,
        ),
    };

    let mut rng = SeededGenerator::new(request.seed);
    let seed = rng.used_seed();
    let resume_after = request.continuation.as_ref().map(|c| c.visit_index);
    let first_simulated = resume_after.map_or(1, |v| v.saturating_add(1));
    // A continuation never replays visits it already covers.
    let first_emitted = request
        .start_visit
        .unwrap_or(first_simulated)
        .clamp(1, tx_count)
        .max(first_simulated);
    info!(
        seed,
        tx_count,
        first_visit = first_emitted,
        body_part = %request.body_part,
        resumed = resume_after.is_some(),
        "generating course"
    );

    let schedule = compute_goal_paths(&goal_inputs(&goals), tx_count, &mut rng, &config.schedule);
    debug!(
        st_boundary = schedule.st_boundary,
        draws = rng.draws(),
        "goal schedule computed"
    );

    if first_simulated > tx_count {
        info!(seed, tx_count, "course already complete");
        return Ok(GenerationResult {
            states: Vec::new(),
            used_seed: seed,
            draws: rng.draws(),
            schedule,
        });
    }

    let states = {
        let mut course = Course::new(request, *collaborators, config, &goals, &schedule, seed);
        let mut states = Vec::with_capacity((tx_count + 1 - first_emitted) as usize);
        for visit in first_simulated..=tx_count {
            let state = course.step(visit, &mut rng);
            if visit >= first_emitted {
                states.push(state);
            }
        }
        states
    };

    info!(seed, visits = states.len(), draws = rng.draws(), "course generated");
    Ok(GenerationResult {
        states,
        used_seed: seed,
        draws: rng.draws(),
        schedule,
    })
}
