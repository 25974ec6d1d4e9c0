mod common;

use common::{assert_assessment_closed, assert_course_invariants};
use meridian_core::models::clinical::{
    BodyPart, Chronicity, FrequencyLevel, SeverityLevel, SymptomChange, Trend,
};
use meridian_core::models::request::{ContinuationState, GenerationRequest};
use meridian_core::models::schedule::Dimension;
use meridian_core::rules::{fields, RuleContext, RuleEngine, WeightedOption};
use meridian_core::whitelist::StaticWhitelist;
use meridian_engine::config::EngineConfig;
use meridian_engine::error::EngineError;
use meridian_engine::goal_path::compute_goal_paths;
use meridian_engine::rng::{SeededGenerator, DRAWS_PER_VISIT};
use meridian_engine::sequencer::goals::{derive_goals, goal_inputs};
use meridian_engine::sequencer::text::{
    guard_symptom_change, Evidence, NEGATIVE_REASONS, NEUTRAL_REASONS, POSITIVE_REASONS,
};
use meridian_engine::{generate_course, Collaborators};
use meridian_regions::region_for;

fn example_request() -> GenerationRequest {
    GenerationRequest::new(BodyPart::LowerBack, SeverityLevel::ModerateToSevere, 8.0, 20)
        .with_seed(1)
}

fn run(request: &GenerationRequest) -> meridian_core::models::request::GenerationResult {
    generate_course(request, &Collaborators::default(), &EngineConfig::default()).unwrap()
}

#[test]
fn example_course() {
    let result = run(&example_request());
    assert_eq!(result.used_seed, 1);
    assert_eq!(result.states.len(), 20);
    assert_eq!(result.schedule.st_boundary, 12);

    let goals = derive_goals(SeverityLevel::ModerateToSevere, 8.0, Chronicity::Acute, 1.0);
    assert_eq!((goals.tightness.start, goals.tightness.st, goals.tightness.lt), (4.0, 3.0, 2.0));
    assert_eq!((goals.tenderness.start, goals.tenderness.st, goals.tenderness.lt), (4.0, 2.0, 1.0));
    assert_eq!((goals.spasm.start, goals.spasm.st, goals.spasm.lt), (3.0, 2.0, 1.0));

    let count = |dimension: Dimension| {
        let visits = &result.schedule.path(dimension).unwrap().change_visits;
        let st = visits.iter().filter(|v| **v <= 12).count();
        (st, visits.len() - st)
    };
    assert_eq!(count(Dimension::Tightness), (1, 1));
    assert_eq!(count(Dimension::Tenderness), (2, 1));

    let last = result.states.last().unwrap();
    assert!(last.pain_scale_current <= goals.pain.lt);
    assert!(last.pain_scale_label <= goals.pain.lt);
    assert_eq!(last.progress, 1.0);
    assert_eq!(last.tightness_grading, 2);
    assert_eq!(last.tenderness_grading, 1);
    assert_eq!(last.spasm_grading, 1);

    assert_course_invariants(&result.states);
    assert_assessment_closed(&result.states);
}

#[test]
fn identical_inputs_give_identical_output() {
    let a = serde_json::to_string(&run(&example_request())).unwrap();
    let b = serde_json::to_string(&run(&example_request())).unwrap();
    assert_eq!(a, b);

    let other = serde_json::to_string(&run(&example_request().with_seed(2))).unwrap();
    assert_ne!(a, other);
}

#[test]
fn unseeded_run_replays_from_reported_seed() {
    let request = GenerationRequest::new(BodyPart::Neck, SeverityLevel::Moderate, 6.0, 8);
    let first = run(&request);
    let replay = run(&request.clone().with_seed(first.used_seed));
    assert_eq!(first, replay);
}

#[test]
fn draw_count_follows_the_contract() {
    let request = example_request();
    let config = EngineConfig::default();
    let goals = derive_goals(
        request.severity,
        request.start_pain,
        request.chronicity,
        config.pain_floor,
    );
    let mut rng = SeededGenerator::new(request.seed);
    compute_goal_paths(&goal_inputs(&goals), request.tx_count, &mut rng, &config.schedule);
    let schedule_draws = rng.draws();

    let result = run(&request);
    assert_eq!(result.draws, schedule_draws + DRAWS_PER_VISIT * 20);
}

#[test]
fn disabling_rebounds_keeps_the_stream_aligned() {
    let config = EngineConfig {
        bounce_probability: 0.0,
        ..EngineConfig::default()
    };
    let request = example_request();
    let quiet = generate_course(&request, &Collaborators::default(), &config).unwrap();
    let normal = run(&request);

    assert_eq!(quiet.draws, normal.draws);
    assert!(quiet.states.iter().all(|s| s.rebounds.is_empty()));
    for (q, n) in quiet.states.iter().zip(&normal.states) {
        assert_eq!(q.disruption, n.disruption);
        assert_eq!(q.progress, n.progress);
    }
}

#[test]
fn rebounds_appear_and_reverse() {
    let config = EngineConfig {
        bounce_probability: 1.0,
        ..EngineConfig::default()
    };
    let mut seen = 0;
    for seed in 0..30 {
        let request = example_request().with_seed(seed);
        let result = generate_course(&request, &Collaborators::default(), &config).unwrap();
        assert_course_invariants(&result.states);
        seen += result.states.iter().filter(|s| !s.rebounds.is_empty()).count();

        let window_opens =
            (f64::from(result.schedule.st_boundary) * config.bounce_window_ratio).floor() as u32;
        for state in result.states.iter().filter(|s| !s.rebounds.is_empty()) {
            assert!(state.visit_index > window_opens);
            assert!(state.visit_index < 20);
        }
    }
    assert!(seen > 0, "a certain rebound never fired");
}

#[test]
fn invariants_hold_for_every_region_and_severity() {
    for body_part in BodyPart::ALL {
        for severity in SeverityLevel::ALL {
            for chronicity in [Chronicity::Acute, Chronicity::Chronic] {
                let start_pain = 3.0 + f64::from(severity.rank()) * 1.5;
                let request = GenerationRequest::new(body_part, severity, start_pain, 16)
                    .with_seed(body_part as u32 * 31 + u32::from(severity.rank()))
                    .with_chronicity(chronicity);
                let result = run(&request);
                assert_eq!(result.states.len(), 16);
                assert_course_invariants(&result.states);
                assert_assessment_closed(&result.states);
            }
        }
    }
}

#[test]
fn acupoints_are_chosen_once_and_kept() {
    let result = run(&example_request());
    let pool = region_for(BodyPart::LowerBack).acupoints();
    let first = &result.states[0].acupoints;
    assert_eq!(first.len(), pool.per_course);
    assert!(first.iter().all(|p| pool.points.contains(p)));
    assert!(result.states.iter().all(|s| &s.acupoints == first));
}

#[test]
fn rom_readings_follow_the_deficit() {
    let result = run(&example_request());
    let motions = region_for(BodyPart::LowerBack).rom_motions();
    for state in &result.states {
        assert_eq!(state.rom_readings.len(), motions.len());
        for reading in &state.rom_readings {
            assert!(reading.degrees <= reading.normal_degrees);
        }
    }
    let first = &result.states[0].rom_readings[0];
    let last = &result.states[19].rom_readings[0];
    assert!(last.degrees >= first.degrees);
}

#[test]
fn frequency_reaches_intermittent_by_the_end() {
    let result = run(&example_request());
    assert_eq!(result.states[0].frequency, FrequencyLevel::Constant);
    assert_eq!(result.states[19].frequency, FrequencyLevel::Intermittent);
    assert!(result.states.iter().all(|s| s.frequency_phrase == s.frequency.phrase()));
}

#[test]
fn chronic_course_keeps_more_pain() {
    let acute = run(&example_request());
    let chronic = run(&example_request().with_chronicity(Chronicity::Chronic));
    assert!(
        chronic.states[19].pain_scale_current >= acute.states[19].pain_scale_current,
        "chronic {} < acute {}",
        chronic.states[19].pain_scale_current,
        acute.states[19].pain_scale_current
    );
}

#[test]
fn start_visit_returns_the_tail_of_the_same_course() {
    let full = run(&example_request());
    let mut request = example_request();
    request.start_visit = Some(15);
    let tail = run(&request);

    assert_eq!(tail.states.len(), 6);
    assert_eq!(tail.states[0].visit_index, 15);
    assert_eq!(tail.states, full.states[14..]);
}

#[test]
fn continuation_resumes_after_the_captured_visit() {
    let full = run(&example_request());
    let captured = &full.states[9];
    let continuation = ContinuationState::from_visit(captured);
    assert_eq!(continuation.visit_index, 10);
    assert!((continuation.baseline_pain - 8.0).abs() < 0.02);

    let resumed = run(&example_request().resuming(continuation.clone()));
    assert_eq!(resumed.states.len(), 10);
    assert_eq!(resumed.states[0].visit_index, 11);

    let first = &resumed.states[0];
    assert!(first.pain_scale_current <= captured.pain_scale_current);
    assert!(first.severity <= captured.severity);
    assert!(first.progress >= captured.progress);
    assert_eq!(first.acupoints, captured.acupoints);
    assert!(first.muscles.counts().fits_within(&captured.muscles.counts()));
    assert!(
        (first.cumulative_pain_drop - (8.0 - first.pain_scale_current)).abs() < 0.02,
        "cumulative drop must stay relative to the original baseline"
    );
    assert_course_invariants(&resumed.states);
    assert_assessment_closed(&resumed.states);
}

#[test]
fn resumed_course_reverses_a_captured_rebound() {
    let config = EngineConfig {
        bounce_probability: 1.0,
        ..EngineConfig::default()
    };
    let mut checked = 0;
    for seed in 0..50 {
        let request = GenerationRequest::new(
            BodyPart::LowerBack,
            SeverityLevel::ModerateToSevere,
            8.0,
            20,
        )
        .with_seed(seed);
        let full = generate_course(&request, &Collaborators::default(), &config).unwrap();

        for captured in full.states.iter().filter(|s| !s.rebounds.is_empty()) {
            let continuation = ContinuationState::from_visit(captured);
            assert_eq!(continuation.rebounds, captured.rebounds);

            let resumed = generate_course(
                &request.clone().resuming(continuation),
                &Collaborators::default(),
                &config,
            )
            .unwrap();
            let next = &resumed.states[0];
            assert_eq!(next.visit_index, captured.visit_index + 1);
            for dimension in &captured.rebounds {
                assert!(!next.is_rebounding(*dimension), "seed {seed}: rebound repeated");
            }

            let mut joined = vec![captured.clone()];
            joined.extend(resumed.states);
            assert_course_invariants(&joined);
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn continuation_at_the_final_visit_emits_nothing() {
    let full = run(&example_request());
    let continuation = ContinuationState::from_visit(&full.states[19]);
    let resumed = run(&example_request().resuming(continuation));
    assert!(resumed.states.is_empty());
    assert_eq!(resumed.used_seed, 1);
    assert_eq!(resumed.schedule, full.schedule);
}

#[test]
fn earlier_start_visit_does_not_replay_a_continuation() {
    let full = run(&example_request());
    let mut request = example_request().resuming(ContinuationState::from_visit(&full.states[9]));
    request.start_visit = Some(5);
    let resumed = run(&request);
    assert_eq!(resumed.states.len(), 10);
    assert_eq!(resumed.states[0].visit_index, 11);
}

#[test]
fn improvement_needs_pain_or_objective_evidence() {
    let quiet = Evidence {
        pain_delta: 0.0,
        objective_moved: false,
        rebounding: false,
        progress: 0.9,
    };
    assert_eq!(
        guard_symptom_change(SymptomChange::Improvement, &quiet, 0.7),
        SymptomChange::Similar
    );

    let objective = Evidence {
        objective_moved: true,
        progress: 0.2,
        ..quiet
    };
    assert_eq!(
        guard_symptom_change(SymptomChange::Improvement, &objective, 0.7),
        SymptomChange::Improvement
    );

    let late_pain = Evidence {
        pain_delta: 0.3,
        ..quiet
    };
    assert_eq!(
        guard_symptom_change(SymptomChange::Similar, &late_pain, 0.7),
        SymptomChange::Improvement
    );
    assert_eq!(
        guard_symptom_change(SymptomChange::Exacerbate, &quiet, 0.7),
        SymptomChange::Similar
    );
}

#[test]
fn out_of_range_request_is_clamped() {
    let request =
        GenerationRequest::new(BodyPart::Knee, SeverityLevel::Severe, 14.0, 0).with_seed(3);
    let result = run(&request);
    assert_eq!(result.states.len(), 1);
    assert_eq!(result.states[0].visit_index, 1);
    assert!(result.states[0].pain_scale_current <= 10.0);

    let mut request =
        GenerationRequest::new(BodyPart::Knee, SeverityLevel::Severe, 7.0, 5).with_seed(3);
    request.start_visit = Some(40);
    let result = run(&request);
    assert_eq!(result.states.len(), 1);
    assert_eq!(result.states[0].visit_index, 5);
}

#[test]
fn invalid_input_is_an_error() {
    let request = GenerationRequest::new(BodyPart::Hip, SeverityLevel::Mild, f64::NAN, 5);
    let err = generate_course(&request, &Collaborators::default(), &EngineConfig::default())
        .unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));

    let config = EngineConfig {
        pain_floor: 6.0,
        pain_ceiling: 2.0,
        ..EngineConfig::default()
    };
    let request = GenerationRequest::new(BodyPart::Hip, SeverityLevel::Mild, 3.0, 5);
    assert!(generate_course(&request, &Collaborators::default(), &config).is_err());
}

/// Always pushes "exacerbate" and weights nothing else.
struct Pessimist;

impl RuleEngine for Pessimist {
    fn weighted_options(
        &self,
        field: &str,
        candidates: &[String],
        _context: &RuleContext<'_>,
    ) -> Vec<WeightedOption> {
        candidates
            .iter()
            .map(|option| WeightedOption {
                option: option.clone(),
                weight: if field == fields::SYMPTOM_CHANGE && option.contains("exacerbate") {
                    1.0
                } else {
                    0.0
                },
                reasons: vec!["pessimist".to_string()],
            })
            .collect()
    }
}

#[test]
fn guards_override_an_implausible_rule_engine() {
    let whitelist = StaticWhitelist::new();
    let collaborators = Collaborators {
        rules: &Pessimist,
        whitelist: &whitelist,
    };
    let result =
        generate_course(&example_request(), &collaborators, &EngineConfig::default()).unwrap();
    assert_eq!(result.draws, run(&example_request()).draws);

    for state in &result.states {
        if state.symptom_change == SymptomChange::Exacerbate {
            assert!(!state.rebounds.is_empty());
            assert!(NEGATIVE_REASONS.contains(&state.reason.as_str()));
        }
        if state.progress > 0.7 && state.pain_delta > 0.0 {
            assert_eq!(state.symptom_change, SymptomChange::Improvement);
        }
        let pool: &[&str] = match state.symptom_change {
            SymptomChange::Improvement => &POSITIVE_REASONS,
            SymptomChange::Exacerbate => &NEGATIVE_REASONS,
            SymptomChange::Similar => &NEUTRAL_REASONS,
        };
        assert!(pool.contains(&state.reason.as_str()), "{}", state.reason);
    }
    assert_assessment_closed(&result.states);
}

#[test]
fn whitelist_bounds_text_fields() {
    let whitelist = StaticWhitelist::new()
        .with_field(
            fields::PAIN_FREQUENCY,
            [
                "Constant (symptoms occur between 76% and 100% of the time) per template",
                "Intermittent (less than a quarter of the day)",
            ],
        )
        .with_field(fields::TREATMENT_FOCUS, ["focus on lumbar stabilization"])
        .with_field(fields::REASON, ["weather change", "reduced level of pain"]);
    let collaborators = Collaborators {
        rules: &meridian_core::rules::UniformRules,
        whitelist: &whitelist,
    };
    let result =
        generate_course(&example_request(), &collaborators, &EngineConfig::default()).unwrap();

    for state in &result.states {
        assert_eq!(state.treatment_focus, "focus on lumbar stabilization");
        match state.frequency {
            FrequencyLevel::Constant => assert!(state.frequency_phrase.ends_with("per template")),
            FrequencyLevel::Intermittent => {
                assert_eq!(state.frequency_phrase, "Intermittent (less than a quarter of the day)")
            }
            other => assert_eq!(state.frequency_phrase, other.phrase()),
        }
        if state.symptom_change == SymptomChange::Improvement {
            assert_eq!(state.reason, "reduced level of pain");
        }
    }
}

#[test]
fn scores_and_changed_dims_agree_with_trends() {
    let result = run(&example_request());
    for state in &result.states {
        assert!(state.dimension_score >= 0.0);
        let rom_listed = state
            .changed_dims
            .contains(&meridian_core::models::schedule::Channel::Rom);
        assert_eq!(rom_listed, state.trends.rom != Trend::Stable);
        assert_eq!(state.soa_chain.objective.any_moved, state.trends.objective_moved());
        assert_eq!(state.soa_chain.subjective.symptom_change, state.symptom_change);
    }
}
