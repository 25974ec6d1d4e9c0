use meridian_core::error::CoreError;
use meridian_core::models::clinical::{
    BodyPart, Chronicity, FrequencyLevel, SeverityLevel, SymptomChange, Trend,
};
use meridian_core::models::grading::{
    snap_half, snap_half_down, spasm_text, strength_label, tenderness_text, tightness_text,
};
use meridian_core::models::schedule::{Dimension, GoalPath, GoalSchedule};
use meridian_core::rules::{RuleContext, RuleEngine, UniformRules};
use meridian_core::models::clinical::{InsuranceType, Laterality};
use meridian_core::whitelist::{EmptyWhitelist, OptionWhitelist, StaticWhitelist};

#[test]
fn body_part_parses_loose_spellings() {
    assert_eq!("Lower Back".parse::<BodyPart>().unwrap(), BodyPart::LowerBack);
    assert_eq!("lower-back".parse::<BodyPart>().unwrap(), BodyPart::LowerBack);
    assert_eq!("KNEE".parse::<BodyPart>().unwrap(), BodyPart::Knee);
    for part in BodyPart::ALL {
        assert_eq!(part.as_str().parse::<BodyPart>().unwrap(), part);
    }
}

#[test]
fn unknown_body_part_is_an_error() {
    let err = "elbowz".parse::<BodyPart>().unwrap_err();
    assert!(matches!(err, CoreError::UnknownBodyPart(ref s) if s == "elbowz"));
}

#[test]
fn severity_parses_and_orders() {
    assert_eq!(
        "moderate to severe".parse::<SeverityLevel>().unwrap(),
        SeverityLevel::ModerateToSevere
    );
    assert!("extreme".parse::<SeverityLevel>().is_err());
    assert!(SeverityLevel::Mild < SeverityLevel::Severe);
    for level in SeverityLevel::ALL {
        assert_eq!(SeverityLevel::from_rank(level.rank()), level);
    }
}

#[test]
fn severity_pain_bands() {
    assert_eq!(SeverityLevel::from_pain(10.0), SeverityLevel::Severe);
    assert_eq!(SeverityLevel::from_pain(9.0), SeverityLevel::Severe);
    assert_eq!(SeverityLevel::from_pain(8.5), SeverityLevel::ModerateToSevere);
    assert_eq!(SeverityLevel::from_pain(5.0), SeverityLevel::Moderate);
    assert_eq!(SeverityLevel::from_pain(4.5), SeverityLevel::MildToModerate);
    assert_eq!(SeverityLevel::from_pain(2.0), SeverityLevel::Mild);
    assert_eq!(SeverityLevel::Mild.milder(), SeverityLevel::Mild);
}

#[test]
fn frequency_follows_severity() {
    assert_eq!(
        FrequencyLevel::for_severity(SeverityLevel::Severe),
        FrequencyLevel::Constant
    );
    assert_eq!(
        FrequencyLevel::for_severity(SeverityLevel::Mild),
        FrequencyLevel::Intermittent
    );
    assert!(FrequencyLevel::Constant.phrase().starts_with("Constant"));
    assert!("sometimes".parse::<FrequencyLevel>().is_err());
}

#[test]
fn chronicity_parses() {
    assert_eq!("Sub-acute".parse::<Chronicity>().unwrap(), Chronicity::Subacute);
    assert!(Chronicity::Chronic.is_chronic());
    assert!(!Chronicity::Acute.is_chronic());
}

#[test]
fn trend_wording() {
    assert_eq!(Trend::SlightlyImproved.label(), "slightly improved");
    assert_eq!(Trend::Improved.reduced_label(), "reduced");
    assert_eq!(Trend::Stable.weight_factor(), 0.0);
    assert!(!Trend::Stable.is_changed());
}

#[test]
fn symptom_change_classifies_free_text() {
    assert_eq!(
        SymptomChange::classify("Improvement of symptom(s)"),
        Some(SymptomChange::Improvement)
    );
    assert_eq!(
        SymptomChange::classify("exacerbate of symptom(s)"),
        Some(SymptomChange::Exacerbate)
    );
    assert_eq!(
        SymptomChange::classify("similar symptom(s)"),
        Some(SymptomChange::Similar)
    );
    assert_eq!(SymptomChange::classify("n/a"), None);
}

#[test]
fn grade_text_saturates() {
    assert_eq!(tightness_text(3), "Moderate");
    assert_eq!(tightness_text(42), "Severe");
    assert!(tenderness_text(1).starts_with("(+1)"));
    assert!(tenderness_text(9).starts_with("(+4)"));
    assert!(spasm_text(0).starts_with("(0)"));
    assert_eq!(strength_label(0), "3/5");
    assert_eq!(strength_label(99), "5/5");
}

#[test]
fn half_point_snapping() {
    assert_eq!(snap_half(6.2), 6.0);
    assert_eq!(snap_half(6.3), 6.5);
    assert_eq!(snap_half_down(6.4), 6.0);
    assert_eq!(snap_half_down(6.5), 6.5);
}

#[test]
fn goal_schedule_lookups() {
    let schedule = GoalSchedule {
        tx_count: 10,
        st_boundary: 6,
        paths: vec![
            GoalPath {
                dimension: Dimension::Tightness,
                start_value: 4.0,
                st_goal: 3.0,
                lt_goal: 2.0,
                change_visits: vec![3, 8],
            },
            GoalPath {
                dimension: Dimension::StrengthGrade,
                start_value: 1.0,
                st_goal: 2.0,
                lt_goal: 3.0,
                change_visits: vec![3, 9],
            },
        ],
    };
    assert_eq!(
        schedule.changes_at(3),
        vec![Dimension::Tightness, Dimension::StrengthGrade]
    );
    assert!(schedule.changes_on(Dimension::Tightness, 8));
    assert!(!schedule.changes_on(Dimension::Spasm, 8));
    assert_eq!(schedule.path(Dimension::Tightness).unwrap().direction(), -1.0);
    assert_eq!(schedule.path(Dimension::StrengthGrade).unwrap().direction(), 1.0);
}

#[test]
fn static_whitelist_from_json() {
    let whitelist = StaticWhitelist::from_json(
        r#"{"subjective.connector": ["because of", "due to"], "plan.treatmentFocus": []}"#,
    )
    .unwrap();
    assert_eq!(whitelist.len(), 2);
    assert_eq!(
        whitelist.options_for_field("subjective.connector").unwrap(),
        &["because of".to_string(), "due to".to_string()]
    );
    // Empty option lists behave like a missing field.
    assert!(whitelist.options_for_field("plan.treatmentFocus").is_none());
    assert!(EmptyWhitelist.options_for_field("subjective.connector").is_none());
}

#[test]
fn uniform_rules_weight_every_candidate() {
    let candidates = vec!["a".to_string(), "b".to_string()];
    let context = RuleContext {
        insurance: InsuranceType::None,
        body_part: BodyPart::Neck,
        laterality: Laterality::Left,
        chronicity: Chronicity::Acute,
        pain: 7.0,
        progress: 0.1,
        visit_index: 1,
        diagnosis_patterns: &[],
    };
    let weighted = UniformRules.weighted_options("x", &candidates, &context);
    assert_eq!(weighted.len(), 2);
    assert!(weighted.iter().all(|w| w.weight == 1.0));
}
