#![allow(dead_code)]

use meridian_core::models::clinical::{SymptomChange, Trend};
use meridian_core::models::schedule::Dimension;
use meridian_core::models::visit::VisitState;
use meridian_engine::assessment::{
    ADVERSE_EFFECT, FINDING_TYPE_ITEMS, PATIENT_CHANGE, PHYSICAL_CHANGE, PRESENT,
    RESPONSE_IMPROVING, RESPONSE_NEUTRAL, TOLERATED, WHAT_CHANGED_ITEMS,
};

fn muscle_grade(state: &VisitState, dimension: Dimension) -> u8 {
    match dimension {
        Dimension::Tightness => state.tightness_grading,
        Dimension::Tenderness => state.tenderness_grading,
        Dimension::Spasm => state.spasm_grading,
        _ => unreachable!("not a muscle dimension"),
    }
}

fn muscle_trend(state: &VisitState, dimension: Dimension) -> Trend {
    match dimension {
        Dimension::Tightness => state.trends.tightness,
        Dimension::Tenderness => state.trends.tenderness,
        Dimension::Spasm => state.trends.spasm,
        _ => unreachable!("not a muscle dimension"),
    }
}

/// Split `"a, b and c"` back into its items.
pub fn split_items(joined: &str) -> Vec<String> {
    joined
        .replace(" and ", ", ")
        .split(", ")
        .map(str::to_string)
        .collect()
}

/// Every cross-visit invariant a generated course must satisfy.
pub fn assert_course_invariants(states: &[VisitState]) {
    for state in states {
        assert!(state.muscles.is_nested(), "visit {}: muscles not nested", state.visit_index);
        assert!((0.0..=1.0).contains(&state.progress));
    }

    for pair in states.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let v = b.visit_index;
        assert_eq!(v, a.visit_index + 1, "visits must be contiguous");

        assert!(b.progress >= a.progress, "visit {v}: progress went back");
        assert!(b.pain_scale_current <= a.pain_scale_current, "visit {v}: pain rose");
        assert!(b.pain_scale_label <= a.pain_scale_label, "visit {v}: pain label rose");
        assert!(b.severity <= a.severity, "visit {v}: severity worsened");
        assert!(b.frequency <= a.frequency, "visit {v}: frequency worsened");
        assert!(b.symptom_scale <= a.symptom_scale, "visit {v}: symptom scale rose");
        assert!(b.adl.primary_grade <= a.adl.primary_grade);
        assert!(b.adl.secondary_grade <= a.adl.secondary_grade);
        assert!(b.strength_grade_index >= a.strength_grade_index);
        assert!(b.rom_deficit <= a.rom_deficit);
        assert!(b.strength_deficit <= a.strength_deficit);

        let (ca, cb) = (a.muscles.counts(), b.muscles.counts());
        assert!(cb.tightness <= ca.tightness);
        assert!(cb.tenderness <= ca.tenderness);
        assert!(cb.spasm <= ca.spasm);

        for dimension in [Dimension::Tightness, Dimension::Tenderness, Dimension::Spasm] {
            let (ga, gb) = (muscle_grade(a, dimension), muscle_grade(b, dimension));
            if b.is_rebounding(dimension) {
                assert!(!a.is_rebounding(dimension), "visit {v}: back-to-back rebound");
                assert_eq!(gb, ga + 1, "visit {v}: rebound must be exactly one grade");
                assert_eq!(muscle_trend(b, dimension), Trend::Stable);
            } else if a.is_rebounding(dimension) {
                assert_eq!(gb + 1, ga, "visit {v}: rebound not reversed");
                assert_eq!(muscle_trend(b, dimension), Trend::Stable);
            } else {
                assert!(gb <= ga, "visit {v}: {} worsened", dimension.name());
            }
        }
    }

    if let Some(last) = states.last() {
        assert!(last.rebounds.is_empty(), "final visit rebounded");
    }
}

/// Every assessment string comes from the published vocabulary and is
/// backed by what moved.
pub fn assert_assessment_closed(states: &[VisitState]) {
    for state in states {
        let a = &state.assessment;
        let t = &state.trends;
        assert!(PRESENT.contains(&a.present.as_str()));
        assert!(PATIENT_CHANGE.contains(&a.patient_change.as_str()));
        assert!(PHYSICAL_CHANGE.contains(&a.physical_change.as_str()));
        assert!(TOLERATED.contains(&a.tolerated.as_str()));
        assert!(
            RESPONSE_NEUTRAL.contains(&a.response.as_str())
                || RESPONSE_IMPROVING.contains(&a.response.as_str())
        );
        assert!(ADVERSE_EFFECT.contains(&a.adverse_effect.as_str()));

        for item in split_items(&a.what_changed) {
            assert!(WHAT_CHANGED_ITEMS.contains(&item.as_str()), "{item}");
            let backed = match item.as_str() {
                "pain frequency" => t.frequency.is_changed(),
                "difficulty in performing ADLs" => t.adl.is_changed(),
                "joint ROM" => t.rom.is_changed(),
                "muscles strength" => t.strength.is_changed(),
                "muscles tightness" => t.tightness.is_changed(),
                _ => true,
            };
            assert!(backed, "visit {}: '{item}' listed without movement", state.visit_index);
        }

        if t.objective_moved() {
            for item in split_items(&a.finding_type) {
                assert!(FINDING_TYPE_ITEMS.contains(&item.as_str()), "{item}");
                let backed = match item.as_str() {
                    "joint ROM" | "joint ROM limitation" => t.rom.is_changed(),
                    "muscles strength" => t.strength.is_changed(),
                    "muscles tightness" => t.tightness.is_changed(),
                    "muscles tenderness" => t.tenderness.is_changed(),
                    "muscles spasms" => t.spasm.is_changed(),
                    _ => false,
                };
                assert!(backed, "visit {}: finding '{item}' without movement", state.visit_index);
            }
        } else {
            assert_eq!(a.finding_type, "joint ROM limitation");
            assert_eq!(a.physical_change, "remained the same");
        }

        match state.symptom_change {
            SymptomChange::Improvement => assert!(
                state.pain_delta > 0.0 || t.objective_moved(),
                "visit {}: improvement without evidence",
                state.visit_index
            ),
            SymptomChange::Exacerbate => assert!(!state.rebounds.is_empty()),
            SymptomChange::Similar => {}
        }
    }
}
