use meridian_core::models::clinical::BodyPart;
use meridian_regions::{all_regions, region_for, validate_all};

#[test]
fn every_table_validates() {
    validate_all().expect("region tables should be complete");
}

#[test]
fn every_body_part_has_its_own_table() {
    for body_part in BodyPart::ALL {
        assert_eq!(region_for(body_part).body_part(), body_part);
    }
    let names: Vec<_> = all_regions().iter().map(|r| r.name().to_string()).collect();
    for (i, name) in names.iter().enumerate() {
        assert!(!names[..i].contains(name), "duplicate region name {name}");
    }
}

#[test]
fn pools_support_the_largest_selection() {
    // The severe band selects up to five tightness muscles.
    for region in all_regions() {
        assert!(
            region.muscles().tightness.len() >= 5,
            "{} tightness pool too small",
            region.name()
        );
    }
}

#[test]
fn acupoint_pools_cover_a_course() {
    for region in all_regions() {
        let pool = region.acupoints();
        assert!(pool.per_course > 0);
        assert!(pool.points.len() >= pool.per_course);
    }
}

#[test]
fn lower_back_motions() {
    let motions = region_for(BodyPart::LowerBack).rom_motions();
    assert_eq!(motions[0].name, "Flexion");
    assert_eq!(motions[0].normal_degrees, 90);
    assert_eq!(motions.len(), 6);
}
