use std::sync::LazyLock;

use meridian_core::models::clinical::BodyPart;

use crate::tables::{motions, strings, AcupointPool, AdlActivities, MusclePools, RomMotion};
use crate::Region;

/// Neck: cervical paraspinal and upper-shoulder girdle muscles.
pub struct Neck;

impl Region for Neck {
    fn body_part(&self) -> BodyPart {
        BodyPart::Neck
    }

    fn name(&self) -> &str {
        "Neck"
    }

    fn muscles(&self) -> &MusclePools {
        static MUSCLES: LazyLock<MusclePools> = LazyLock::new(|| MusclePools {
            tightness: strings(&[
                "Upper Trapezius",
                "Levator Scapulae",
                "Splenius Capitis",
                "Semispinalis Capitis",
                "Sternocleidomastoid",
                "Scalene Anterior",
                "Suboccipital Muscles",
            ]),
            tenderness: strings(&[
                "Upper Trapezius",
                "Levator Scapulae",
                "Splenius Capitis",
                "Sternocleidomastoid",
                "Suboccipital Muscles",
                "Semispinalis Capitis",
            ]),
            spasm: strings(&[
                "Upper Trapezius",
                "Levator Scapulae",
                "Splenius Capitis",
                "Sternocleidomastoid",
            ]),
        });
        &MUSCLES
    }

    fn adl(&self) -> &AdlActivities {
        static ADL: LazyLock<AdlActivities> = LazyLock::new(|| AdlActivities {
            primary: strings(&[
                "turning the head while driving",
                "looking up or down for a long time",
            ]),
            secondary: strings(&[
                "sleeping on the side",
                "working at a computer",
            ]),
        });
        &ADL
    }

    fn rom_motions(&self) -> &[RomMotion] {
        static ROM: LazyLock<Vec<RomMotion>> = LazyLock::new(|| {
            motions(&[
                ("Flexion", 50),
                ("Extension", 60),
                ("Rotation to Right", 80),
                ("Rotation to Left", 80),
                ("Flexion to the Right", 45),
                ("Flexion to the Left", 45),
            ])
        });
        &ROM
    }

    fn acupoints(&self) -> &AcupointPool {
        static POINTS: LazyLock<AcupointPool> = LazyLock::new(|| AcupointPool {
            points: strings(&[
                "GB20",
                "GB21",
                "BL10",
                "SI3",
                "LI4",
                "SJ5",
                "BL11",
                "SI14",
                "SI15",
                "DU14",
            ]),
            per_course: 6,
        });
        &POINTS
    }
}
