use std::sync::LazyLock;

use meridian_core::models::clinical::BodyPart;

use crate::tables::{motions, strings, AcupointPool, AdlActivities, MusclePools, RomMotion};
use crate::Region;

/// Shoulder: glenohumeral joint and rotator cuff.
pub struct Shoulder;

impl Region for Shoulder {
    fn body_part(&self) -> BodyPart {
        BodyPart::Shoulder
    }

    fn name(&self) -> &str {
        "Shoulder"
    }

    fn muscles(&self) -> &MusclePools {
        static MUSCLES: LazyLock<MusclePools> = LazyLock::new(|| MusclePools {
            tightness: strings(&[
                "Upper Trapezius",
                "Supraspinatus",
                "Infraspinatus",
                "Teres Minor",
                "Deltoid",
                "Rhomboids",
                "Pectoralis Major",
            ]),
            tenderness: strings(&[
                "Supraspinatus",
                "Infraspinatus",
                "Deltoid",
                "Upper Trapezius",
                "Teres Minor",
                "Biceps Long Head",
            ]),
            spasm: strings(&[
                "Supraspinatus",
                "Upper Trapezius",
                "Deltoid",
                "Infraspinatus",
            ]),
        });
        &MUSCLES
    }

    fn adl(&self) -> &AdlActivities {
        static ADL: LazyLock<AdlActivities> = LazyLock::new(|| AdlActivities {
            primary: strings(&[
                "reaching overhead",
                "lifting objects",
            ]),
            secondary: strings(&[
                "putting on a jacket",
                "sleeping on the affected side",
            ]),
        });
        &ADL
    }

    fn rom_motions(&self) -> &[RomMotion] {
        static ROM: LazyLock<Vec<RomMotion>> = LazyLock::new(|| {
            motions(&[
                ("Flexion", 180),
                ("Extension", 50),
                ("Abduction", 180),
                ("Adduction", 30),
                ("Internal Rotation", 90),
                ("External Rotation", 90),
            ])
        });
        &ROM
    }

    fn acupoints(&self) -> &AcupointPool {
        static POINTS: LazyLock<AcupointPool> = LazyLock::new(|| AcupointPool {
            points: strings(&[
                "LI15",
                "SJ14",
                "SI9",
                "SI10",
                "SI11",
                "LI11",
                "LI4",
                "GB21",
                "ST38",
                "SJ5",
            ]),
            per_course: 6,
        });
        &POINTS
    }
}
