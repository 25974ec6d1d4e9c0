use std::sync::LazyLock;

use meridian_core::models::clinical::BodyPart;

use crate::tables::{motions, strings, AcupointPool, AdlActivities, MusclePools, RomMotion};
use crate::Region;

/// Lower Back: lumbar paraspinals, quadratus lumborum and hip stabilizers.
pub struct LowerBack;

impl Region for LowerBack {
    fn body_part(&self) -> BodyPart {
        BodyPart::LowerBack
    }

    fn name(&self) -> &str {
        "Lower Back"
    }

    fn muscles(&self) -> &MusclePools {
        static MUSCLES: LazyLock<MusclePools> = LazyLock::new(|| MusclePools {
            tightness: strings(&[
                "Erector Spinae",
                "Quadratus Lumborum",
                "Multifidus",
                "Iliopsoas",
                "Gluteus Medius",
                "Piriformis",
                "Latissimus Dorsi",
            ]),
            tenderness: strings(&[
                "Quadratus Lumborum",
                "Erector Spinae",
                "Multifidus",
                "Gluteus Medius",
                "Piriformis",
                "Iliolumbar Ligament",
            ]),
            spasm: strings(&[
                "Erector Spinae",
                "Quadratus Lumborum",
                "Multifidus",
                "Piriformis",
            ]),
        });
        &MUSCLES
    }

    fn adl(&self) -> &AdlActivities {
        static ADL: LazyLock<AdlActivities> = LazyLock::new(|| AdlActivities {
            primary: strings(&[
                "bending to put on shoes",
                "lifting objects from the floor",
            ]),
            secondary: strings(&[
                "sitting for a long time",
                "standing up from a chair",
            ]),
        });
        &ADL
    }

    fn rom_motions(&self) -> &[RomMotion] {
        static ROM: LazyLock<Vec<RomMotion>> = LazyLock::new(|| {
            motions(&[
                ("Flexion", 90),
                ("Extension", 30),
                ("Flexion to the Right", 30),
                ("Flexion to the Left", 30),
                ("Rotation to Right", 30),
                ("Rotation to Left", 30),
            ])
        });
        &ROM
    }

    fn acupoints(&self) -> &AcupointPool {
        static POINTS: LazyLock<AcupointPool> = LazyLock::new(|| AcupointPool {
            points: strings(&[
                "BL23",
                "BL25",
                "BL40",
                "BL52",
                "DU3",
                "DU4",
                "GB30",
                "BL60",
                "KI3",
                "Yaotongxue",
            ]),
            per_course: 6,
        });
        &POINTS
    }
}
