use std::sync::LazyLock;

use meridian_core::models::clinical::BodyPart;

use crate::tables::{motions, strings, AcupointPool, AdlActivities, MusclePools, RomMotion};
use crate::Region;

/// Knee: tibiofemoral joint with quadriceps, hamstrings and calf.
pub struct Knee;

impl Region for Knee {
    fn body_part(&self) -> BodyPart {
        BodyPart::Knee
    }

    fn name(&self) -> &str {
        "Knee"
    }

    fn muscles(&self) -> &MusclePools {
        static MUSCLES: LazyLock<MusclePools> = LazyLock::new(|| MusclePools {
            tightness: strings(&[
                "Quadriceps",
                "Hamstrings",
                "Gastrocnemius",
                "Iliotibial Band",
                "Popliteus",
                "Sartorius",
            ]),
            tenderness: strings(&[
                "Quadriceps",
                "Hamstrings",
                "Popliteus",
                "Iliotibial Band",
                "Pes Anserine",
            ]),
            spasm: strings(&[
                "Hamstrings",
                "Gastrocnemius",
                "Quadriceps",
            ]),
        });
        &MUSCLES
    }

    fn adl(&self) -> &AdlActivities {
        static ADL: LazyLock<AdlActivities> = LazyLock::new(|| AdlActivities {
            primary: strings(&[
                "climbing stairs",
                "squatting",
            ]),
            secondary: strings(&[
                "kneeling",
                "walking downhill",
            ]),
        });
        &ADL
    }

    fn rom_motions(&self) -> &[RomMotion] {
        static ROM: LazyLock<Vec<RomMotion>> = LazyLock::new(|| {
            motions(&[
                ("Flexion", 135),
            ])
        });
        &ROM
    }

    fn acupoints(&self) -> &AcupointPool {
        static POINTS: LazyLock<AcupointPool> = LazyLock::new(|| AcupointPool {
            points: strings(&[
                "ST35",
                "Xiyan",
                "ST36",
                "SP9",
                "SP10",
                "GB34",
                "ST34",
                "BL40",
                "Heding",
                "LR8",
            ]),
            per_course: 6,
        });
        &POINTS
    }
}
