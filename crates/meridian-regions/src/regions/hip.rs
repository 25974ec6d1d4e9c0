use std::sync::LazyLock;

use meridian_core::models::clinical::BodyPart;

use crate::tables::{motions, strings, AcupointPool, AdlActivities, MusclePools, RomMotion};
use crate::Region;

/// Hip: coxofemoral joint, gluteal group and hip flexors.
pub struct Hip;

impl Region for Hip {
    fn body_part(&self) -> BodyPart {
        BodyPart::Hip
    }

    fn name(&self) -> &str {
        "Hip"
    }

    fn muscles(&self) -> &MusclePools {
        static MUSCLES: LazyLock<MusclePools> = LazyLock::new(|| MusclePools {
            tightness: strings(&[
                "Gluteus Medius",
                "Gluteus Maximus",
                "Piriformis",
                "Tensor Fasciae Latae",
                "Iliopsoas",
                "Adductor Longus",
            ]),
            tenderness: strings(&[
                "Gluteus Medius",
                "Piriformis",
                "Tensor Fasciae Latae",
                "Iliopsoas",
                "Greater Trochanter Bursa",
            ]),
            spasm: strings(&[
                "Piriformis",
                "Gluteus Medius",
                "Iliopsoas",
            ]),
        });
        &MUSCLES
    }

    fn adl(&self) -> &AdlActivities {
        static ADL: LazyLock<AdlActivities> = LazyLock::new(|| AdlActivities {
            primary: strings(&[
                "climbing stairs",
                "getting in and out of a car",
            ]),
            secondary: strings(&[
                "walking for a long time",
                "putting on socks",
            ]),
        });
        &ADL
    }

    fn rom_motions(&self) -> &[RomMotion] {
        static ROM: LazyLock<Vec<RomMotion>> = LazyLock::new(|| {
            motions(&[
                ("Flexion", 120),
                ("Extension", 30),
                ("Abduction", 45),
                ("Adduction", 30),
                ("Internal Rotation", 45),
                ("External Rotation", 45),
            ])
        });
        &ROM
    }

    fn acupoints(&self) -> &AcupointPool {
        static POINTS: LazyLock<AcupointPool> = LazyLock::new(|| AcupointPool {
            points: strings(&[
                "GB30",
                "GB29",
                "GB34",
                "BL54",
                "ST31",
                "GB31",
                "BL40",
                "SP6",
                "LR3",
                "GB39",
            ]),
            per_course: 6,
        });
        &POINTS
    }
}
