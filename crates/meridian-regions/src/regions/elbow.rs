use std::sync::LazyLock;

use meridian_core::models::clinical::BodyPart;

use crate::tables::{motions, strings, AcupointPool, AdlActivities, MusclePools, RomMotion};
use crate::Region;

/// Elbow: humeroulnar joint and forearm extensor/flexor groups.
pub struct Elbow;

impl Region for Elbow {
    fn body_part(&self) -> BodyPart {
        BodyPart::Elbow
    }

    fn name(&self) -> &str {
        "Elbow"
    }

    fn muscles(&self) -> &MusclePools {
        static MUSCLES: LazyLock<MusclePools> = LazyLock::new(|| MusclePools {
            tightness: strings(&[
                "Brachioradialis",
                "Extensor Carpi Radialis Longus",
                "Extensor Carpi Radialis Brevis",
                "Pronator Teres",
                "Biceps Brachii",
                "Triceps Brachii",
            ]),
            tenderness: strings(&[
                "Extensor Carpi Radialis Brevis",
                "Brachioradialis",
                "Extensor Carpi Radialis Longus",
                "Pronator Teres",
                "Common Extensor Origin",
            ]),
            spasm: strings(&[
                "Brachioradialis",
                "Extensor Carpi Radialis Brevis",
                "Pronator Teres",
            ]),
        });
        &MUSCLES
    }

    fn adl(&self) -> &AdlActivities {
        static ADL: LazyLock<AdlActivities> = LazyLock::new(|| AdlActivities {
            primary: strings(&[
                "gripping objects",
                "carrying grocery bags",
            ]),
            secondary: strings(&[
                "opening jars",
                "typing for a long time",
            ]),
        });
        &ADL
    }

    fn rom_motions(&self) -> &[RomMotion] {
        static ROM: LazyLock<Vec<RomMotion>> = LazyLock::new(|| {
            motions(&[
                ("Flexion", 150),
                ("Supination", 80),
                ("Pronation", 80),
            ])
        });
        &ROM
    }

    fn acupoints(&self) -> &AcupointPool {
        static POINTS: LazyLock<AcupointPool> = LazyLock::new(|| AcupointPool {
            points: strings(&[
                "LI11",
                "LI10",
                "LI12",
                "LU5",
                "SJ5",
                "SJ10",
                "HT3",
                "SI8",
                "LI4",
            ]),
            per_course: 5,
        });
        &POINTS
    }
}
