//! meridian-regions
//!
//! Body-region lookup tables. Pure data, no randomness. Each region module
//! defines the muscle pools, ADL activities, measured motions and acupoint
//! pool for one [`BodyPart`]; the closed enum is mapped to its table through
//! an exhaustive match, so a new body part cannot compile without a table.

pub mod error;
pub mod regions;
pub mod tables;

use meridian_core::models::clinical::BodyPart;

use error::RegionError;
use tables::{has_duplicates, AcupointPool, AdlActivities, MusclePools, RomMotion, TableError};

/// Trait implemented by each body-region table.
pub trait Region: Send + Sync {
    fn body_part(&self) -> BodyPart;

    /// Human-readable name (e.g., "Lower Back").
    fn name(&self) -> &str;

    fn muscles(&self) -> &MusclePools;

    fn adl(&self) -> &AdlActivities;

    fn rom_motions(&self) -> &[RomMotion];

    fn acupoints(&self) -> &AcupointPool;

    /// Check the table for the shapes the engine relies on.
    fn validate(&self) -> Vec<TableError> {
        let mut errors = Vec::new();
        let muscles = self.muscles();

        for (table, pool) in [
            ("tightness", &muscles.tightness),
            ("tenderness", &muscles.tenderness),
            ("spasm", &muscles.spasm),
        ] {
            if pool.is_empty() {
                errors.push(TableError::new(table, format!("{} pool is empty", self.name())));
            } else if has_duplicates(pool) {
                errors.push(TableError::new(
                    table,
                    format!("{} pool has duplicate muscles", self.name()),
                ));
            }
        }

        if !muscles
            .tenderness
            .iter()
            .any(|m| muscles.tightness.contains(m))
        {
            errors.push(TableError::new(
                "tenderness",
                format!("{}: no tenderness candidate is also a tightness candidate", self.name()),
            ));
        }
        if !muscles.spasm.iter().any(|m| muscles.tenderness.contains(m)) {
            errors.push(TableError::new(
                "spasm",
                format!("{}: no spasm candidate is also a tenderness candidate", self.name()),
            ));
        }

        let adl = self.adl();
        if adl.primary.is_empty() || adl.secondary.is_empty() {
            errors.push(TableError::new(
                "adl",
                format!("{}: both ADL channels need activities", self.name()),
            ));
        }

        if self.rom_motions().is_empty() {
            errors.push(TableError::new("rom", format!("{}: no motions", self.name())));
        }
        for motion in self.rom_motions() {
            if motion.normal_degrees == 0 {
                errors.push(TableError::new(
                    "rom",
                    format!("{}: {} has no normal range", self.name(), motion.name),
                ));
            }
        }

        let acupoints = self.acupoints();
        if acupoints.per_course == 0 || acupoints.points.len() < acupoints.per_course {
            errors.push(TableError::new(
                "acupoints",
                format!(
                    "{}: pool of {} cannot supply {} points",
                    self.name(),
                    acupoints.points.len(),
                    acupoints.per_course
                ),
            ));
        } else if has_duplicates(&acupoints.points) {
            errors.push(TableError::new(
                "acupoints",
                format!("{}: duplicate points", self.name()),
            ));
        }

        errors
    }
}

/// Look up the table for a body part.
pub fn region_for(body_part: BodyPart) -> &'static dyn Region {
    match body_part {
        BodyPart::Neck => &regions::neck::Neck,
        BodyPart::Shoulder => &regions::shoulder::Shoulder,
        BodyPart::Elbow => &regions::elbow::Elbow,
        BodyPart::LowerBack => &regions::lower_back::LowerBack,
        BodyPart::Hip => &regions::hip::Hip,
        BodyPart::Knee => &regions::knee::Knee,
    }
}

/// Return all registered regions, in [`BodyPart::ALL`] order.
pub fn all_regions() -> Vec<&'static dyn Region> {
    BodyPart::ALL.into_iter().map(region_for).collect()
}

/// Validate every table. Run once at startup; a failure here is a data bug.
pub fn validate_all() -> Result<(), RegionError> {
    for body_part in BodyPart::ALL {
        let region = region_for(body_part);
        if region.body_part() != body_part {
            return Err(RegionError::Misregistered {
                expected: body_part,
                found: region.body_part(),
            });
        }
        let errors = region.validate();
        if !errors.is_empty() {
            return Err(RegionError::InvalidTable { body_part, errors });
        }
    }
    Ok(())
}
