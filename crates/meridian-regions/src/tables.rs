use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Candidate muscles per finding category.
///
/// The selector intersects these pools in order, so a muscle can only be
/// tender if it is also in the tightness pool, and only spasm if tender.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MusclePools {
    pub tightness: Vec<String>,
    pub tenderness: Vec<String>,
    pub spasm: Vec<String>,
}

/// Activities of daily living affected in this region, split across the two
/// ADL channels.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdlActivities {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

/// A measured motion and its normal range.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RomMotion {
    pub name: String,
    pub normal_degrees: u32,
}

/// Acupuncture points for the region and how many a course uses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AcupointPool {
    pub points: Vec<String>,
    pub per_course: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{table}: {message}")]
pub struct TableError {
    pub table: String,
    pub message: String,
}

impl TableError {
    pub(crate) fn new(table: &str, message: impl Into<String>) -> Self {
        Self {
            table: table.to_string(),
            message: message.into(),
        }
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn motions(items: &[(&str, u32)]) -> Vec<RomMotion> {
    items
        .iter()
        .map(|(name, normal_degrees)| RomMotion {
            name: name.to_string(),
            normal_degrees: *normal_degrees,
        })
        .collect()
}

pub(crate) fn has_duplicates(items: &[String]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(i, item)| items[..i].contains(item))
}
