use meridian_core::models::clinical::BodyPart;
use thiserror::Error;

use crate::tables::TableError;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("region table for {body_part} is invalid: {}", summarize(.errors))]
    InvalidTable {
        body_part: BodyPart,
        errors: Vec<TableError>,
    },

    #[error("region table {found} registered under {expected}")]
    Misregistered { expected: BodyPart, found: BodyPart },
}

fn summarize(errors: &[TableError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
