//! Template option whitelist seam.
//!
//! The whitelist is built once from the note templates (outside this
//! workspace) and passed by reference into every generation call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub trait OptionWhitelist: Send + Sync {
    /// Allowed options for `field`, or `None` when the templates don't
    /// define it.
    fn options_for_field(&self, field: &str) -> Option<&[String]>;
}

/// A whitelist with no fields; every picker uses its hardcoded defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWhitelist;

impl OptionWhitelist for EmptyWhitelist {
    fn options_for_field(&self, _field: &str) -> Option<&[String]> {
        None
    }
}

/// Read-only map of field path to allowed options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticWhitelist {
    fields: HashMap<String, Vec<String>>,
}

impl StaticWhitelist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field<I, S>(mut self, field: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(field.to_string(), options.into_iter().map(Into::into).collect());
        self
    }

    /// Parse a `{ "field.path": ["option", ...] }` JSON document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let fields: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl OptionWhitelist for StaticWhitelist {
    fn options_for_field(&self, field: &str) -> Option<&[String]> {
        self.fields
            .get(field)
            .map(Vec::as_slice)
            .filter(|options| !options.is_empty())
    }
}
