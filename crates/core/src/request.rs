//! Reproducible description of one render call.
//!
//! A [`RenderRequest`] names a renderer and carries the shared settings plus
//! renderer-specific options. Together with the pixel buffer it fully
//! determines the returned segments, so requests can be stored next to an
//! export and replayed later.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::settings::RenderSettings;

/// The request half of a render call: (renderer, settings, options).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderRequest {
    pub renderer: String,
    pub settings: RenderSettings,
    #[serde(default = "empty_object")]
    pub params: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl RenderRequest {
    /// Creates a request with default renderer options (`{}`).
    pub fn new(renderer: &str, settings: RenderSettings) -> Self {
        Self {
            renderer: renderer.to_string(),
            settings,
            params: empty_object(),
        }
    }

    /// Replaces the renderer options.
    pub fn with_params(self, params: serde_json::Value) -> Self {
        Self { params, ..self }
    }

    /// Checks the parts that do not depend on which renderers exist:
    /// a non-empty renderer name and an object (or null) for `params`.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.renderer.trim().is_empty() {
            return Err(RenderError::invalid("renderer", "must not be empty"));
        }
        if !(self.params.is_object() || self.params.is_null()) {
            return Err(RenderError::invalid("params", "must be a JSON object"));
        }
        Ok(())
    }
}
