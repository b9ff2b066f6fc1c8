//! Helpers for reading typed parameters out of a `serde_json::Value` object,
//! plus range checks shared by settings and renderer options.
//!
//! The `param_*` readers fall back to the supplied default only when a key
//! is missing (or `null`). A key that is present with the wrong JSON type is
//! an `InvalidConfiguration` naming that key. Range checking is a separate
//! step (`ensure_*`).

use serde_json::Value;

use crate::error::RenderError;

/// Looks up `params[name]`, treating `null` as missing.
fn present<'a>(params: &'a Value, name: &str) -> Option<&'a Value> {
    params.get(name).filter(|v| !v.is_null())
}

fn wrong_type(name: &'static str, expected: &str, got: &Value) -> RenderError {
    RenderError::invalid(name, format!("expected {expected}, got {got}"))
}

/// Extracts an `f64` from `params[name]`, returning `default` if missing.
///
/// Accepts any JSON number, including integers.
pub fn param_f64(params: &Value, name: &'static str, default: f64) -> Result<f64, RenderError> {
    match present(params, name) {
        None => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| wrong_type(name, "a number", v)),
    }
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing.
///
/// Negative, fractional and non-numeric values are rejected.
pub fn param_usize(
    params: &Value,
    name: &'static str,
    default: usize,
) -> Result<usize, RenderError> {
    match present(params, name) {
        None => Ok(default),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| wrong_type(name, "a non-negative integer", v)),
    }
}

/// Extracts a `u64` from `params[name]`, returning `default` if missing.
pub fn param_u64(params: &Value, name: &'static str, default: u64) -> Result<u64, RenderError> {
    match present(params, name) {
        None => Ok(default),
        Some(v) => v
            .as_u64()
            .ok_or_else(|| wrong_type(name, "a non-negative integer", v)),
    }
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing.
pub fn param_bool(params: &Value, name: &'static str, default: bool) -> Result<bool, RenderError> {
    match present(params, name) {
        None => Ok(default),
        Some(v) => v.as_bool().ok_or_else(|| wrong_type(name, "a boolean", v)),
    }
}

/// Fails unless `value` is finite and strictly positive.
pub fn ensure_positive(field: &'static str, value: f64) -> Result<(), RenderError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RenderError::invalid(field, format!("must be > 0, got {value}")))
    }
}

/// Fails unless `value` is non-zero.
pub fn ensure_nonzero(field: &'static str, value: usize) -> Result<(), RenderError> {
    if value > 0 {
        Ok(())
    } else {
        Err(RenderError::invalid(field, "must be > 0, got 0"))
    }
}

/// Fails unless `value` lies in the closed interval [0, 1].
pub fn ensure_unit_interval(field: &'static str, value: f64) -> Result<(), RenderError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RenderError::invalid(
            field,
            format!("must be within [0, 1], got {value}"),
        ))
    }
}
