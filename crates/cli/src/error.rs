//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: render error (unknown renderer, invalid settings or options)
//! - 11: I/O error (image decode, export or preview write)
//! - 12: input error (bad JSON params, unknown export format)
//! - 13: serialization error

use plotline_core::RenderError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A configuration error (unknown renderer, out-of-range setting).
    Render(RenderError),
    /// An I/O error (reading the source image, writing output).
    Io(String),
    /// A user input error (bad JSON params, unknown export format).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Render(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Io(_) | RenderError::Image(_) => CliError::Io(e.to_string()),
            RenderError::UnknownFormat(_) => CliError::Input(e.to_string()),
            other => CliError::Render(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_exit_code_is_10() {
        let err = CliError::Render(RenderError::UnknownRenderer("foo".into()));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("write failed".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad params".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn from_render_error_io_routes_to_cli_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let cli_err = CliError::from(RenderError::from(io));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn from_render_error_image_routes_to_cli_io() {
        let cli_err = CliError::from(RenderError::Image("corrupt header".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("corrupt header"));
    }

    #[test]
    fn from_render_error_unknown_format_routes_to_input() {
        let cli_err = CliError::from(RenderError::UnknownFormat("svg".into()));
        assert_eq!(cli_err.exit_code(), 12);
    }

    #[test]
    fn from_render_error_config_routes_to_cli_render() {
        let cli_err = CliError::from(RenderError::invalid("line_spacing", "must be > 0"));
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("line_spacing"));
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
