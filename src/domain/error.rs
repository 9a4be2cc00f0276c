//! Domain error types.
//!
//! Structural problems (bad frames, mismatched axes, unreadable data or
//! config) are errors and abort the run. Insufficient indicator history,
//! zero-loss RSI windows and ranking ties are *not* errors; they resolve
//! inside the missing/false lattice of the signal layers.

/// Top-level error type for valuescreen.
#[derive(Debug, thiserror::Error)]
pub enum ValuescreenError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("frame shape error: {reason}")]
    FrameShape { reason: String },

    #[error("axis mismatch between {left} and {right}: {reason}")]
    AxisMismatch {
        left: String,
        right: String,
        reason: String,
    },

    #[error("no usable data in {source_name}")]
    NoData { source_name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ValuescreenError> for std::process::ExitCode {
    fn from(err: &ValuescreenError) -> Self {
        let code: u8 = match err {
            ValuescreenError::Io(_) => 1,
            ValuescreenError::ConfigParse { .. }
            | ValuescreenError::ConfigMissing { .. }
            | ValuescreenError::ConfigInvalid { .. } => 2,
            ValuescreenError::Data { .. } | ValuescreenError::NoData { .. } => 3,
            ValuescreenError::FrameShape { .. } | ValuescreenError::AxisMismatch { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
