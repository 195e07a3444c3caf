//! Domain error types.

/// Top-level error type for weekender.
#[derive(Debug, thiserror::Error)]
pub enum WeekenderError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no price data in {source_name}")]
    NoData { source_name: String },

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

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WeekenderError {
    pub fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        WeekenderError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this error class.
    pub fn exit_status(&self) -> u8 {
        match self {
            WeekenderError::Io(_) | WeekenderError::Report { .. } => 1,
            WeekenderError::ConfigParse { .. }
            | WeekenderError::ConfigMissing { .. }
            | WeekenderError::ConfigInvalid { .. } => 2,
            WeekenderError::Data { .. }
            | WeekenderError::NoData { .. }
            | WeekenderError::Csv(_) => 5,
        }
    }
}

impl From<&WeekenderError> for std::process::ExitCode {
    fn from(err: &WeekenderError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
