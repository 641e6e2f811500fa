use thiserror::Error;

/// Minimum number of input rows a chord diagram can be built from.
pub const MIN_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagramError {
    #[error("invalid data: minimum of {required} rows required, got {rows}")]
    InsufficientData { rows: usize, required: usize },

    #[error("invalid option `{option}`: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    #[error("invalid table: {0}")]
    Table(String),
}

impl DiagramError {
    pub(crate) fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = DiagramError> = std::result::Result<T, E>;
