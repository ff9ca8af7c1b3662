/// Result alias that carries the custom [`JazzWheelError`] type.
pub type Result<T> = std::result::Result<T, JazzWheelError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum JazzWheelError {
    /// The spelling matches neither the sharp nor the flat note table.
    #[error("unknown note `{spelling}`")]
    UnknownNote { spelling: String },
    /// No standard in the catalog carries the requested identifier.
    #[error("unknown standard `{0}`")]
    UnknownStandard(String),
    /// A textual value could not be parsed into one of the closed sets used
    /// by the catalog (styles, tempos, notation preferences, ...).
    #[error("invalid {kind} `{value}`")]
    InvalidValue { kind: &'static str, value: String },
    /// Free-form message for conditions without a dedicated variant.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON (de)serialisation errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl JazzWheelError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn invalid(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}

impl From<&str> for JazzWheelError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for JazzWheelError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
