//! Error types and the error channel used to report fallible store operations.

/// A value literal that could not be parsed, with the column it failed at.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Format the error with a caret pointing at the error position in the input.
    pub fn display_with_context(&self, input: &str) -> String {
        let caret = " ".repeat(self.position) + "^";
        format!(
            "{input}\n{caret}\n{err}",
            input = input,
            caret = caret,
            err = self
        )
    }
}

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Serialization,
}

/// Failure of a load or save operation on a [`Config`](crate::domain::config::Config).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {reason}")]
    Parse { reason: String },

    #[error("invalid value for [{section}] {key}: {source}")]
    InvalidValue {
        section: String,
        key: String,
        #[source]
        source: ParseError,
    },

    #[error("cannot serialize [{section}] {key}: {reason}")]
    Serialization {
        section: String,
        key: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::Io { .. } => ErrorKind::Io,
            ConfigError::Parse { .. } | ConfigError::InvalidValue { .. } => ErrorKind::Parse,
            ConfigError::Serialization { .. } => ErrorKind::Serialization,
        }
    }
}

impl From<&ConfigError> for std::process::ExitCode {
    fn from(err: &ConfigError) -> Self {
        let code: u8 = match err.kind() {
            ErrorKind::Io => 1,
            ErrorKind::Parse => 2,
            ErrorKind::Serialization => 3,
        };
        std::process::ExitCode::from(code)
    }
}

/// Carrier for the outcome of a single fallible call.
///
/// Empty means the call succeeded. The first message recorded sticks; later
/// writes are ignored, so use a fresh channel per operation.
#[derive(Debug, Default)]
pub struct ErrorChannel {
    message: Option<String>,
}

impl ErrorChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded failure message, or `None` if nothing failed.
    pub fn get(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.message.is_some()
    }

    /// Record a failure message. Returns `false` if a message was already set.
    pub fn set(&mut self, message: impl Into<String>) -> bool {
        if self.message.is_some() {
            return false;
        }
        self.message = Some(message.into());
        true
    }

    /// Unwrap a result into the channel: the value on success, `None` (with the
    /// error message recorded) on failure.
    pub fn record<T>(&mut self, result: Result<T, ConfigError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.set(err.to_string());
                None
            }
        }
    }
}

impl From<&ConfigError> for ErrorChannel {
    fn from(err: &ConfigError) -> Self {
        Self {
            message: Some(err.to_string()),
        }
    }
}
