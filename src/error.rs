use miette::Diagnostic;
use thiserror::Error;

/// Result type for slotname operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised around the naming engine (input loading, settings, validation)
///
/// The naming engine itself never fails; these cover the data it is fed.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(slotname::io_error))]
    Io(String),

    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    #[diagnostic(
        code(slotname::json_error),
        help("the input must be a serialized TypeUnit document")
    )]
    Json {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid settings: {message}")]
    #[diagnostic(code(slotname::settings_error))]
    Settings { message: String },

    #[error("Invalid procedure: {message}")]
    #[diagnostic(code(slotname::invalid_procedure))]
    InvalidProcedure { message: String },

    #[error("Invalid arguments: {message}")]
    #[diagnostic(code(slotname::invalid_args))]
    InvalidArgs { message: String },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
