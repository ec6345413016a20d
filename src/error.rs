use miette::Diagnostic;
use thiserror::Error;

/// Main error type for xqc operations
#[derive(Error, Diagnostic, Debug)]
pub enum XqError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(xqc::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(xqc::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Codec error: {message}")]
    #[diagnostic(code(xqc::codec))]
    Codec {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(xqc::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Export error: {message}")]
    #[diagnostic(code(xqc::export))]
    Export {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl XqError {
    /// Shorthand for a codec error without help text.
    pub(crate) fn codec(message: impl Into<String>) -> Self {
        XqError::Codec {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, XqError>;
