use common::err_context::ErrorContext;
use std::fmt;

use crate::domain::ports::secondary::DirectoryError;
use crate::domain::Refusal;
use crate::services::backend::Error as BackendError;

#[derive(Debug)]
pub enum Error {
    Backend {
        context: String,
        source: BackendError,
    },
    Directory {
        context: String,
        source: DirectoryError,
    },
    /// The session is missing one of its collaborators.
    Incomplete {
        context: String,
    },
    /// The send was not attempted.
    Refused {
        context: String,
        source: Refusal,
    },
    /// The send was attempted and failed; the message is the one shown to the operator.
    Send {
        context: String,
        message: String,
    },
    Io {
        context: String,
        source: std::io::Error,
    },
    Json {
        context: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Backend { context, source } => {
                write!(fmt, "Backend Error: {context} | {source}")
            }
            Error::Directory { context, source } => {
                write!(fmt, "Directory Error: {context} | {source}")
            }
            Error::Incomplete { context } => {
                write!(fmt, "Incomplete Session: {context}")
            }
            Error::Refused { context, source } => {
                write!(fmt, "Newsletter Not Sent: {context} | {source}")
            }
            Error::Send { context, message } => {
                write!(fmt, "Newsletter Error: {context} | {message}")
            }
            Error::Io { context, source } => {
                write!(fmt, "IO Error: {context} | {source}")
            }
            Error::Json { context, source } => {
                write!(fmt, "JSON Error: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<String, BackendError>> for Error {
    fn from(err: ErrorContext<String, BackendError>) -> Self {
        Error::Backend {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<String, DirectoryError>> for Error {
    fn from(err: ErrorContext<String, DirectoryError>) -> Self {
        Error::Directory {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<String, Refusal>> for Error {
    fn from(err: ErrorContext<String, Refusal>) -> Self {
        Error::Refused {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<String, std::io::Error>> for Error {
    fn from(err: ErrorContext<String, std::io::Error>) -> Self {
        Error::Io {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<String, serde_json::Error>> for Error {
    fn from(err: ErrorContext<String, serde_json::Error>) -> Self {
        Error::Json {
            context: err.0,
            source: err.1,
        }
    }
}
