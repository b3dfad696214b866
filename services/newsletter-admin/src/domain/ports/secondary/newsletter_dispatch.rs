/// Interface to the service broadcasting a newsletter.
use async_trait::async_trait;
use common::err_context::ErrorContext;
use std::fmt;

use super::CredentialError;
use crate::domain::{SendOutcome, SendRequest};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsletterDispatch {
    /// Issue exactly one dispatch request.
    ///
    /// Any response from the backend is an `Ok`: a success status gives a
    /// `SendOutcome::Success`, any other status a `SendOutcome::Failure`, both carrying the
    /// response text. `Err` is reserved for transport-level failures.
    async fn send_newsletter(&self, request: &SendRequest) -> Result<SendOutcome, Error>;
}

#[derive(Debug)]
pub enum Error {
    /// The request could not be delivered, or the response could not be read.
    Transport {
        context: String,
        source: reqwest::Error,
    },
    /// No credential could be obtained to authorize the request.
    Credential {
        context: String,
        source: CredentialError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport { context, source } => {
                write!(fmt, "Newsletter Dispatch Transport: {context} | {source}")
            }
            Error::Credential { context, source } => {
                write!(fmt, "Newsletter Dispatch Credential: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<String, reqwest::Error>> for Error {
    fn from(err: ErrorContext<String, reqwest::Error>) -> Self {
        Error::Transport {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<String, CredentialError>> for Error {
    fn from(err: ErrorContext<String, CredentialError>) -> Self {
        Error::Credential {
            context: err.0,
            source: err.1,
        }
    }
}
