/// Interface to the service listing the subscribers.
use async_trait::async_trait;
use common::err_context::ErrorContext;
use std::fmt;

use super::CredentialError;
use crate::domain::Subscriber;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberSource {
    /// Retrieve the full list of subscribers, in the order given by the backend.
    async fn fetch_subscribers(&self) -> Result<Vec<Subscriber>, Error>;
}

#[derive(Debug)]
pub enum Error {
    /// The backend could not be reached, or the connection failed.
    Network {
        context: String,
        source: reqwest::Error,
    },
    /// The backend rejected the credential.
    Auth { context: String, status: u16 },
    /// The backend answered with a non-success status.
    Server {
        context: String,
        status: u16,
        body: String,
    },
    /// The backend answered with something that is not a list of addresses.
    Malformed {
        context: String,
        source: serde_json::Error,
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
            Error::Network { context, source } => {
                write!(fmt, "Subscriber Directory Connection: {context} | {source}")
            }
            Error::Auth { context, status } => {
                write!(fmt, "Subscriber Directory Authorization: {context} | status {status}")
            }
            Error::Server {
                context,
                status,
                body,
            } => {
                write!(fmt, "Subscriber Directory Server: {context} | status {status}: {body}")
            }
            Error::Malformed { context, source } => {
                write!(fmt, "Subscriber Directory Response: {context} | {source}")
            }
            Error::Credential { context, source } => {
                write!(fmt, "Subscriber Directory Credential: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<String, reqwest::Error>> for Error {
    fn from(err: ErrorContext<String, reqwest::Error>) -> Self {
        Error::Network {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<String, serde_json::Error>> for Error {
    fn from(err: ErrorContext<String, serde_json::Error>) -> Self {
        Error::Malformed {
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
