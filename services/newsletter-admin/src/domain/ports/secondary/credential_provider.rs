/// Interface to the store holding the bearer credential used to talk to the backend.
use secrecy::Secret;
use std::fmt;

#[cfg_attr(test, mockall::automock)]
pub trait CredentialProvider {
    /// Retrieve the current credential. This is called for every request, so that a credential
    /// renewed by the store is picked up without restarting.
    fn credential(&self) -> Result<Secret<String>, Error>;
}

#[derive(Debug)]
pub enum Error {
    /// No credential is available.
    Missing { context: String },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Missing { context } => {
                write!(fmt, "Missing Credential: {context}")
            }
        }
    }
}

impl std::error::Error for Error {}
