use std::fmt;

use crate::domain::{Format, Subscriber};

/// A snapshot of the message and the recipients, taken when the operator submits.
#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub subject: String,
    pub body: String,
    pub format: Format,
    pub recipients: Vec<Subscriber>,
}

/// What the backend answered to a dispatch request. The texts are opaque and meant to be shown
/// verbatim to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Success(String),
    Failure(String),
}

/// Status of the send operation, as seen by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SendStatus {
    #[default]
    Idle,
    Sending,
    Success(String),
    Error(String),
}

impl SendStatus {
    pub fn is_sending(&self) -> bool {
        matches!(self, SendStatus::Sending)
    }
}

impl fmt::Display for SendStatus {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendStatus::Idle => write!(fmt, "idle"),
            SendStatus::Sending => write!(fmt, "sending..."),
            SendStatus::Success(text) => write!(fmt, "success: {text}"),
            SendStatus::Error(text) => write!(fmt, "error: {text}"),
        }
    }
}
