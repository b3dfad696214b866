use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::ports::secondary::{Confirm, NewsletterDispatch};
use crate::domain::{MessageComposer, SelectionModel, SendOutcome, SendRequest, SendStatus};

/// Shown to the operator when the request did not reach the backend, or its answer could not
/// be read.
pub const TRANSPORT_FAILURE: &str = "Failed to send request";

/// Why a send was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    NoRecipients,
    InvalidMessage,
    InFlight,
}

impl fmt::Display for Refusal {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refusal::NoRecipients => write!(fmt, "no subscriber is selected"),
            Refusal::InvalidMessage => write!(fmt, "subject and content are required"),
            Refusal::InFlight => write!(fmt, "a newsletter is already being sent"),
        }
    }
}

/// What happened to a call to `SendCoordinator::send`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Preconditions were not met, nothing happened.
    Refused(Refusal),
    /// The operator did not confirm, nothing happened.
    Declined,
    /// A request was issued; the result is in the coordinator's status.
    Completed,
}

/// Drives one send operation at a time, from the operator's confirmation to the backend's
/// answer.
pub struct SendCoordinator {
    dispatch: Arc<dyn NewsletterDispatch + Send + Sync>,
    confirm: Arc<dyn Confirm + Send + Sync>,
    status: SendStatus,
}

impl SendCoordinator {
    pub fn new(
        dispatch: Arc<dyn NewsletterDispatch + Send + Sync>,
        confirm: Arc<dyn Confirm + Send + Sync>,
    ) -> Self {
        SendCoordinator {
            dispatch,
            confirm,
            status: SendStatus::Idle,
        }
    }

    pub fn status(&self) -> &SendStatus {
        &self.status
    }

    /// Check the preconditions of `send`, so that a caller can disable the action.
    pub fn can_send(
        &self,
        selection: &SelectionModel,
        composer: &MessageComposer,
    ) -> Result<(), Refusal> {
        if self.status.is_sending() {
            Err(Refusal::InFlight)
        } else if selection.is_empty() {
            Err(Refusal::NoRecipients)
        } else if !composer.is_valid() {
            Err(Refusal::InvalidMessage)
        } else {
            Ok(())
        }
    }

    /// Send the composed message to the selected subscribers.
    ///
    /// The selection and the message are captured when the request is built. On success the
    /// composer is cleared; on failure it is left untouched so the operator can fix and resend.
    #[tracing::instrument(
        name = "Sending newsletter",
        skip(self, selection, composer),
        fields(
            request_id = %Uuid::new_v4(),
            recipients = selection.count(),
        )
    )]
    pub async fn send(
        &mut self,
        selection: &SelectionModel,
        composer: &mut MessageComposer,
    ) -> Attempt {
        if let Err(refusal) = self.can_send(selection, composer) {
            warn!(%refusal, "newsletter not sent");
            return Attempt::Refused(refusal);
        }

        if !self.confirm.confirm(&confirmation_prompt(selection.count())) {
            info!("newsletter sending declined by the operator");
            return Attempt::Declined;
        }

        let sending = SendingGuard::begin(&mut self.status);

        let request = SendRequest {
            subject: composer.subject().to_string(),
            body: composer.body().to_string(),
            format: composer.format(),
            recipients: selection.recipients(),
        };

        let status = match self.dispatch.send_newsletter(&request).await {
            Ok(SendOutcome::Success(text)) => {
                info!(response = %text, "newsletter sent");
                composer.clear();
                SendStatus::Success(text)
            }
            Ok(SendOutcome::Failure(text)) => {
                warn!(response = %text, "newsletter rejected by the backend");
                SendStatus::Error(text)
            }
            Err(err) => {
                error!(error = %err, "newsletter request failed");
                SendStatus::Error(TRANSPORT_FAILURE.to_string())
            }
        };
        sending.resolve(status);

        Attempt::Completed
    }
}

/// Holds the status at `Sending` while a request is in flight. If the send future is dropped
/// before the backend answers, the status goes back to what it was.
struct SendingGuard<'a> {
    status: &'a mut SendStatus,
    previous: Option<SendStatus>,
}

impl<'a> SendingGuard<'a> {
    fn begin(status: &'a mut SendStatus) -> Self {
        let previous = std::mem::replace(status, SendStatus::Sending);
        SendingGuard {
            status,
            previous: Some(previous),
        }
    }

    fn resolve(mut self, status: SendStatus) {
        self.previous = None;
        *self.status = status;
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            warn!("newsletter send abandoned before the backend answered");
            *self.status = previous;
        }
    }
}

impl fmt::Debug for SendCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendCoordinator")
            .field("status", &self.status)
            .finish()
    }
}

fn confirmation_prompt(count: usize) -> String {
    let noun = if count == 1 { "subscriber" } else { "subscribers" };
    format!("Send this newsletter to {count} {noun}?")
}
