use async_trait::async_trait;
use common::err_context::{ErrorContext, ErrorContextExt};
use common::settings::BackendSettings;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::ports::secondary::{
    CredentialProvider, DirectoryError, DispatchError, NewsletterDispatch, SubscriberSource,
};
use crate::domain::{SendOutcome, SendRequest, Subscriber};

#[derive(Debug)]
pub enum Error {
    /// The HTTP client could not be built from the settings.
    Configuration {
        context: String,
        source: reqwest::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { context, source } => {
                write!(fmt, "Backend Client Configuration: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<String, reqwest::Error>> for Error {
    fn from(err: ErrorContext<String, reqwest::Error>) -> Self {
        Error::Configuration {
            context: err.0,
            source: err.1,
        }
    }
}

/// Client of the newsletter backend: lists subscribers and dispatches newsletters.
#[derive(Clone)]
pub struct HttpBackend {
    http_client: Client,
    // Base URL of the API, without trailing slash.
    base_url: String,
    credential: Arc<dyn CredentialProvider + Send + Sync>,
}

impl HttpBackend {
    pub fn new(
        settings: BackendSettings,
        credential: Arc<dyn CredentialProvider + Send + Sync>,
    ) -> Result<HttpBackend, Error> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout))
            .build()
            .context("Could not build backend http client".to_string())?;
        Ok(HttpBackend {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            credential,
        })
    }

    fn subscribers_url(&self) -> String {
        format!("{}/admin/newsletter/subscribers", self.base_url)
    }

    fn send_url(&self) -> String {
        format!("{}/admin/newsletter/send", self.base_url)
    }
}

impl fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl SubscriberSource for HttpBackend {
    #[tracing::instrument(
        name = "Requesting subscribers from backend",
        skip(self),
        fields(request_id = %Uuid::new_v4())
    )]
    async fn fetch_subscribers(&self) -> Result<Vec<Subscriber>, DirectoryError> {
        let token = self
            .credential
            .credential()
            .context("Could not authorize subscribers request".to_string())?;

        let url = self.subscribers_url();
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .context(format!("http client request to {url}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("http client response".to_string())?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DirectoryError::Auth {
                context: format!("Backend refused the credential: {body}"),
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Err(DirectoryError::Server {
                context: "Backend could not list subscribers".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let subscribers = serde_json::from_str::<Vec<Subscriber>>(&body)
            .context("Expected a JSON array of email addresses".to_string())?;

        Ok(subscribers)
    }
}

#[async_trait]
impl NewsletterDispatch for HttpBackend {
    #[tracing::instrument(
        name = "Dispatching newsletter to backend",
        skip(self, request),
        fields(
            request_id = %Uuid::new_v4(),
            recipients = request.recipients.len(),
        )
    )]
    async fn send_newsletter(&self, request: &SendRequest) -> Result<SendOutcome, DispatchError> {
        let token = self
            .credential
            .credential()
            .context("Could not authorize newsletter request".to_string())?;

        let SendRequest {
            subject,
            body,
            format,
            recipients,
        } = request;

        let request_body = SendNewsletterRequest {
            subject,
            content: body,
            is_html: format.is_html(),
            recipients,
        };

        let url = self.send_url();
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .json(&request_body)
            .send()
            .await
            .context(format!("http client request to {url}"))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("http client response".to_string())?;

        if status.is_success() {
            Ok(SendOutcome::Success(text))
        } else {
            Ok(SendOutcome::Failure(text))
        }
    }
}

#[derive(Serialize)]
struct SendNewsletterRequest<'a> {
    subject: &'a str,
    content: &'a str,
    is_html: bool,
    recipients: &'a [Subscriber],
}
