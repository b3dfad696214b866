use axum::extract::{Json, State};
use axum::headers::authorization::Bearer;
use axum::headers::Authorization;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, Router};
use axum::TypedHeader;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AppState {
    subscribers: Arc<Vec<String>>,
    token: Arc<String>,
}

impl AppState {
    pub fn new(subscribers: Vec<String>, token: String) -> Self {
        AppState {
            subscribers: Arc::new(subscribers),
            token: Arc::new(token),
        }
    }

    fn is_authorized(&self, bearer: Option<TypedHeader<Authorization<Bearer>>>) -> bool {
        bearer.map_or(false, |TypedHeader(Authorization(bearer))| {
            bearer.token() == self.token.as_str()
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/admin/newsletter/subscribers", get(list_subscribers))
        .route("/api/admin/newsletter/send", post(send_newsletter))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct SendNewsletterRequest {
    subject: String,
    #[serde(alias = "body_html")]
    content: String,
    #[serde(default = "default_true")]
    is_html: bool,
    #[serde(default)]
    recipients: Vec<String>,
}

/// GET handler for the subscriber directory
#[tracing::instrument(
    name = "Listing subscribers"
    skip(state, bearer),
    fields(request_id = %Uuid::new_v4())
)]
pub async fn list_subscribers(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Response {
    if !state.is_authorized(bearer) {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }
    Json(state.subscribers.as_ref().clone()).into_response()
}

/// POST handler for newsletter delivery
#[tracing::instrument(
    name = "Sending a newsletter"
    skip(state, bearer, request),
    fields(
        request_id = %Uuid::new_v4(),
        subject = %request.subject,
        recipients = request.recipients.len(),
    )
)]
pub async fn send_newsletter(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Json(request): Json<SendNewsletterRequest>,
) -> Response {
    if !state.is_authorized(bearer) {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    if request.recipients.is_empty() {
        return (StatusCode::OK, "No subscribers found").into_response();
    }

    let content = if request.is_html && !request.content.contains("<html") {
        wrap_in_template(&request.content)
    } else {
        request.content.clone()
    };

    let mut success = 0;
    let mut failed = 0;
    for recipient in &request.recipients {
        if state.subscribers.contains(recipient) {
            tracing::info!(
                recipient = %recipient,
                is_html = request.is_html,
                length = content.len(),
                "newsletter delivered"
            );
            success += 1;
        } else {
            tracing::error!(recipient = %recipient, "unknown recipient");
            failed += 1;
        }
    }

    (
        StatusCode::OK,
        format!("Newsletter sent. Success: {success}, Failed: {failed}"),
    )
        .into_response()
}

fn wrap_in_template(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
body {{ font-family: sans-serif; line-height: 1.6; color: #333; }}
.container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
.footer {{ font-size: 12px; color: #777; margin-top: 30px; border-top: 1px solid #eee; padding-top: 10px; }}
</style>
</head>
<body>
<div class="container">
{content}
<div class="footer"><p>You are receiving this email because you subscribed to our newsletter.</p></div>
</div>
</body>
</html>"#
    )
}
