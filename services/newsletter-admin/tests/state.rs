use cucumber::World;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::settings::Settings;
use newsletter_admin::application::opts::{Command, Opts};
use newsletter_admin::application::{AdminSession, AdminSessionBuilder};
use newsletter_admin::domain::ports::secondary::Confirm;
use newsletter_admin::domain::{Attempt, Subscriber};

pub const SUBSCRIBERS_PATH: &str = "/api/admin/newsletter/subscribers";
pub const SEND_PATH: &str = "/api/admin/newsletter/send";

/// The TestWorld contains both the context for every tests
/// and information that needs to be kept between steps of a
/// scenario.
#[derive(World)]
#[world(init = Self::new)]
pub struct TestWorld {
    // A Mock Server standing in for the newsletter backend.
    pub backend: MockServer,
    // The operator's session, opened by a 'when' step.
    pub session: Option<AdminSession>,
    // What the operator answers to confirmation prompts.
    pub confirm: ScriptedConfirm,
    // The result of the last send.
    pub attempt: Option<Attempt>,
}

impl TestWorld {
    pub async fn new() -> Self {
        TestWorld {
            backend: MockServer::start().await,
            session: None,
            confirm: ScriptedConfirm::default(),
            attempt: None,
        }
    }

    /// Build a session from the 'testing' configuration, pointing at the mock backend.
    pub fn open_session(&mut self) -> AdminSession {
        let opts = Opts {
            config_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("..")
                .join("config"),
            run_mode: Some("testing".to_string()),
            settings: vec![format!("backend.base_url='{}/api'", self.backend.uri())],
            cmd: Command::Shell,
        };
        let settings: Settings = opts.try_into().expect("settings");
        AdminSessionBuilder::new(settings)
            .expect("session builder")
            .confirm(self.confirm.clone())
            .build()
            .expect("session")
    }

    pub fn session(&mut self) -> &mut AdminSession {
        self.session.as_mut().expect("the operator has not opened a session")
    }

    /// Replace the subscribers served by the backend.
    pub async fn serve_directory(&self, subscribers: &[Subscriber]) {
        Mock::given(method("GET"))
            .and(path(SUBSCRIBERS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(subscribers))
            .named("Subscriber directory")
            .mount(&self.backend)
            .await;
    }

    /// The recipients of every newsletter the backend received.
    pub async fn sent_newsletters(&self) -> Vec<Vec<String>> {
        self.backend
            .received_requests()
            .await
            .expect("requests recording is enabled")
            .iter()
            .filter(|request| request.url.path() == SEND_PATH)
            .map(|request| {
                let body: serde_json::Value =
                    serde_json::from_slice(&request.body).expect("json body");
                body["recipients"]
                    .as_array()
                    .expect("recipients")
                    .iter()
                    .map(|recipient| recipient.as_str().expect("address").to_string())
                    .collect()
            })
            .collect()
    }
}

impl fmt::Debug for TestWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestWorld")
            .field("backend", &self.backend.uri())
            .field("session", &self.session)
            .field("attempt", &self.attempt)
            .finish()
    }
}

/// Answers confirmation prompts as the scenario says, and remembers the last prompt.
#[derive(Debug, Clone)]
pub struct ScriptedConfirm {
    pub answer: Arc<AtomicBool>,
    pub last_prompt: Arc<Mutex<Option<String>>>,
}

impl Default for ScriptedConfirm {
    fn default() -> Self {
        ScriptedConfirm {
            answer: Arc::new(AtomicBool::new(true)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if let Ok(mut last_prompt) = self.last_prompt.lock() {
            *last_prompt = Some(prompt.to_string());
        }
        self.answer.load(Ordering::SeqCst)
    }
}

/// Parse a comma separated list of addresses. The empty string is the empty list.
pub fn addresses(list: &str) -> Vec<Subscriber> {
    list.split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(Subscriber::from)
        .collect()
}
