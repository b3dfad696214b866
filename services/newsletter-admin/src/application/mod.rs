pub mod commands;
mod error;
pub mod opts;
pub mod shell;

pub use self::error::Error;

use common::err_context::ErrorContextExt;
use common::settings::{BackendSettings, CredentialSettings, PreviewSettings, Settings};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::ports::secondary::{
    Confirm, CredentialProvider, DirectoryError, NewsletterDispatch, SubscriberSource,
};
use crate::domain::{
    Attempt, DisplayFragment, Format, MessageComposer, PreviewRenderer, Refusal, SelectionModel,
    SendCoordinator, SendStatus, SubscriberDirectory,
};
use crate::services::backend::HttpBackend;
use crate::services::confirm::StdinConfirm;
use crate::services::credential::SettingsCredential;

/// Everything one operator works with: the directory, the selection over it, the message being
/// composed, and the send operation.
pub struct AdminSession {
    source: Arc<dyn SubscriberSource + Send + Sync>,
    directory: SubscriberDirectory,
    selection: SelectionModel,
    composer: MessageComposer,
    renderer: PreviewRenderer,
    coordinator: SendCoordinator,
}

impl AdminSession {
    pub fn builder() -> AdminSessionBuilder {
        AdminSessionBuilder::default()
    }

    /// Fetch the directory again, and bring the selection in line with it.
    ///
    /// On failure the previous directory and selection are kept, and the error is logged before
    /// being handed back.
    pub async fn refresh(&mut self) -> Result<usize, DirectoryError> {
        match self.directory.fetch(self.source.as_ref()).await {
            Ok(_) => {
                self.selection.sync(&self.directory);
                info!(
                    subscribers = self.directory.len(),
                    selected = self.selection.count(),
                    "directory refreshed"
                );
                Ok(self.directory.len())
            }
            Err(err) => {
                warn!(error = %err, "could not refresh the subscriber directory");
                Err(err)
            }
        }
    }

    pub fn directory(&self) -> &SubscriberDirectory {
        &self.directory
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionModel {
        &mut self.selection
    }

    pub fn composer(&self) -> &MessageComposer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut MessageComposer {
        &mut self.composer
    }

    /// Render the message as it stands.
    pub fn preview(&self) -> DisplayFragment {
        self.renderer.render(self.composer.message())
    }

    pub fn status(&self) -> &SendStatus {
        self.coordinator.status()
    }

    pub fn can_send(&self) -> Result<(), Refusal> {
        self.coordinator.can_send(&self.selection, &self.composer)
    }

    pub async fn send(&mut self) -> Attempt {
        self.coordinator
            .send(&self.selection, &mut self.composer)
            .await
    }
}

impl fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSession")
            .field("directory", &self.directory)
            .field("selection", &self.selection)
            .field("composer", &self.composer)
            .field("coordinator", &self.coordinator)
            .finish()
    }
}

#[derive(Default)]
pub struct AdminSessionBuilder {
    pub credential: Option<Arc<dyn CredentialProvider + Send + Sync>>,
    pub source: Option<Arc<dyn SubscriberSource + Send + Sync>>,
    pub dispatch: Option<Arc<dyn NewsletterDispatch + Send + Sync>>,
    pub confirm: Option<Arc<dyn Confirm + Send + Sync>>,
    pub renderer: Option<PreviewRenderer>,
    pub format: Option<Format>,
}

impl AdminSessionBuilder {
    /// A builder wired to the HTTP backend, with confirmations asked on the terminal.
    pub fn new(settings: Settings) -> Result<Self, Error> {
        let Settings {
            backend,
            credential,
            preview,
            tracing: _,
            mode: _,
        } = settings;
        let builder = Self::default()
            .credential(credential)
            .backend(backend)?
            .preview(preview)
            .confirm(StdinConfirm);

        Ok(builder)
    }

    pub fn credential(mut self, settings: CredentialSettings) -> Self {
        self.credential = Some(Arc::new(SettingsCredential::new(settings)));
        self
    }

    /// Use the HTTP backend both to list subscribers and to dispatch newsletters.
    /// The credential must be set first.
    pub fn backend(mut self, settings: BackendSettings) -> Result<Self, Error> {
        let credential = self.credential.clone().ok_or_else(|| Error::Incomplete {
            context: "A credential is required to build the backend client".to_string(),
        })?;
        let backend = Arc::new(
            HttpBackend::new(settings, credential)
                .context("Building the backend client".to_string())?,
        );
        self.source = Some(backend.clone());
        self.dispatch = Some(backend);
        Ok(self)
    }

    pub fn source(mut self, source: Arc<dyn SubscriberSource + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn dispatch(mut self, dispatch: Arc<dyn NewsletterDispatch + Send + Sync>) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn confirm(mut self, confirm: impl Confirm + Send + Sync + 'static) -> Self {
        self.confirm = Some(Arc::new(confirm));
        self
    }

    pub fn preview(mut self, settings: PreviewSettings) -> Self {
        self.renderer = Some(PreviewRenderer::new(settings.sanitize));
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn build(self) -> Result<AdminSession, Error> {
        let AdminSessionBuilder {
            credential: _,
            source,
            dispatch,
            confirm,
            renderer,
            format,
        } = self;
        let source = source.ok_or_else(|| Error::Incomplete {
            context: "Missing subscriber source".to_string(),
        })?;
        let dispatch = dispatch.ok_or_else(|| Error::Incomplete {
            context: "Missing newsletter dispatch".to_string(),
        })?;
        let confirm = confirm.ok_or_else(|| Error::Incomplete {
            context: "Missing confirmation".to_string(),
        })?;
        Ok(AdminSession {
            source,
            directory: SubscriberDirectory::default(),
            selection: SelectionModel::default(),
            composer: MessageComposer::new(format.unwrap_or_default()),
            renderer: renderer.unwrap_or_default(),
            coordinator: SendCoordinator::new(dispatch, confirm),
        })
    }
}
