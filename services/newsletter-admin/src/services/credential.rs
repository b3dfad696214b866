use common::settings::CredentialSettings;
use secrecy::{ExposeSecret, Secret};
use std::env;

use crate::domain::ports::secondary::{CredentialError as Error, CredentialProvider};

/// Credential taken from the settings, or else from an environment variable read at each
/// request.
#[derive(Debug, Clone)]
pub struct SettingsCredential {
    token: Option<Secret<String>>,
    env_var: String,
}

impl SettingsCredential {
    pub fn new(settings: CredentialSettings) -> Self {
        let CredentialSettings { token, env_var } = settings;
        SettingsCredential { token, env_var }
    }
}

impl CredentialProvider for SettingsCredential {
    fn credential(&self) -> Result<Secret<String>, Error> {
        if let Some(token) = self
            .token
            .as_ref()
            .filter(|token| !token.expose_secret().is_empty())
        {
            return Ok(token.clone());
        }
        match env::var(&self.env_var) {
            Ok(token) if !token.trim().is_empty() => Ok(Secret::new(token.trim().to_string())),
            _ => Err(Error::Missing {
                context: format!(
                    "no token in the configuration, and {} is not set",
                    self.env_var
                ),
            }),
        }
    }
}
