use std::{fs, io, path::PathBuf};

use common::config;
use common::settings;

use super::Error;
use crate::domain::{Format, MessageComposer};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

/// Prefix of the environment variables overriding settings, e.g. `NEWSLETTER_ADMIN__BACKEND__TIMEOUT`.
pub const ENV_PREFIX: &str = "NEWSLETTER_ADMIN";

#[derive(Debug, Clone, clap::Parser)]
#[clap(
    name = "newsletter-admin",
    about = "Compose a newsletter and send it to a selection of subscribers",
    version = VERSION,
    author = AUTHORS
    )]
pub struct Opts {
    /// Defines the config directory
    #[arg(value_parser = clap::value_parser!(PathBuf), short = 'c', long = "config-dir")]
    pub config_dir: PathBuf,

    /// Defines the run mode in {testing, dev, prod, ...}
    ///
    /// If no run mode is provided, a default behavior will be used.
    #[arg(short = 'm', long = "run-mode")]
    pub run_mode: Option<String>,

    /// Override settings values using key=value
    #[arg(short = 's', long = "setting")]
    pub settings: Vec<String>,

    #[clap(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
    /// Prints the configuration
    Config,
    /// Lists the subscribers
    Subscribers,
    /// Renders a message as the subscribers would see it
    Preview {
        #[command(flatten)]
        message: MessageArgs,
        /// Write a standalone HTML page to this file instead of printing the fragment
        #[arg(short = 'o', long = "output", value_parser = clap::value_parser!(PathBuf))]
        output: Option<PathBuf>,
    },
    /// Sends a message to the subscribers
    Send {
        #[command(flatten)]
        message: MessageArgs,
        /// Send only to these subscribers (repeatable)
        #[arg(long = "only")]
        only: Vec<String>,
        /// Do not send to these subscribers (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<String>,
        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// Starts an interactive session
    Shell,
}

#[derive(Debug, Clone, clap::Args)]
pub struct MessageArgs {
    /// Subject of the newsletter
    #[arg(long = "subject", default_value = "")]
    pub subject: String,

    /// Content of the newsletter
    #[arg(long = "body", conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the content of the newsletter from a file
    #[arg(long = "body-file", value_parser = clap::value_parser!(PathBuf))]
    pub body_file: Option<PathBuf>,

    /// Format of the content: html or plain
    #[arg(short = 'f', long = "format", default_value = "html")]
    pub format: Format,
}

impl MessageArgs {
    /// Fill a composer with the message given on the command line.
    pub fn compose(&self, composer: &mut MessageComposer) -> Result<(), io::Error> {
        let body = match (&self.body, &self.body_file) {
            (Some(body), _) => body.clone(),
            (None, Some(path)) => fs::read_to_string(path)?,
            (None, None) => String::new(),
        };
        composer.set_format(self.format);
        composer.set_subject(self.subject.clone());
        composer.set_body(body);
        Ok(())
    }
}

impl TryInto<settings::Settings> for Opts {
    type Error = Error;

    fn try_into(self) -> Result<settings::Settings, Self::Error> {
        config::merge_configuration(
            self.config_dir.as_ref(),
            &["service"],
            self.run_mode.as_deref(),
            ENV_PREFIX,
            self.settings.clone(),
        )
        .map_err(|err| Error::Merging {
            context: "Newsletter Admin Settings: Could not merge configuration".to_string(),
            source: err,
        })?
        .try_deserialize()
        .map_err(|err| Error::Deserializing {
            context: "Newsletter Admin Settings: Could not deserialize configuration".to_string(),
            source: err,
        })
    }
}
