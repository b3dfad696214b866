use clap::Parser;
use std::fmt;

use common::err_context::{ErrorContext, ErrorContextExt};
use common::settings::Settings;
use newsletter_admin::application::commands;
use newsletter_admin::application::opts::{Error as OptsError, Opts};
use newsletter_admin::application::Error as ApplicationError;
use newsletter_admin::telemetry;

#[derive(Debug)]
pub enum Error {
    Options {
        context: String,
        source: OptsError,
    },
    Application {
        context: String,
        source: ApplicationError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Application { context, source } => {
                write!(fmt, "{context} | {source}")
            }
            Error::Options { context, source } => {
                write!(fmt, "Options Error: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<String, ApplicationError>> for Error {
    fn from(err: ErrorContext<String, ApplicationError>) -> Self {
        Error::Application {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<String, OptsError>> for Error {
    fn from(err: ErrorContext<String, OptsError>) -> Self {
        Error::Options {
            context: err.0,
            source: err.1,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let opts = Opts::parse();

    let cmd = opts.cmd.clone();

    let settings: Settings = opts
        .try_into()
        .context("Compiling Application Settings".to_string())?;

    // Logs go to stderr, stdout is for the command's output.
    let subscriber = telemetry::get_subscriber(
        "newsletter-admin".to_string(),
        settings.tracing.level.clone(),
        std::io::stderr,
    );
    telemetry::init_subscriber(subscriber);

    commands::run(cmd, settings)
        .await
        .context("newsletter-admin".to_string())?;

    Ok(())
}
