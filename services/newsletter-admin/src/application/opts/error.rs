use std::fmt;

use common::config;

#[derive(Debug)]
pub enum Error {
    Merging {
        context: String,
        source: config::Error,
    },
    Deserializing {
        context: String,
        source: ::config::ConfigError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Merging { context, source } => {
                write!(fmt, "Could not merge settings: {context} | {source}")
            }
            Error::Deserializing { context, source } => {
                write!(fmt, "Could not read settings: {context} | {source}")
            }
        }
    }
}

impl std::error::Error for Error {}
