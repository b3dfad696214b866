use clap::Parser;
use std::net::{SocketAddr, TcpListener};
use std::{fmt, io};
use tracing_subscriber::EnvFilter;

use common::err_context::{ErrorContext, ErrorContextExt};

mod server;

#[derive(Debug, Parser)]
#[clap(
    name = "newsletter-fakebackend",
    about = "Serves a fixed subscriber directory and pretends to deliver newsletters"
)]
struct Opts {
    /// Address to listen on
    #[arg(short = 'a', long = "address", default_value = "127.0.0.1:8000")]
    address: SocketAddr,

    /// Bearer token the admin requests must carry
    #[arg(short = 't', long = "token", env = "NEWSLETTER_ADMIN_TOKEN")]
    token: String,

    /// A subscriber address (repeatable)
    #[arg(short = 's', long = "subscriber")]
    subscribers: Vec<String>,
}

#[derive(Debug)]
enum Error {
    Bind { context: String, source: io::Error },
    Server { context: String, source: hyper::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bind { context, source } => write!(fmt, "Bind: {context} | {source}"),
            Error::Server { context, source } => write!(fmt, "Server: {context} | {source}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorContext<String, io::Error>> for Error {
    fn from(err: ErrorContext<String, io::Error>) -> Self {
        Error::Bind {
            context: err.0,
            source: err.1,
        }
    }
}

impl From<ErrorContext<String, hyper::Error>> for Error {
    fn from(err: ErrorContext<String, hyper::Error>) -> Self {
        Error::Server {
            context: err.0,
            source: err.1,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();

    let listener = TcpListener::bind(opts.address)
        .context(format!("Could not bind to {}", opts.address))?;

    tracing::info!(
        address = %opts.address,
        subscribers = opts.subscribers.len(),
        "fake backend listening"
    );

    let state = server::AppState::new(opts.subscribers, opts.token);

    axum::Server::from_tcp(listener)
        .context("Could not create server from listener".to_string())?
        .serve(server::router(state).into_make_service())
        .await
        .context("Server stopped".to_string())?;

    Ok(())
}
