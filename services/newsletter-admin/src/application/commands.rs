use common::err_context::ErrorContextExt;
use common::settings::Settings;
use std::fs;
use std::io::{self, Write};
use tracing::warn;

use super::opts::{Command, MessageArgs};
use super::shell::Shell;
use super::{AdminSession, AdminSessionBuilder, Error};
use crate::domain::{Attempt, MessageComposer, PreviewRenderer, SendStatus, Subscriber};
use crate::services::confirm::AssumeYes;

/// Execute one command of the command line.
pub async fn run(cmd: Command, settings: Settings) -> Result<(), Error> {
    match cmd {
        Command::Config => {
            let json = serde_json::to_string_pretty(&settings)
                .context("Could not serialize settings".to_string())?;
            println!("{json}");
            Ok(())
        }
        Command::Subscribers => {
            let mut session = AdminSessionBuilder::new(settings)?.build()?;
            list_subscribers(&mut session, &mut io::stdout()).await
        }
        Command::Preview { message, output } => {
            let renderer = PreviewRenderer::new(settings.preview.sanitize);
            let mut composer = MessageComposer::default();
            message
                .compose(&mut composer)
                .context("Could not read the message content".to_string())?;
            let fragment = renderer.render(composer.message());
            match output {
                Some(path) => fs::write(&path, fragment.to_document())
                    .context(format!("Could not write preview to {}", path.display()))?,
                None => println!("{}", fragment.to_html()),
            }
            Ok(())
        }
        Command::Send {
            message,
            only,
            exclude,
            yes,
        } => {
            let mut builder = AdminSessionBuilder::new(settings)?;
            if yes {
                builder = builder.confirm(AssumeYes);
            }
            let mut session = builder.build()?;
            send(&mut session, &message, &only, &exclude).await
        }
        Command::Shell => {
            let mut session = AdminSessionBuilder::new(settings)?.build()?;
            if let Err(err) = session.refresh().await {
                eprintln!("Could not load subscribers: {err}");
            }
            let mut shell = Shell::new(session, stdin_lines(), io::stdout());
            shell
                .run()
                .await
                .context("Interactive session failed".to_string())?;
            Ok(())
        }
    }
}

async fn list_subscribers<W: Write>(session: &mut AdminSession, out: &mut W) -> Result<(), Error> {
    session
        .refresh()
        .await
        .context("Could not fetch subscribers".to_string())?;
    let addresses = session.directory().addresses();
    for address in &addresses {
        writeln!(out, "{address}").context("Could not list subscribers".to_string())?;
    }
    writeln!(out, "{} subscriber(s)", addresses.len())
        .context("Could not list subscribers".to_string())?;
    Ok(())
}

/// Apply `--only` and `--exclude` on top of the default full selection.
fn edit_selection(session: &mut AdminSession, only: &[String], exclude: &[String]) {
    if !only.is_empty() {
        session.selection_mut().deselect_all();
    }
    for address in only {
        let address = Subscriber::from(address.as_str());
        if !session.directory().contains(&address) {
            warn!(%address, "not a subscriber, ignored");
        } else if !session.selection().is_selected(&address) {
            session.selection_mut().toggle_one(&address);
        }
    }
    for address in exclude {
        let address = Subscriber::from(address.as_str());
        if session.selection().is_selected(&address) {
            session.selection_mut().toggle_one(&address);
        }
    }
}

async fn send(
    session: &mut AdminSession,
    message: &MessageArgs,
    only: &[String],
    exclude: &[String],
) -> Result<(), Error> {
    session
        .refresh()
        .await
        .context("Could not fetch subscribers".to_string())?;
    edit_selection(session, only, exclude);
    message
        .compose(session.composer_mut())
        .context("Could not read the message content".to_string())?;
    session
        .can_send()
        .context("Check the subject, content and recipients".to_string())?;

    println!("{}", session.preview().to_html());

    match session.send().await {
        Attempt::Refused(refusal) => Err(Error::Refused {
            context: "Check the subject, content and recipients".to_string(),
            source: refusal,
        }),
        Attempt::Declined => {
            println!("Cancelled.");
            Ok(())
        }
        Attempt::Completed => match session.status() {
            SendStatus::Success(text) => {
                println!("{text}");
                Ok(())
            }
            SendStatus::Error(text) => Err(Error::Send {
                context: "The backend did not send the newsletter".to_string(),
                message: text.clone(),
            }),
            status => Err(Error::Send {
                context: "Unexpected status after sending".to_string(),
                message: status.to_string(),
            }),
        },
    }
}

/// Lines typed on the terminal. Each line is read through the shared stdin buffer, so that
/// confirmation prompts read in between see the following lines.
fn stdin_lines() -> impl Iterator<Item = io::Result<String>> {
    std::iter::from_fn(|| {
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(err) => Some(Err(err)),
        }
    })
}
