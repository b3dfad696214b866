//! Line-oriented interactive session over an `AdminSession`.

use std::io::{self, Write};
use std::str::FromStr;

use super::AdminSession;
use crate::domain::{Attempt, Format, SendStatus, Subscriber};

const HELP: &str = "\
Commands:
  list                show the subscribers and whether they are selected
  refresh             fetch the subscribers again
  all | none          select or deselect every subscriber
  toggle-all          select all, or deselect all if everything is selected
  toggle <address>    select or deselect one subscriber
  subject <text>      set the subject
  body <text>         set the content
  append <text>       add a line to the content
  format html|plain   set the content format
  preview             render the message
  status              show the state of the last send
  send                send the message to the selected subscribers
  help                show this help
  quit                leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List,
    Refresh,
    All,
    None,
    ToggleAll,
    Toggle(Subscriber),
    Subject(String),
    Body(String),
    Append(String),
    Format(Format),
    Preview,
    Status,
    Send,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match name {
            "" => ShellCommand::Empty,
            "list" | "ls" => ShellCommand::List,
            "refresh" => ShellCommand::Refresh,
            "all" => ShellCommand::All,
            "none" => ShellCommand::None,
            "toggle-all" => ShellCommand::ToggleAll,
            "toggle" if !rest.is_empty() => ShellCommand::Toggle(Subscriber::from(rest)),
            "toggle" => return Err("usage: toggle <address>".to_string()),
            "subject" => ShellCommand::Subject(rest.to_string()),
            "body" => ShellCommand::Body(rest.to_string()),
            "append" => ShellCommand::Append(rest.to_string()),
            "format" => ShellCommand::Format(rest.parse()?),
            "preview" => ShellCommand::Preview,
            "status" => ShellCommand::Status,
            "send" => ShellCommand::Send,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("unknown command '{other}', type 'help'")),
        };
        Ok(command)
    }
}

pub struct Shell<L, W> {
    session: AdminSession,
    lines: L,
    out: W,
}

impl<L, W> Shell<L, W>
where
    L: Iterator<Item = io::Result<String>>,
    W: Write,
{
    pub fn new(session: AdminSession, lines: L, out: W) -> Self {
        Shell {
            session,
            lines,
            out,
        }
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Read and execute commands until `quit` or the end of the input.
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "{HELP}")?;
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let line = match self.lines.next() {
                Some(line) => line?,
                None => break,
            };
            match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.execute(command).await?,
                Err(hint) => writeln!(self.out, "{hint}")?,
            }
        }
        Ok(())
    }

    async fn execute(&mut self, command: ShellCommand) -> io::Result<()> {
        match command {
            ShellCommand::Empty | ShellCommand::Quit => {}
            ShellCommand::Help => writeln!(self.out, "{HELP}")?,
            ShellCommand::List => self.list()?,
            ShellCommand::Refresh => match self.session.refresh().await {
                Ok(count) => writeln!(self.out, "{count} subscriber(s)")?,
                Err(err) => writeln!(self.out, "Could not load subscribers: {err}")?,
            },
            ShellCommand::All => self.session.selection_mut().select_all(),
            ShellCommand::None => self.session.selection_mut().deselect_all(),
            ShellCommand::ToggleAll => self.session.selection_mut().toggle_all(),
            ShellCommand::Toggle(address) => {
                if self.session.directory().contains(&address) {
                    self.session.selection_mut().toggle_one(&address);
                } else {
                    writeln!(self.out, "{address} is not a subscriber")?;
                }
            }
            ShellCommand::Subject(subject) => self.session.composer_mut().set_subject(subject),
            ShellCommand::Body(body) => self.session.composer_mut().set_body(body),
            ShellCommand::Append(line) => {
                let composer = self.session.composer_mut();
                let body = if composer.body().is_empty() {
                    line
                } else {
                    format!("{}\n{line}", composer.body())
                };
                composer.set_body(body);
            }
            ShellCommand::Format(format) => self.session.composer_mut().set_format(format),
            ShellCommand::Preview => writeln!(self.out, "{}", self.session.preview().to_html())?,
            ShellCommand::Status => self.status()?,
            ShellCommand::Send => self.send().await?,
        }
        Ok(())
    }

    fn list(&mut self) -> io::Result<()> {
        let selection = self.session.selection();
        let directory = self.session.directory();
        let marker = |selected: bool| if selected { "[x]" } else { "[ ]" };
        writeln!(
            self.out,
            "{} all ({}/{} selected)",
            marker(!directory.is_empty() && selection.is_all_selected()),
            selection.count(),
            directory.len()
        )?;
        for address in directory.addresses() {
            writeln!(
                self.out,
                "{} {address}",
                marker(selection.is_selected(address))
            )?;
        }
        Ok(())
    }

    fn status(&mut self) -> io::Result<()> {
        writeln!(self.out, "status: {}", self.session.status())?;
        match self.session.can_send() {
            Ok(()) => writeln!(
                self.out,
                "ready to send to {} subscriber(s)",
                self.session.selection().count()
            ),
            Err(refusal) => writeln!(self.out, "cannot send: {refusal}"),
        }
    }

    async fn send(&mut self) -> io::Result<()> {
        match self.session.send().await {
            Attempt::Refused(refusal) => writeln!(self.out, "Cannot send: {refusal}"),
            Attempt::Declined => writeln!(self.out, "Cancelled."),
            Attempt::Completed => match self.session.status() {
                SendStatus::Success(text) => writeln!(self.out, "{text}"),
                SendStatus::Error(text) => writeln!(self.out, "Error: {text}"),
                status => writeln!(self.out, "{status}"),
            },
        }
    }
}
