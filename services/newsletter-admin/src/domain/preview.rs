//! Rendering of the message being composed, as the subscribers would see it.
//!
//! Structured bodies are trusted operator content and are inserted as is, unless the renderer
//! is built with sanitization enabled.

use crate::domain::{Format, Message};

const NO_SUBJECT: &str = "(No Subject)";
const NO_CONTENT: &str = "(No Content)";

/// A rendered, read-only view of a message. Both parts are HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFragment {
    pub subject: String,
    pub body: String,
}

impl DisplayFragment {
    /// The fragment: subject heading, a rule, then the body.
    pub fn to_html(&self) -> String {
        format!("<h1>{}</h1>\n<hr/>\n{}", self.subject, self.body)
    }

    /// A standalone page around the fragment, suitable to open in a browser.
    pub fn to_document(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            self.subject,
            self.to_html()
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewRenderer {
    sanitize: bool,
}

impl PreviewRenderer {
    pub fn new(sanitize: bool) -> Self {
        PreviewRenderer { sanitize }
    }

    pub fn render(&self, message: &Message) -> DisplayFragment {
        let subject = if message.subject.is_empty() {
            NO_SUBJECT.to_string()
        } else {
            escape(&message.subject)
        };

        let body = if message.body.is_empty() {
            format!("<div>{NO_CONTENT}</div>")
        } else {
            match message.format {
                Format::Structured if self.sanitize => {
                    format!("<div>{}</div>", ammonia::clean(&message.body))
                }
                Format::Structured => format!("<div>{}</div>", message.body),
                Format::Plain => format!(
                    "<div style=\"white-space: pre-wrap\">{}</div>",
                    escape(&message.body)
                ),
            }
        };

        DisplayFragment { subject, body }
    }
}

/// Escape the characters with a meaning in HTML text. Whitespace is kept as is.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
