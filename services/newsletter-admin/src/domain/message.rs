use std::{fmt, str::FromStr};

/// How the body of a message is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// The body is HTML markup.
    #[default]
    Structured,
    /// The body is literal text.
    Plain,
}

impl Format {
    pub fn is_html(&self) -> bool {
        matches!(self, Format::Structured)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Structured => write!(fmt, "html"),
            Format::Plain => write!(fmt, "plain"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "structured" => Ok(Format::Structured),
            "plain" | "text" => Ok(Format::Plain),
            _ => Err(format!("'{s}' is not a message format (expected html or plain)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub body: String,
    pub format: Format,
}

/// Holds the message being edited by the operator.
#[derive(Debug, Clone, Default)]
pub struct MessageComposer {
    message: Message,
}

impl MessageComposer {
    pub fn new(format: Format) -> Self {
        MessageComposer {
            message: Message {
                format,
                ..Message::default()
            },
        }
    }

    pub fn subject(&self) -> &str {
        &self.message.subject
    }

    pub fn body(&self) -> &str {
        &self.message.body
    }

    pub fn format(&self) -> Format {
        self.message.format
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.message.subject = subject.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.message.body = body.into();
    }

    /// Changing the format keeps the body as is.
    pub fn set_format(&mut self, format: Format) {
        self.message.format = format;
    }

    /// Both subject and body must hold something other than whitespace.
    pub fn is_valid(&self) -> bool {
        !self.message.subject.trim().is_empty() && !self.message.body.trim().is_empty()
    }

    /// Reset subject and body, keep the format.
    pub fn clear(&mut self) {
        self.message.subject.clear();
        self.message.body.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    fn composer(subject: &str, body: &str) -> MessageComposer {
        let mut composer = MessageComposer::default();
        composer.set_subject(subject);
        composer.set_body(body);
        composer
    }

    #[test]
    fn composer_should_start_empty_and_invalid() {
        let composer = MessageComposer::default();
        assert_that(&composer.is_valid()).is_false();
        assert_that(&composer.format()).is_equal_to(Format::Structured);
    }

    #[test]
    fn composer_should_require_subject_and_body() {
        let test_cases = vec![
            ("", "Hello", "missing subject"),
            ("Hi", "", "missing body"),
            ("   ", "Hello", "blank subject"),
            ("Hi", "\n\t", "blank body"),
        ];
        for (subject, body, message) in test_cases {
            assert_that(&composer(subject, body).is_valid())
                .named(message)
                .is_false();
        }
        assert_that(&composer("Hi", "Hello").is_valid()).is_true();
    }

    #[test]
    fn changing_format_should_keep_the_body() {
        let mut composer = composer("Hi", "<p>Hello</p>");
        composer.set_format(Format::Plain);
        assert_that(&composer.body()).is_equal_to("<p>Hello</p>");
        assert_that(&composer.format()).is_equal_to(Format::Plain);
    }

    #[test]
    fn clear_should_reset_subject_and_body_but_not_format() {
        let mut composer = composer("Hi", "Hello");
        composer.set_format(Format::Plain);
        composer.clear();
        assert_that(&composer.subject()).is_equal_to("");
        assert_that(&composer.body()).is_equal_to("");
        assert_that(&composer.format()).is_equal_to(Format::Plain);
    }

    #[test]
    fn format_should_parse_from_its_names() {
        assert_that(&"html".parse::<Format>()).is_ok_containing(Format::Structured);
        assert_that(&"Plain".parse::<Format>()).is_ok_containing(Format::Plain);
        assert_that(&"markdown".parse::<Format>()).is_err();
    }
}
