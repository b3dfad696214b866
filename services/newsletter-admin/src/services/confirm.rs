use std::io::{self, BufRead, Write};
use tracing::warn;

use crate::domain::ports::secondary::Confirm;

/// Asks on the terminal. Anything but `y` or `yes` declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if let Err(err) = io::stdout().flush() {
            warn!(error = %err, "could not display confirmation prompt");
            return false;
        }
        let mut response = String::new();
        match io::stdin().lock().read_line(&mut response) {
            Ok(_) => is_yes(&response),
            Err(err) => {
                warn!(error = %err, "could not read confirmation");
                false
            }
        }
    }
}

/// Confirms everything. Used when the operator already said yes on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

fn is_yes(response: &str) -> bool {
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_should_confirm() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }
}
