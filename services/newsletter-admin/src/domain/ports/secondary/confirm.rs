/// Asks the operator to confirm an action. Returns `false` when the operator declines.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}
