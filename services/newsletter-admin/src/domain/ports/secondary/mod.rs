pub mod confirm;
pub mod credential_provider;
pub mod newsletter_dispatch;
pub mod subscriber_source;

pub use confirm::Confirm;
pub use credential_provider::{CredentialProvider, Error as CredentialError};
pub use newsletter_dispatch::{Error as DispatchError, NewsletterDispatch};
pub use subscriber_source::{Error as DirectoryError, SubscriberSource};

#[cfg(test)]
pub use confirm::MockConfirm;

#[cfg(test)]
pub use credential_provider::MockCredentialProvider;

#[cfg(test)]
pub use newsletter_dispatch::MockNewsletterDispatch;

#[cfg(test)]
pub use subscriber_source::MockSubscriberSource;
