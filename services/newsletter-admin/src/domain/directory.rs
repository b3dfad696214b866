use std::collections::HashSet;
use tracing::info;

use crate::domain::ports::secondary::{DirectoryError, SubscriberSource};
use crate::domain::Subscriber;

/// The most recently fetched list of subscribers.
///
/// The list is kept as the backend gave it, duplicates included. `addresses` gives the
/// de-duplicated view used for display and selection.
#[derive(Debug, Clone, Default)]
pub struct SubscriberDirectory {
    subscribers: Vec<Subscriber>,
    populated: bool,
}

impl SubscriberDirectory {
    /// Fetch the subscribers and replace the directory wholesale.
    ///
    /// On failure, the directory keeps its previous content.
    #[tracing::instrument(name = "Fetching subscriber directory", skip(self, source))]
    pub async fn fetch(
        &mut self,
        source: &(dyn SubscriberSource + Send + Sync),
    ) -> Result<&[Subscriber], DirectoryError> {
        let subscribers = source.fetch_subscribers().await?;
        info!(count = subscribers.len(), "subscriber directory fetched");
        self.replace(subscribers);
        Ok(&self.subscribers)
    }

    pub fn replace(&mut self, subscribers: Vec<Subscriber>) {
        self.subscribers = subscribers;
        self.populated = true;
    }

    /// The subscribers as fetched, duplicates included.
    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    /// The distinct subscribers, in order of first appearance.
    pub fn addresses(&self) -> Vec<&Subscriber> {
        let mut seen = HashSet::new();
        self.subscribers
            .iter()
            .filter(|subscriber| seen.insert(*subscriber))
            .collect()
    }

    pub fn contains(&self, subscriber: &Subscriber) -> bool {
        self.subscribers.contains(subscriber)
    }

    /// Number of distinct subscribers.
    pub fn len(&self) -> usize {
        self.addresses().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Whether at least one fetch succeeded.
    pub fn is_populated(&self) -> bool {
        self.populated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::secondary::MockSubscriberSource;
    use speculoos::prelude::*;

    fn subscribers(addresses: &[&str]) -> Vec<Subscriber> {
        addresses.iter().map(|a| Subscriber::from(*a)).collect()
    }

    #[tokio::test]
    async fn fetch_should_replace_the_directory() {
        let mut source = MockSubscriberSource::new();
        source
            .expect_fetch_subscribers()
            .times(1)
            .return_once(|| Ok(subscribers(&["a@x.com", "b@x.com"])));

        let mut directory = SubscriberDirectory::default();
        directory.replace(subscribers(&["old@x.com"]));
        directory.fetch(&source).await.expect("fetch");

        assert_that(&directory.subscribers()).is_equal_to(&subscribers(&["a@x.com", "b@x.com"])[..]);
        assert_that(&directory.is_populated()).is_true();
    }

    #[tokio::test]
    async fn failed_fetch_should_leave_the_directory_unchanged() {
        let mut source = MockSubscriberSource::new();
        source.expect_fetch_subscribers().times(1).return_once(|| {
            Err(DirectoryError::Auth {
                context: "rejected".to_string(),
                status: 401,
            })
        });

        let mut directory = SubscriberDirectory::default();
        directory.replace(subscribers(&["a@x.com"]));
        let outcome = directory.fetch(&source).await;

        assert_that(&outcome.is_err()).is_true();
        assert_that(&directory.subscribers()).is_equal_to(&subscribers(&["a@x.com"])[..]);
    }

    #[tokio::test]
    async fn failed_first_fetch_should_leave_the_directory_unpopulated() {
        let mut source = MockSubscriberSource::new();
        source.expect_fetch_subscribers().return_once(|| {
            Err(DirectoryError::Server {
                context: "boom".to_string(),
                status: 500,
                body: "Internal Server Error".to_string(),
            })
        });

        let mut directory = SubscriberDirectory::default();
        let _ = directory.fetch(&source).await;
        assert_that(&directory.is_populated()).is_false();
    }

    #[test]
    fn duplicates_should_be_collapsed_for_display() {
        let mut directory = SubscriberDirectory::default();
        directory.replace(subscribers(&["a@x.com", "b@x.com", "a@x.com"]));

        let addresses: Vec<&str> = directory.addresses().into_iter().map(|s| s.as_ref()).collect();
        assert_that(&addresses).is_equal_to(vec!["a@x.com", "b@x.com"]);
        assert_that(&directory.len()).is_equal_to(2);
        assert_that(&directory.subscribers().len()).is_equal_to(3);
    }
}
