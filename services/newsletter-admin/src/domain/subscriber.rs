use serde::{Deserialize, Serialize};

/// One mailing-list recipient, identified by its email address.
///
/// Equality is case-sensitive: `Bob@acme.com` and `bob@acme.com` are two subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subscriber(String);

impl AsRef<str> for Subscriber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Subscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Subscriber {
    fn from(value: String) -> Self {
        Subscriber(value)
    }
}

impl From<&str> for Subscriber {
    fn from(value: &str) -> Self {
        Subscriber(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Subscriber;
    use speculoos::prelude::*;

    #[test]
    fn equality_should_be_case_sensitive() {
        assert_that(&Subscriber::from("Bob@acme.com")).is_not_equal_to(Subscriber::from("bob@acme.com"));
    }

    #[test]
    fn subscribers_should_deserialize_from_a_json_array_of_strings() {
        let subscribers: Vec<Subscriber> =
            serde_json::from_str(r#"["a@x.com", "b@x.com"]"#).expect("subscribers");
        assert_that(&subscribers).is_equal_to(vec![Subscriber::from("a@x.com"), Subscriber::from("b@x.com")]);
    }
}
