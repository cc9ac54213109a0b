//! Keywords: self-describing identifiers with an optional namespace.

use std::fmt;
use std::sync::Arc;

use crate::equality::{Equiv, HashCode, hash_string};

/// A keyword such as `:name` or `:user/name`.
///
/// Two keywords are equal when both namespace and name are equal. The hash
/// code is the string hash of the printed form, so `:a` hashes like the
/// string `":a"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyword {
    namespace: Option<Arc<str>>,
    name: Arc<str>,
}

impl Keyword {
    /// Creates a keyword without a namespace.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_runtime::value::Keyword;
    ///
    /// let keyword = Keyword::new("name");
    /// assert_eq!(keyword.to_string(), ":name");
    /// ```
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            namespace: None,
            name: Arc::from(name),
        }
    }

    /// Creates a namespaced keyword.
    #[must_use]
    pub fn namespaced(namespace: &str, name: &str) -> Self {
        Self {
            namespace: Some(Arc::from(namespace)),
            name: Arc::from(name),
        }
    }

    /// Parses `ns/name` or `name`, with or without the leading colon.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix(':').unwrap_or(text);
        match text.split_once('/') {
            Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => {
                Self::namespaced(namespace, name)
            }
            _ => Self::new(text),
        }
    }

    /// Returns the name part.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace part.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(formatter, ":{namespace}/{}", self.name),
            None => write!(formatter, ":{}", self.name),
        }
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}

impl Equiv for Keyword {
    fn equiv(&self, other: &Self) -> bool {
        self == other
    }
}

impl HashCode for Keyword {
    fn hash_code(&self) -> i32 {
        hash_string(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(":a", None, "a")]
    #[case("user/id", Some("user"), "id")]
    #[case(":/", None, "/")]
    fn test_parse(#[case] text: &str, #[case] namespace: Option<&str>, #[case] name: &str) {
        let keyword = Keyword::parse(text);
        assert_eq!(keyword.namespace(), namespace);
        assert_eq!(keyword.name(), name);
    }

    #[rstest]
    fn test_hash_is_hash_of_printed_form() {
        assert_eq!(
            Keyword::namespaced("user", "id").hash_code(),
            hash_string(":user/id")
        );
    }
}
