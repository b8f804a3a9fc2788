//! Connection properties assembled from a connect string.

use indexmap::IndexMap;
use url::form_urlencoded;

/// Property key under which the username is stored.
pub const USER_KEY: &str = "user";

/// Property key under which the password is stored.
pub const PASSWORD_KEY: &str = "password";

/// Ordered key/value properties handed to a driver.
///
/// Values are optional because a password is recorded even when the caller
/// supplied none. Inserting an existing key overwrites its value in place.
///
/// ```rust
/// use jdbc_url_core::ConnectionProperties;
///
/// let mut props = ConnectionProperties::from_query("useSSL=true&tz=UTC");
/// props.set_credentials("scott", None);
///
/// assert_eq!(props.get("useSSL"), Some("true"));
/// assert_eq!(props.get("user"), Some("scott"));
/// assert!(props.contains_key("password"));
/// assert_eq!(props.get("password"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConnectionProperties {
    entries: IndexMap<String, Option<String>>,
}

impl ConnectionProperties {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw `k1=v1&k2=v2` query string.
    ///
    /// Each `&`-separated token is split on its first `=`; both halves are
    /// percent-decoded as UTF-8 and `+` decodes to a space. A token without
    /// `=` maps to the empty string. Trailing `&` separators are ignored, but
    /// an empty token between two separators records the empty key `""`.
    pub fn from_query(query: &str) -> Self {
        let mut props = Self::new();
        props.extend_from_query(query);
        props
    }

    /// Decode a raw query string into this set, overwriting duplicates.
    pub fn extend_from_query(&mut self, query: &str) {
        let tokens = match query.trim_end_matches('&') {
            "" if !query.is_empty() => return,
            trimmed => trimmed.split('&'),
        };
        for token in tokens {
            // form_urlencoded drops empty tokens; they still count as `"" -> ""`.
            let (key, value) = form_urlencoded::parse(token.as_bytes())
                .next()
                .unwrap_or_default();
            self.insert(key, value);
        }
    }

    /// Insert a property, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), Some(value.into()));
    }

    /// Insert a property whose value may be absent.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.insert(key.into(), value);
    }

    /// Record `user` and `password`.
    ///
    /// The password entry is written even when `password` is `None`.
    pub fn set_credentials(&mut self, username: impl Into<String>, password: Option<&str>) {
        self.insert(USER_KEY, username);
        self.insert_raw(PASSWORD_KEY, password.map(str::to_string));
    }

    /// Get a property value. Absent values read as `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|v| v.as_deref())
    }

    /// Get a property, distinguishing a missing key from an absent value.
    pub fn get_raw(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|v| v.as_deref())
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a property.
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.entries.shift_remove(key)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConnectionProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (key, value) in iter {
            props.insert(key, value);
        }
        props
    }
}
