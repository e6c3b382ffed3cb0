//! Raw cookie string parsing.

use std::collections::BTreeMap;

/// Cookie name to value mapping for one fetch.
///
/// Names are unique; on duplicates the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar(BTreeMap<String, String>);

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes the jar as a `Cookie` header value (`k1=v1; k2=v2`).
    ///
    /// Returns `None` for an empty jar so no header is sent.
    pub fn to_header_value(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        Some(
            self.iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Parses a raw cookie string of the form `"k1=v1; k2=v2"`.
///
/// Never fails: segments without `=` are dropped, and an absent or empty input
/// yields an empty jar. The value is everything after the first `=`, so values
/// may themselves contain `=`.
pub fn parse_cookies(raw: Option<&str>) -> CookieJar {
    let mut jar = CookieJar::new();
    let Some(raw) = raw else {
        return jar;
    };

    for segment in raw.split(';') {
        let segment = segment.trim();
        if let Some((name, value)) = segment.split_once('=') {
            jar.insert(name.trim(), value.trim());
        }
    }
    jar
}
