//! Read access to the host's persisted client-tracking values.

use std::borrow::Cow;
use std::collections::HashMap;

/// Key of the persisted analytics client identifier
pub const CLIENT_ID_KEY: &str = "_ga";

/// Cookie-like storage owned by the host environment.
///
/// Lookups must never fail: a missing value is `None`.
pub trait ClientTrackingStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Store with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTracking;

impl ClientTrackingStore for NoTracking {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

impl ClientTrackingStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Cookies parsed from a `document.cookie`-style header.
///
/// Values are percent-decoded and stripped of surrounding double quotes.
/// When a name repeats, the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: HashMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `name=value; name2=value2`. Malformed pairs are skipped.
    pub fn parse(header: &str) -> Self {
        let mut cookies = HashMap::new();

        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            cookies
                .entry(name.to_string())
                .or_insert_with(|| decode_value(value.trim()));
        }

        Self { cookies }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl ClientTrackingStore for CookieJar {
    fn get(&self, key: &str) -> Option<String> {
        self.cookies.get(key).cloned()
    }
}

fn decode_value(raw: &str) -> String {
    let unquoted = raw
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(raw);

    // Undecodable values are kept verbatim
    urlencoding::decode(unquoted)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| unquoted.to_string())
}
