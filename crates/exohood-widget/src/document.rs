//! Host document abstraction.
//!
//! The widget never touches a real page directly. A [`HostDocument`] resolves
//! a selector to a [`MountTarget`] and exposes the page's cookies;
//! [`MemoryDocument`] is the in-process implementation used by tests and the
//! preview binary.

use exohood_config::CookieJar;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A host element the widget renders into.
pub trait MountTarget {
    /// Replace the element's content with `markup`
    fn commit(&mut self, markup: String);
}

/// The page hosting the widget.
pub trait HostDocument {
    type Target: MountTarget;

    /// Resolve the first element matching `selector`
    fn query_selector(&self, selector: &str) -> Option<Self::Target>;

    /// Cookies visible to the page
    fn cookies(&self) -> CookieJar {
        CookieJar::new()
    }
}

#[derive(Debug, Default)]
struct Elements {
    /// Selector → last committed markup
    content: BTreeMap<String, String>,
    commits: usize,
}

/// In-memory document: a set of selectable elements plus a cookie header.
///
/// Clones share the same elements, so a test can keep a handle and inspect
/// what a mounted widget committed.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Arc<Mutex<Elements>>,
    cookies: CookieJar,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty element reachable through `selector`
    pub fn with_element(self, selector: impl Into<String>) -> Self {
        self.elements
            .lock()
            .content
            .entry(selector.into())
            .or_default();
        self
    }

    /// Set the page cookies from a `name=value; name2=value2` header
    pub fn with_cookies(mut self, header: &str) -> Self {
        self.cookies = CookieJar::parse(header);
        self
    }

    /// Markup last committed to `selector`
    pub fn markup(&self, selector: &str) -> Option<String> {
        self.elements.lock().content.get(selector).cloned()
    }

    /// Total number of commits across all elements
    pub fn commit_count(&self) -> usize {
        self.elements.lock().commits
    }
}

impl HostDocument for MemoryDocument {
    type Target = MemoryTarget;

    fn query_selector(&self, selector: &str) -> Option<MemoryTarget> {
        if !self.elements.lock().content.contains_key(selector) {
            return None;
        }
        Some(MemoryTarget {
            selector: selector.to_string(),
            elements: self.elements.clone(),
        })
    }

    fn cookies(&self) -> CookieJar {
        self.cookies.clone()
    }
}

/// Element handle returned by [`MemoryDocument::query_selector`].
#[derive(Debug, Clone)]
pub struct MemoryTarget {
    selector: String,
    elements: Arc<Mutex<Elements>>,
}

impl MemoryTarget {
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl MountTarget for MemoryTarget {
    fn commit(&mut self, markup: String) {
        let mut elements = self.elements.lock();
        elements.content.insert(self.selector.clone(), markup);
        elements.commits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exohood_config::{ClientTrackingStore, CLIENT_ID_KEY};

    #[test]
    fn unknown_selector_resolves_to_none() {
        let document = MemoryDocument::new().with_element("#widget");

        assert!(document.query_selector("#other").is_none());
        assert!(document.query_selector("#widget").is_some());
    }

    #[test]
    fn commits_are_visible_through_the_document() {
        let document = MemoryDocument::new().with_element("#widget");
        let mut target = document.query_selector("#widget").unwrap();

        assert_eq!(document.markup("#widget").as_deref(), Some(""));
        target.commit("<div></div>".to_string());

        assert_eq!(target.selector(), "#widget");
        assert_eq!(document.markup("#widget").as_deref(), Some("<div></div>"));
        assert_eq!(document.commit_count(), 1);
    }

    #[test]
    fn cookies_default_to_empty() {
        let document = MemoryDocument::new();
        assert!(document.cookies().is_empty());

        let document = document.with_cookies("_ga=GA1.2.3; theme=dark");
        assert_eq!(document.cookies().get(CLIENT_ID_KEY).as_deref(), Some("GA1.2.3"));
    }
}
