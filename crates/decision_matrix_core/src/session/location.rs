//! Location collaborator: the current address and its fragment.

use crate::share::link::{base_url_of, fragment_of};

/// Read/clear access to the address the session was opened with.
pub trait Location {
    /// Fragment without its leading `#`; `None` when absent or empty.
    fn fragment(&self) -> Option<String>;
    /// Drops the fragment without reloading anything.
    fn clear_fragment(&mut self);
    /// Origin plus path, without query or fragment.
    fn base_url(&self) -> String;
}

/// Location backed by a plain URL string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlLocation {
    href: String,
}

impl UrlLocation {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    pub fn href(&self) -> &str {
        &self.href
    }
}

impl Location for UrlLocation {
    fn fragment(&self) -> Option<String> {
        fragment_of(&self.href)
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_string)
    }

    fn clear_fragment(&mut self) {
        if let Some(index) = self.href.find('#') {
            self.href.truncate(index);
        }
    }

    fn base_url(&self) -> String {
        base_url_of(&self.href).to_string()
    }
}
