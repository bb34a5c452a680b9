use std::collections::HashMap;

/// Exact-case name to value mapping, last write wins.
///
/// Backs both route/query parameters and cookies. Unlike [`HeaderStore`](crate::HeaderStore),
/// names are compared as given.
#[derive(Debug, Default, Clone)]
pub struct ParamStore {
    entries: HashMap<String, String>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Returns the value stored under exactly `name`, `None` when absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
