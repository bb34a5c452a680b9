//! Per-request cache of session items.
//!
//! Every item fetched from the session backend is kept as an [`Owned`] foreign string, so a value
//! returned once stays valid until the request writes or removes that key, and the backend is not
//! asked again for it. Writes go through to the backend and the cache is refilled from what the
//! backend actually stored.

use std::collections::HashMap;

use micro_session::{Owned, Release, SessionHandle};
use tracing::trace;

/// What a cached "item not found" means for the next read of the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsentItemPolicy {
    /// Ask the backend again, so items written by other requests show up promptly.
    #[default]
    Requery,
    /// Trust the cached absence until this request writes the key.
    Remember,
}

/// Cache entries: missing key = never queried, `None` = known absent, `Some` = owned value.
pub(crate) struct ItemCache<T: Release> {
    entries: HashMap<String, Option<Owned<T>>>,
    policy: AbsentItemPolicy,
}

impl<T: Release + AsRef<str>> ItemCache<T> {
    pub(crate) fn new(policy: AbsentItemPolicy) -> Self {
        Self { entries: HashMap::new(), policy }
    }

    pub(crate) fn policy(&self) -> AbsentItemPolicy {
        self.policy
    }

    /// Only meaningful before the first item is cached.
    pub(crate) fn set_policy(&mut self, policy: AbsentItemPolicy) {
        self.policy = policy;
    }

    pub(crate) fn get<H>(&mut self, session: &H, key: &str) -> Option<&str>
    where
        H: SessionHandle<Text = T>,
    {
        let needs_query = match self.entries.get(key) {
            Some(Some(_)) => false,
            Some(None) => self.policy == AbsentItemPolicy::Requery,
            None => true,
        };

        if needs_query {
            let value = session.get_item(key).map(Owned::new);
            trace!(key, found = value.is_some(), "session item cache miss");
            // A re-queried entry held no value, so nothing is released by this insert.
            self.entries.insert(key.to_owned(), value);
        } else {
            trace!(key, "session item cache hit");
        }

        self.entries.get(key).and_then(Option::as_ref).map(Owned::as_str)
    }

    pub(crate) fn set<H>(&mut self, session: &H, key: &str, value: &str)
    where
        H: SessionHandle<Text = T>,
    {
        self.release(key);
        session.set_item(key, value);

        let stored = session.get_item(key).map(Owned::new);
        trace!(key, stored = stored.is_some(), "session item written through");
        self.entries.insert(key.to_owned(), stored);
    }

    pub(crate) fn remove<H>(&mut self, session: &H, key: &str)
    where
        H: SessionHandle<Text = T>,
    {
        self.release(key);
        // Reaches the backend even when nothing is cached for `key`, unlike a cache-gated
        // remove, so an item this request never read is still removed.
        session.remove_item(key);

        trace!(key, "session item removed");
        self.entries.insert(key.to_owned(), None);
    }

    /// Releases the cached value of `key`, if any, leaving a "known absent" entry behind.
    fn release(&mut self, key: &str) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.take();
        }
    }
}
