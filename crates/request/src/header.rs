//! Case-insensitive header storage and the cursor protocol over it.
//!
//! Header names are case-insensitive, so the store lower-cases every name on the way in and on
//! every lookup. Iteration is exposed through [`HeaderCursor`], an owned position marker that a
//! caller can hold without borrowing the request, e.g. across a component boundary.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::ensure;
use crate::error::CursorError;

/// Header name to value mapping with lower-cased names. The last write for a name wins.
#[derive(Debug, Default, Clone)]
pub struct HeaderStore {
    entries: HashMap<String, String>,
    generation: u64,
}

impl HeaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under the lower-cased `name`, replacing any previous value.
    ///
    /// Every call counts as a mutation and invalidates outstanding cursors.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.entries.insert(name.to_ascii_lowercase(), value.into());
        self.generation = self.generation.wrapping_add(1);
    }

    /// Returns the value stored under the lower-cased `name`.
    ///
    /// `None` means the header is absent, which is different from a header present with an
    /// empty value.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = normalize(name);
        self.entries.get(&*name).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of mutations seen so far, used to detect stale cursors.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Creates a cursor positioned before the first header name.
    pub fn cursor(&self) -> HeaderCursor {
        HeaderCursor { names: self.entries.keys().cloned().collect(), position: 0, generation: self.generation }
    }

    /// Returns the next header name of `cursor` and advances it.
    ///
    /// `Ok(None)` is the end-of-sequence marker and is returned for every call once the cursor is
    /// exhausted. A cursor created before the last mutation of this store is rejected.
    pub fn advance<'c>(&self, cursor: &'c mut HeaderCursor) -> Result<Option<&'c str>, CursorError> {
        ensure!(cursor.generation == self.generation, CursorError::invalidated(cursor.generation, self.generation));

        let position = cursor.position;
        if position >= cursor.names.len() {
            return Ok(None);
        }

        cursor.position += 1;
        let cursor: &'c HeaderCursor = cursor;
        Ok(cursor.names.get(position).map(String::as_str))
    }
}

/// Lower-cases `name` only when it has upper-case letters.
#[inline]
fn normalize(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) { Cow::Owned(name.to_ascii_lowercase()) } else { Cow::Borrowed(name) }
}

/// Owned iteration state over the header names of a [`HeaderStore`].
///
/// The cursor keeps its own copy of the names taken at creation, so one traversal always sees a
/// stable order and each name exactly once. It remembers the store generation it was created at
/// and refuses to advance once the store has been mutated.
#[derive(Debug, Clone)]
pub struct HeaderCursor {
    names: Vec<String>,
    position: usize,
    generation: u64,
}

impl HeaderCursor {
    /// Number of names not yet returned.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.names.len() - self.position
    }

    /// Generation of the header store this cursor was created at.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
