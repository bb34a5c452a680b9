use std::str::Utf8Error;
use thiserror::Error;

/// Raised when a [`HeaderCursor`](crate::HeaderCursor) is advanced after the header store changed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    #[error("header cursor invalidated, created at generation {created_at} but headers are at {current}")]
    Invalidated { created_at: u64, current: u64 },
}

impl CursorError {
    /// A cursor from generation `created_at` used while the headers are at `current`.
    pub fn invalidated(created_at: u64, current: u64) -> Self {
        Self::Invalidated { created_at, current }
    }
}

/// Raised when a [`Request`](crate::Request) cannot be built from an `http` request.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("invalid header {name}: {source}")]
    InvalidHeader {
        name: String,
        #[source]
        source: Utf8Error,
    },
}

impl BuildError {
    /// The value of header `name` is not valid UTF-8.
    pub fn invalid_header<S: ToString>(name: S, source: Utf8Error) -> Self {
        Self::InvalidHeader { name: name.to_string(), source }
    }
}
