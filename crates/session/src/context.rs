//! The session backend seen from a request.
//!
//! A backend provides two kinds of handles: one [`SessionContext`] per request, standing for the
//! server-wide session registry, and one [`SessionHandle`] per session obtained from it. Both are
//! foreign resources ([`Release`]), and so is every string a handle returns.
//!
//! All calls are synchronous and infallible at this level. A backend that can fail (for example a
//! remote store that is unreachable) reports it through its own channel; callers of these traits
//! neither retry nor mask it.

use crate::Release;

/// Server-wide registry creating and looking up sessions.
pub trait SessionContext: Release {
    /// Handle type for one session of this backend.
    type Session: SessionHandle;

    /// Looks up the session with the external id `id`.
    ///
    /// The id is not validated: an unknown id may yield an empty or invalid handle, which is still
    /// a handle the caller owns and must release.
    fn session_by_id(&self, id: &str) -> Self::Session;

    /// Allocates a brand-new session.
    fn create_session(&self) -> Self::Session;
}

/// One user's server-side session state.
pub trait SessionHandle: Release {
    /// Strings returned by the backend. The caller owns each one and must release it.
    type Text: AsRef<str> + Release;

    /// External id of this session. Immutable for the lifetime of the handle.
    fn id(&self) -> Self::Text;

    /// Reads the value stored under `key`, `None` if there is none.
    fn get_item(&self, key: &str) -> Option<Self::Text>;

    /// Stores `value` under `key`. The backend may normalize the value before storing it.
    fn set_item(&self, key: &str, value: &str);

    /// Removes whatever is stored under `key`.
    fn remove_item(&self, key: &str);
}
