//! Session lifecycle of a single request.
//!
//! A request starts without a session. Once a [`SessionContext`] is attached it may load an
//! existing session by id or create a new one, at most once; both transitions are refused
//! quietly otherwise, so callers can "ensure a session" speculatively.

mod item_cache;

pub use item_cache::AbsentItemPolicy;

use micro_session::{Owned, SessionContext, SessionHandle};
use once_cell::unsync::OnceCell;
use tracing::debug;

use item_cache::ItemCache;

type SessionText<C> = <<C as SessionContext>::Session as SessionHandle>::Text;

/// Context, session and everything cached from them.
///
/// Field order is release order: cached item values first, then the session handle, then the
/// context the session came from, then the attached context. Each is an [`Owned`] resource and is
/// released exactly once.
pub(crate) struct SessionState<C: SessionContext> {
    items: ItemCache<SessionText<C>>,
    id: OnceCell<String>,
    session: Option<Owned<C::Session>>,
    // Set only when the context was replaced after the session was obtained from it.
    session_origin: Option<Owned<C>>,
    context: Option<Owned<C>>,
}

impl<C: SessionContext> SessionState<C> {
    pub(crate) fn new(context: Option<C>) -> Self {
        Self {
            items: ItemCache::new(AbsentItemPolicy::default()),
            id: OnceCell::new(),
            session: None,
            session_origin: None,
            context: context.map(Owned::new),
        }
    }

    /// Attaches `context` in place of the previously attached one.
    ///
    /// The previous context is released right away, unless the current session was obtained from
    /// it. That one is kept until the request is dropped and released after the session.
    pub(crate) fn set_context(&mut self, context: C) {
        let Some(previous) = self.context.replace(Owned::new(context)) else {
            return;
        };

        if self.session.is_some() && self.session_origin.is_none() {
            debug!("replace session context, keep the session's origin until drop");
            self.session_origin = Some(previous);
        } else {
            debug!("replace session context");
        }
    }

    pub(crate) fn has_context(&self) -> bool {
        self.context.is_some()
    }

    pub(crate) fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub(crate) fn absent_item_policy(&self) -> AbsentItemPolicy {
        self.items.policy()
    }

    pub(crate) fn set_absent_item_policy(&mut self, policy: AbsentItemPolicy) {
        self.items.set_policy(policy);
    }

    pub(crate) fn load(&mut self, id: &str) -> bool {
        self.acquire("load", |context| context.session_by_id(id))
    }

    pub(crate) fn create(&mut self) -> bool {
        self.acquire("create", C::create_session)
    }

    fn acquire<F>(&mut self, operation: &'static str, open: F) -> bool
    where
        F: FnOnce(&C) -> C::Session,
    {
        let Some(context) = self.context.as_deref() else {
            debug!(operation, "no session context attached, skip");
            return false;
        };

        if self.session.is_some() {
            debug!(operation, "session already present, skip");
            return false;
        }

        self.session = Some(Owned::new(open(context)));
        debug!(operation, "session attached to request");
        true
    }

    /// External id of the session, fetched on first use and kept for the request's lifetime.
    pub(crate) fn id(&self) -> Option<&str> {
        let session = self.session.as_deref()?;
        let id = self.id.get_or_init(|| Owned::new(session.id()).as_str().to_owned());
        Some(id.as_str())
    }

    pub(crate) fn item(&mut self, key: &str) -> Option<&str> {
        let session = self.session.as_deref()?;
        self.items.get(session, key)
    }

    pub(crate) fn set_item(&mut self, key: &str, value: &str) {
        if let Some(session) = self.session.as_deref() {
            self.items.set(session, key, value);
        }
    }

    pub(crate) fn remove_item(&mut self, key: &str) {
        if let Some(session) = self.session.as_deref() {
            self.items.remove(session, key);
        }
    }
}
