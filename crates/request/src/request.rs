//! The per-request state handed to handlers.
//!
//! A [`Request`] is built by the component that parsed the HTTP message, lives for one response
//! cycle, and is used by exactly one task. It is deliberately not thread-safe and takes no locks;
//! the session backend behind it is the only shared piece and brings its own synchronization.

use std::fmt;

use bytes::Bytes;
use http::Method;
use micro_session::SessionContext;

use crate::builder::RequestBuilder;
use crate::error::{BuildError, CursorError};
use crate::header::{HeaderCursor, HeaderStore};
use crate::params::ParamStore;
use crate::session::{AbsentItemPolicy, SessionState};

/// One inbound HTTP request together with its (optional) server-side session.
///
/// Text fields are stored as copies and returned as borrows that live until the field is mutated
/// or the request is dropped. Dropping the request releases every cached session item, then the
/// session handle, then the context, each exactly once.
pub struct Request<C: SessionContext> {
    remote_addr: String,
    method: String,
    uri: String,
    body: Bytes,
    headers: HeaderStore,
    params: ParamStore,
    cookies: ParamStore,
    session: SessionState<C>,
}

impl<C: SessionContext> Request<C> {
    /// Creates an empty request with no session context attached.
    pub fn new() -> Self {
        Self::with_optional_context(None)
    }

    /// Creates an empty request that owns `context`.
    pub fn with_context(context: C) -> Self {
        Self::with_optional_context(Some(context))
    }

    fn with_optional_context(context: Option<C>) -> Self {
        Self {
            remote_addr: String::new(),
            method: String::new(),
            uri: String::new(),
            body: Bytes::new(),
            headers: HeaderStore::new(),
            params: ParamStore::new(),
            cookies: ParamStore::new(),
            session: SessionState::new(context),
        }
    }

    /// Starts a [`RequestBuilder`] for an empty request.
    pub fn builder() -> RequestBuilder<C> {
        RequestBuilder::new()
    }

    /// Copies method, URI, headers, cookies and body out of an already parsed request.
    pub fn from_http(request: http::Request<Bytes>) -> Result<Self, BuildError> {
        RequestBuilder::from_http(request).map(RequestBuilder::build)
    }

    /// Address of the peer that sent the request.
    pub fn remote_addr(&self) -> &str {
        &self.remote_addr
    }

    /// Sets the peer address.
    pub fn set_remote_addr(&mut self, remote_addr: impl Into<String>) {
        self.remote_addr = remote_addr.into();
    }

    /// The method exactly as received.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The method as an [`http::Method`], `None` if it is not a valid method token.
    pub fn parsed_method(&self) -> Option<Method> {
        Method::from_bytes(self.method.as_bytes()).ok()
    }

    /// Sets the method text, kept verbatim.
    pub fn set_method(&mut self, method: impl Into<String>) {
        self.method = method.into();
    }

    /// The request target as received, including any query string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Sets the request target.
    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }

    /// The raw body. Not assumed to be text; may contain NUL bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Length of the body in bytes.
    #[inline]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Replaces the body.
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    /// Adds a header, replacing any value stored under the same name in any letter case.
    pub fn add_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name, value);
    }

    /// Case-insensitive header lookup. `None` when the header is absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// All headers, keyed by lower-cased name.
    pub fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// Creates a cursor over the current (lower-cased) header names.
    pub fn create_cursor(&self) -> HeaderCursor {
        self.headers.cursor()
    }

    /// Advances `cursor`, returning the next header name or `None` at the end.
    ///
    /// Fails with [`CursorError::Invalidated`] if headers were added since the cursor was created.
    pub fn cursor_next<'c>(&self, cursor: &'c mut HeaderCursor) -> Result<Option<&'c str>, CursorError> {
        self.headers.advance(cursor)
    }

    /// Adds a parameter, replacing any value stored under exactly the same name.
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name, value);
    }

    /// Exact-case parameter lookup. `None` when the parameter is absent.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// All parameters.
    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// Adds a cookie, replacing any value stored under exactly the same name.
    pub fn add_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name, value);
    }

    /// Exact-case cookie lookup. `None` when the cookie is absent.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name)
    }

    /// All cookies.
    pub fn cookies(&self) -> &ParamStore {
        &self.cookies
    }

    /// Attaches the session context this request obtains its session from.
    ///
    /// A context attached earlier is released. If the current session came from it, that context
    /// is kept until the request is dropped and released after the session.
    pub fn set_context(&mut self, context: C) {
        self.session.set_context(context);
    }

    /// Whether a session context is attached.
    pub fn has_context(&self) -> bool {
        self.session.has_context()
    }

    /// Whether a session was loaded or created.
    pub fn has_session(&self) -> bool {
        self.session.has_session()
    }

    /// How cached "item not found" results are treated.
    pub fn absent_item_policy(&self) -> AbsentItemPolicy {
        self.session.absent_item_policy()
    }

    /// Loads the session with the external id `id` from the context.
    ///
    /// Returns `false` and does nothing when no context is attached or the request already has a
    /// session. The id is not validated here; whatever handle the context returns is kept.
    pub fn load_session(&mut self, id: &str) -> bool {
        self.session.load(id)
    }

    /// Asks the context for a brand-new session.
    ///
    /// Returns `false` and does nothing when no context is attached or the request already has a
    /// session.
    pub fn create_session(&mut self) -> bool {
        self.session.create()
    }

    /// External id of the session, `None` without a session. Fetched once per request.
    pub fn session_id(&self) -> Option<&str> {
        self.session.id()
    }

    /// Reads a session item through the request's cache.
    ///
    /// `None` without a session or when the item does not exist.
    pub fn session_item(&mut self, key: &str) -> Option<&str> {
        self.session.item(key)
    }

    /// Writes a session item through to the backend, then caches what the backend stored.
    ///
    /// Does nothing without a session.
    pub fn set_session_item(&mut self, key: &str, value: &str) {
        self.session.set_item(key, value);
    }

    /// Removes a session item from the backend and marks it absent in the cache.
    ///
    /// Does nothing without a session.
    pub fn remove_session_item(&mut self, key: &str) {
        self.session.remove_item(key);
    }

    pub(crate) fn set_absent_item_policy(&mut self, policy: AbsentItemPolicy) {
        self.session.set_absent_item_policy(policy);
    }
}

impl<C: SessionContext> Default for Request<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SessionContext> fmt::Debug for Request<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("remote_addr", &self.remote_addr)
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("body_len", &self.body.len())
            .field("headers", &self.headers)
            .field("params", &self.params)
            .field("has_context", &self.session.has_context())
            .field("has_session", &self.session.has_session())
            .finish_non_exhaustive()
    }
}
