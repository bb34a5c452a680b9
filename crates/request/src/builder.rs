use std::fmt;

use bytes::Bytes;
use http::header::COOKIE;
use micro_session::SessionContext;

use crate::error::BuildError;
use crate::request::Request;
use crate::session::AbsentItemPolicy;

/// Assembles a [`Request`] on behalf of the component that parsed the HTTP message.
///
/// The builder owns the request under construction, including an attached context, so a builder
/// that is dropped half-way still releases everything it was given.
pub struct RequestBuilder<C: SessionContext> {
    request: Request<C>,
}

impl<C: SessionContext> RequestBuilder<C> {
    pub(crate) fn new() -> Self {
        Self { request: Request::new() }
    }

    /// Starts from an already parsed `http` request.
    ///
    /// Method, URI, headers and body are copied. Every `Cookie` header is split into its
    /// `name=value` pairs. A header value that is not UTF-8 is rejected.
    pub fn from_http(request: http::Request<Bytes>) -> Result<Self, BuildError> {
        let (parts, body) = request.into_parts();

        let mut builder = Self::new().method(parts.method.as_str()).uri(parts.uri.to_string()).body(body);

        for (name, value) in &parts.headers {
            let value = std::str::from_utf8(value.as_bytes()).map_err(|e| BuildError::invalid_header(name, e))?;

            if *name == COOKIE {
                for (cookie, cookie_value) in parse_cookies(value) {
                    builder.request.add_cookie(cookie, cookie_value);
                }
            }

            builder.request.add_header(name.as_str(), value);
        }

        Ok(builder)
    }

    /// Sets the peer address.
    pub fn remote_addr(mut self, remote_addr: impl Into<String>) -> Self {
        self.request.set_remote_addr(remote_addr);
        self
    }

    /// Sets the method text.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.request.set_method(method);
        self
    }

    /// Sets the request target.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.request.set_uri(uri);
        self
    }

    /// Adds a header; names are matched case-insensitively.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.request.add_header(name, value);
        self
    }

    /// Adds a parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.add_param(name, value);
        self
    }

    /// Adds a cookie.
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.add_cookie(name, value);
        self
    }

    /// Sets the body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request.set_body(body);
        self
    }

    /// Attaches the session context the request will own.
    pub fn context(mut self, context: C) -> Self {
        self.request.set_context(context);
        self
    }

    /// How cached "item not found" results are treated, see [`AbsentItemPolicy`].
    pub fn absent_items(mut self, policy: AbsentItemPolicy) -> Self {
        self.request.set_absent_item_policy(policy);
        self
    }

    /// Finishes the request.
    pub fn build(self) -> Request<C> {
        self.request
    }
}

impl<C: SessionContext> fmt::Debug for RequestBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder").field("request", &self.request).finish()
    }
}

/// Splits a `Cookie` header value into trimmed `(name, value)` pairs, skipping malformed pairs.
fn parse_cookies(header: &str) -> impl Iterator<Item = (&str, &str)> {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
}
