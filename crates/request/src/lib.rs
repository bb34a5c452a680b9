//! Per-request state and session access for the micro server
//!
//! This crate models one incoming HTTP request after parsing: method, URI, remote address,
//! headers, parameters, cookies and body, plus a lazily obtained server-side session. Parsing,
//! routing and session storage happen elsewhere; the session backend is reached through the
//! [`micro_session`] contract.
//!
//! # Features
//!
//! - Case-insensitive header store with an owned, mutation-aware cursor
//! - Exact-case parameter and cookie stores
//! - Session load/create at most once per request
//! - Write-through session item cache with a memoized session id
//! - Every foreign handle and string released exactly once, in a fixed order
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::collections::HashMap;
//! use std::rc::Rc;
//!
//! use micro_request::Request;
//! use micro_session::{Release, SessionContext, SessionHandle};
//!
//! type Items = Rc<RefCell<HashMap<String, String>>>;
//!
//! struct Context(Items);
//! struct Session(Items);
//!
//! impl Release for Context {
//!     fn release(self) {}
//! }
//!
//! impl Release for Session {
//!     fn release(self) {}
//! }
//!
//! impl SessionContext for Context {
//!     type Session = Session;
//!
//!     fn session_by_id(&self, _id: &str) -> Session {
//!         Session(self.0.clone())
//!     }
//!
//!     fn create_session(&self) -> Session {
//!         Session(self.0.clone())
//!     }
//! }
//!
//! impl SessionHandle for Session {
//!     type Text = String;
//!
//!     fn id(&self) -> String {
//!         "sid-1".to_string()
//!     }
//!
//!     fn get_item(&self, key: &str) -> Option<String> {
//!         self.0.borrow().get(key).cloned()
//!     }
//!
//!     fn set_item(&self, key: &str, value: &str) {
//!         self.0.borrow_mut().insert(key.to_string(), value.trim().to_string());
//!     }
//!
//!     fn remove_item(&self, key: &str) {
//!         self.0.borrow_mut().remove(key);
//!     }
//! }
//!
//! let mut request = Request::builder()
//!     .method("GET")
//!     .uri("/cart")
//!     .header("X-Request-Id", "42")
//!     .context(Context(Items::default()))
//!     .build();
//!
//! assert_eq!(request.header("x-request-id"), Some("42"));
//!
//! assert!(request.create_session());
//! assert_eq!(request.session_id(), Some("sid-1"));
//!
//! request.set_session_item("cart", "  3 items ");
//! assert_eq!(request.session_item("cart"), Some("3 items"));
//! ```
//!
//! # Architecture
//!
//! - [`Request`]: the request itself and every operation a handler calls
//! - [`RequestBuilder`]: construction, including from an `http::Request<Bytes>`
//! - [`HeaderStore`] and [`HeaderCursor`]: header storage and iteration
//! - [`ParamStore`]: parameters and cookies
//! - [`AbsentItemPolicy`]: how cached "item not found" results are reused
//!
//! # Ownership
//!
//! The request owns its context, its session and every session item string it has cached. They
//! are held as [`micro_session::Owned`] values and released when the request is dropped: cached
//! items first, then the session, then the context.
//!
//! # Error Handling
//!
//! Missing headers, parameters, cookies and session items are `None`, not errors. Session
//! operations attempted without a context, or a second time, return `false`. The error types are:
//!
//! - [`CursorError`]: a cursor advanced after the headers changed
//! - [`BuildError`]: an `http` request whose headers cannot be represented as text

mod builder;
mod error;
mod header;
mod params;
mod request;
mod session;

mod utils;
pub(crate) use utils::ensure;

pub use builder::RequestBuilder;
pub use error::BuildError;
pub use error::CursorError;
pub use header::HeaderCursor;
pub use header::HeaderStore;
pub use params::ParamStore;
pub use request::Request;
pub use session::AbsentItemPolicy;
