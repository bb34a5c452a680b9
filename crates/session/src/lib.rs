//! The session subsystem contract consumed by `micro-request`.
//!
//! Sessions live outside the request: a server-wide [`SessionContext`] creates and looks them
//! up, and every handle or string it hands out is a foreign resource that the receiver must give
//! back exactly once. This crate defines that contract and the [`Owned`] guard that turns the
//! "give back exactly once" rule into an ownership rule.
//!
//! # Architecture
//!
//! - [`context`]: the [`SessionContext`] and [`SessionHandle`] traits a session backend implements
//! - [`release`]: the [`Release`] trait and the [`Owned`] guard releasing on drop
//!
//! # Example
//!
//! ```
//! use micro_session::{Owned, Release};
//!
//! struct Ticket(u32);
//!
//! impl Release for Ticket {
//!     fn release(self) {
//!         println!("ticket {} returned", self.0);
//!     }
//! }
//!
//! let ticket = Owned::new(Ticket(7));
//! assert_eq!(ticket.0, 7);
//! // `ticket` is released here, once.
//! ```

pub mod context;
pub mod release;

pub use context::SessionContext;
pub use context::SessionHandle;
pub use release::Owned;
pub use release::Release;
