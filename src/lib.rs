//! Scoped state changes that undo themselves.
//!
//! Each helper here temporarily mutates one piece of state (an optional
//! field, a map entry, an environment variable, the process working
//! directory, membership in a `Vec`) and puts the prior state back when
//! the scope ends, whether the scope exits normally or by panic.
//!
//! Caller-owned state is scoped with closures; the slot (or the whole map)
//! is lent to the closure and restored when it returns:
//!
//! ```
//! let mut timeout: Option<u32> = Some(30);
//! setback::set(&mut timeout, 5, |timeout| {
//!     assert_eq!(*timeout, Some(5));
//!     *timeout = None;
//! });
//! assert_eq!(timeout, Some(30));
//!
//! let mut conf = std::collections::HashMap::from([("retries", 3)]);
//! setback::map::set(&mut conf, "retries", 0, |conf| {
//!     assert_eq!(conf["retries"], 0);
//! });
//! assert_eq!(conf["retries"], 3);
//! ```
//!
//! Process-global state (environment variables, the working directory) is
//! scoped with drop guards instead:
//!
//! ```
//! let guard = setback::env::set("SETBACK_DOC_EXAMPLE", "on");
//! assert_eq!(std::env::var("SETBACK_DOC_EXAMPLE").as_deref(), Ok("on"));
//! drop(guard);
//! assert!(std::env::var("SETBACK_DOC_EXAMPLE").is_err());
//! ```
//!
//! Distinct scopes nest freely, including over the same slot, and restore
//! in strict LIFO order. Individual scopes are single-shot: a scope is
//! entered once and exits once. Nothing here is thread-safe; callers
//! sharing a slot across threads must serialize the entire scoped
//! interval themselves.

pub mod dir;
mod dup;
pub mod env;
mod error;
pub mod map;
mod reentrant;
mod scope;
pub mod seq;
mod slot;

pub use dup::{CopyOptions, Duplicate};
pub use error::Error;
pub use reentrant::{OpenClose, Reentrant};
pub use scope::{rollback, rollback_with, set, unset};
pub use slot::{Slot, Snapshot};
