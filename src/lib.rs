//! Wrap fallible async operations into a uniform success-or-error record.
//!
//! Instead of letting errors and panics propagate as a second control-flow
//! channel, every operation settles into an [`Either`] holding exactly one of
//! a success value or a normalized [`anyhow::Error`]:
//!
//! - [`might_fail`] awaits one pending operation and never re-raises.
//! - [`might`] / [`fail`] build an `Either` synchronously, with the same
//!   normalization on the failure side.
//! - [`all`], [`race`], [`any`], [`all_settled`] wrap the concurrency
//!   combinators while preserving each one's settlement semantics, and
//!   [`Dispatch`] covers combinator selection by name, including names the
//!   primitive does not expose.
//!
//! Arbitrary failure shapes (error values, text, labeled structures, opaque
//! panic payloads) are classified by [`Reason`] and normalized into one
//! canonical error type.

pub mod combinators;
pub mod either;
pub mod reason;
mod wrap;

pub use combinators::{
    CombinatorError, Dispatch, Outcome, Settled, all, all_settled, any, race,
};
pub use either::{Either, fail, might};
pub use reason::Reason;
pub use wrap::{might_fail, might_fail_infallible};
