// src/lib.rs

//! Skein: an asynchronous, composable effect engine for Rust.
//!
//! Skein lets you describe a multi-step backend workflow (queries, commands,
//! publishes) as a single composable [`Action`] value, executed against a
//! pluggable capability context, with:
//!  - Sequential composition with automatic short-circuiting on failure.
//!  - Branching on explicit [`Either`] values, not control-flow exceptions.
//!  - Parallel combination (`both`/`split`) and synchronous `join`.
//!  - Request/response descriptors ([`Exchange`]) that keep backend payloads
//!    opaque to the engine.
//!  - Transaction wrappers ([`transact`]/[`session`]) with exactly-once
//!    release on every exit path, panics included.
//!  - Capability traits per concern, so one action retargets across backends.
//!
//! Core workflow:
//! 1. Define a context type holding your capability implementations and
//!    implement [`Execute`] (and [`Transact`] where needed) for it.
//! 2. Build actions from leaves (`Action::map`, `Action::try_map`,
//!    `Action::from_fn`, [`Exchange::into_action`]).
//! 3. Compose with `and_then` / `branch` / `both` / `split` / `join`; wrap
//!    transactional sub-chains with [`transact`].
//! 4. Hand a context to a [`Runner`] and drive the top-level action.

pub mod action;
pub mod capability;
pub mod core;
pub mod error;
pub mod exchange;
pub mod runner;
pub mod transaction;

// --- Re-exports for the Public API ---

pub use crate::action::{Action, ActionFuture};
pub use crate::capability::{Execute, Transact, TxPhase};
pub use crate::core::either::Either;
pub use crate::core::shared::Shared;
pub use crate::error::{SkeinError, SkeinResult};
pub use crate::exchange::Exchange;
pub use crate::runner::Runner;
pub use crate::transaction::{session, transact};
