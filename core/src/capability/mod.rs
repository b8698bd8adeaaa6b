// skein/src/capability/mod.rs

//! Capability traits: the narrow interfaces through which actions reach the
//! outside world.
//!
//! A capability context is any `Clone + Send + Sync + 'static` value
//! implementing the traits its actions require. Composite contexts hold one
//! implementation per concern and forward ("has-a" aggregation); because
//! requirements are trait bounds, an action typed against capability set
//! `{A}` runs unchanged against any context also providing `{A, B, ...}`.

pub mod execute;
pub mod transact;

pub use execute::Execute;
pub use transact::{Transact, TxPhase};
