// skein/src/core/mod.rs

pub mod either;
pub mod shared;

// Re-export key types for easier access from other skein modules (and lib.rs).
pub use either::Either;
pub use shared::Shared;
