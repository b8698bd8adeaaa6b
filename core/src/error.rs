// skein/src/error.rs

use crate::capability::transact::TxPhase;
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// The engine's own error vocabulary.
///
/// The composition core treats every failure the same way (short-circuit);
/// these variants exist so capability implementations and mapping functions
/// can say *what kind* of failure occurred. User-defined error types plug in
/// anywhere an `Err` type parameter appears, provided they are
/// `From<SkeinError>` so framework-originated failures can flow through them.
#[derive(Debug, Error)]
pub enum SkeinError {
  /// A mapping function deliberately decided the business condition was not
  /// met (e.g. "no matching record", "not authorized").
  #[error("domain rule rejected the in-flight value: {message}")]
  Domain { message: String },

  /// A capability call itself failed: connectivity, protocol error, backend
  /// refusal.
  #[error("backend capability call failed. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },

  /// A transactional lifecycle operation (acquire/commit/rollback/release)
  /// failed.
  #[error("transaction {phase} failed. Source: {source}")]
  Lifecycle {
    phase: TxPhase,
    #[source]
    source: AnyhowError,
  },

  /// An action terminated abnormally (panicked) and was converted to a
  /// failure at a wrapper boundary.
  #[error("action aborted abnormally: {message}")]
  Aborted { message: String },

  #[error("internal skein error: {0}")]
  Internal(String),
}

impl SkeinError {
  /// Shorthand for a domain-level rejection.
  pub fn domain(message: impl Into<String>) -> Self {
    SkeinError::Domain {
      message: message.into(),
    }
  }

  /// Shorthand for a failed capability call.
  pub fn backend(source: impl Into<AnyhowError>) -> Self {
    SkeinError::Backend {
      source: source.into(),
    }
  }

  /// Shorthand for a failed transactional lifecycle operation.
  pub fn lifecycle(phase: TxPhase, source: impl Into<AnyhowError>) -> Self {
    SkeinError::Lifecycle {
      phase,
      source: source.into(),
    }
  }
}

// The conversion skein provides for external errors: an anyhow::Error
// arriving from a collaborator is, by definition, a backend failure.
impl From<AnyhowError> for SkeinError {
  fn from(err: AnyhowError) -> Self {
    SkeinError::Backend { source: err }
  }
}

pub type SkeinResult<T, E = SkeinError> = std::result::Result<T, E>;
