// skein/src/capability/transact.rs

//! The transactional capability: acquiring a scoped session, terminating it
//! with commit or rollback, and releasing the underlying resource.

use crate::error::SkeinError;
use async_trait::async_trait;
use std::sync::Arc;

/// The lifecycle operation a [`crate::error::SkeinError::Lifecycle`] failure
/// occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxPhase {
  Acquire,
  Commit,
  Rollback,
  Release,
}

impl std::fmt::Display for TxPhase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      TxPhase::Acquire => "acquire",
      TxPhase::Commit => "commit",
      TxPhase::Rollback => "rollback",
      TxPhase::Release => "release",
    };
    f.write_str(name)
  }
}

/// A capability that can open transactional sessions.
///
/// The associated `Session` is both the transaction handle and the derived
/// capability context handed to the wrapped inner action: it implements the
/// request-issuing capabilities the inner action needs, so every call the
/// inner action makes routes through the open transaction.
///
/// Lifecycle contract (enforced by [`crate::transaction::transact`], never by
/// implementations): a session is terminated by exactly one of `commit` or
/// `rollback`, followed in all cases by exactly one `release`. A session must
/// not be referenced once release has begun.
#[async_trait]
pub trait Transact<Err = SkeinError>: Send + Sync
where
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  /// The scoped context the inner action runs against while the session is
  /// open.
  type Session: Clone + Send + Sync + 'static;

  async fn acquire(&self) -> Result<Self::Session, Err>;

  async fn commit(&self, session: &Self::Session) -> Result<(), Err>;

  async fn rollback(&self, session: &Self::Session) -> Result<(), Err>;

  async fn release(&self, session: Self::Session) -> Result<(), Err>;
}

#[async_trait]
impl<C, Err> Transact<Err> for Arc<C>
where
  C: Transact<Err> + ?Sized,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  type Session = C::Session;

  async fn acquire(&self) -> Result<Self::Session, Err> {
    (**self).acquire().await
  }

  async fn commit(&self, session: &Self::Session) -> Result<(), Err> {
    (**self).commit(session).await
  }

  async fn rollback(&self, session: &Self::Session) -> Result<(), Err> {
    (**self).rollback(session).await
  }

  async fn release(&self, session: Self::Session) -> Result<(), Err> {
    (**self).release(session).await
  }
}
