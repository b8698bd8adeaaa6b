// skein/src/capability/execute.rs

//! The request-issuing capability: a context that can send an opaque,
//! backend-specific request and return the backend's raw response.

use crate::error::SkeinError;
use async_trait::async_trait;
use std::sync::Arc;

/// A capability for issuing requests to a backend. A relational command, a
/// message publish, an HTTP call: the engine does not care. `Req` and the
/// associated `Response` are opaque to the core; only the user-supplied
/// mapping actions of an [`crate::exchange::Exchange`] ever inspect them.
///
/// A context implements `Execute` once per request type it can carry, which
/// is how a single composite context serves heterogeneous backends. Within a
/// transaction, the [`crate::capability::transact::Transact::Session`] type
/// implements `Execute` so every request routes through the open session.
#[async_trait]
pub trait Execute<Req, Err = SkeinError>: Send + Sync
where
  Req: Send + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  /// The backend's raw response for this request type.
  type Response: Send + 'static;

  async fn execute(&self, request: Req) -> Result<Self::Response, Err>;
}

// Process-scoped contexts are commonly shared behind an Arc; forward the
// capability so the Arc itself is usable as a context.
#[async_trait]
impl<C, Req, Err> Execute<Req, Err> for Arc<C>
where
  C: Execute<Req, Err> + ?Sized,
  Req: Send + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  type Response = C::Response;

  async fn execute(&self, request: Req) -> Result<Self::Response, Err> {
    (**self).execute(request).await
  }
}
