// skein/src/transaction.rs

//! Resource-scoped wrappers: `transact` adds acquire, execute,
//! commit-or-rollback, release semantics around an inner action, `session`
//! is its auto-commit sibling (acquire, execute, release).
//!
//! Both guarantee exactly one release per invocation on every exit path,
//! including abnormal termination of the inner action, which is caught at
//! this boundary and converted to [`SkeinError::Aborted`].

use crate::action::Action;
use crate::capability::transact::Transact;
use crate::error::SkeinError;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{event, instrument, Level};

/// Wraps `inner` with full transactional semantics. The wrapping action is
/// typed against a `Transact` context; the inner action is typed against
/// that context's `Session`, so every capability call the inner action makes
/// routes through the open transaction.
///
/// Outcome policy:
/// - acquire fails: that failure surfaces; nothing to release.
/// - inner succeeds: commit, then release unconditionally; the inner value
///   surfaces unless commit or release failed, in which case the *first*
///   encountered failure does (commit failure takes precedence).
/// - inner fails (or panics): rollback, then release, unconditionally; the
///   **original inner failure** surfaces. Secondary rollback/release
///   failures are logged at WARN and never shadow the root cause.
pub fn transact<In, Out, Ctx, Err>(
  inner: Action<In, Out, <Ctx as Transact<Err>>::Session, Err>,
) -> Action<In, Out, Ctx, Err>
where
  In: Send + 'static,
  Out: Send + 'static,
  Ctx: Transact<Err> + Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  Action::from_fn(move |input, ctx: Ctx| run_transactional(inner.clone(), input, ctx))
}

/// Wraps `inner` with session-scoped (auto-commit) semantics: acquire the
/// session, run the inner action against it, release. No commit or rollback
/// calls are issued.
///
/// Outcome policy: on inner success a release failure surfaces; on inner
/// failure the inner failure wins and a release failure is logged at WARN.
/// Release happens exactly once on every exit path, panics included.
pub fn session<In, Out, Ctx, Err>(
  inner: Action<In, Out, <Ctx as Transact<Err>>::Session, Err>,
) -> Action<In, Out, Ctx, Err>
where
  In: Send + 'static,
  Out: Send + 'static,
  Ctx: Transact<Err> + Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  Action::from_fn(move |input, ctx: Ctx| run_sessioned(inner.clone(), input, ctx))
}

#[instrument(
  name = "transaction",
  skip_all,
  fields(
    context_type = %std::any::type_name::<Ctx>(),
    error_type = %std::any::type_name::<Err>(),
  ),
  err(Display)
)]
async fn run_transactional<In, Out, Ctx, Err>(
  inner: Action<In, Out, <Ctx as Transact<Err>>::Session, Err>,
  input: In,
  ctx: Ctx,
) -> Result<Out, Err>
where
  In: Send + 'static,
  Out: Send + 'static,
  Ctx: Transact<Err> + Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  event!(Level::DEBUG, "Acquiring transactional session.");
  let session = match ctx.acquire().await {
    Ok(session) => session,
    Err(acquire_err) => {
      event!(Level::ERROR, error = %acquire_err, "Session acquisition failed; nothing to release.");
      return Err(acquire_err);
    }
  };

  match run_guarded(&inner, input, session.clone()).await {
    Ok(value) => {
      event!(Level::DEBUG, "Inner action succeeded; committing.");
      let commit_outcome = ctx.commit(&session).await;
      let release_outcome = ctx.release(session).await;
      match (commit_outcome, release_outcome) {
        (Ok(()), Ok(())) => Ok(value),
        (Err(commit_err), release_outcome) => {
          event!(Level::ERROR, error = %commit_err, "Commit failed.");
          if let Err(release_err) = release_outcome {
            event!(Level::WARN, error = %release_err, "Release also failed after failed commit.");
          }
          Err(commit_err)
        }
        (Ok(()), Err(release_err)) => {
          event!(Level::ERROR, error = %release_err, "Release failed after successful commit.");
          Err(release_err)
        }
      }
    }
    Err(inner_err) => {
      event!(Level::DEBUG, error = %inner_err, "Inner action failed; rolling back.");
      if let Err(rollback_err) = ctx.rollback(&session).await {
        event!(Level::WARN, error = %rollback_err, "Rollback failed; surfacing the original failure.");
      }
      if let Err(release_err) = ctx.release(session).await {
        event!(Level::WARN, error = %release_err, "Release failed; surfacing the original failure.");
      }
      Err(inner_err)
    }
  }
}

#[instrument(
  name = "session",
  skip_all,
  fields(
    context_type = %std::any::type_name::<Ctx>(),
    error_type = %std::any::type_name::<Err>(),
  ),
  err(Display)
)]
async fn run_sessioned<In, Out, Ctx, Err>(
  inner: Action<In, Out, <Ctx as Transact<Err>>::Session, Err>,
  input: In,
  ctx: Ctx,
) -> Result<Out, Err>
where
  In: Send + 'static,
  Out: Send + 'static,
  Ctx: Transact<Err> + Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  event!(Level::DEBUG, "Acquiring session.");
  let session = match ctx.acquire().await {
    Ok(session) => session,
    Err(acquire_err) => {
      event!(Level::ERROR, error = %acquire_err, "Session acquisition failed; nothing to release.");
      return Err(acquire_err);
    }
  };

  let outcome = run_guarded(&inner, input, session.clone()).await;
  let release_outcome = ctx.release(session).await;
  match (outcome, release_outcome) {
    (Ok(value), Ok(())) => Ok(value),
    (Ok(_), Err(release_err)) => {
      event!(Level::ERROR, error = %release_err, "Release failed after successful inner action.");
      Err(release_err)
    }
    (Err(inner_err), release_outcome) => {
      if let Err(release_err) = release_outcome {
        event!(Level::WARN, error = %release_err, "Release failed; surfacing the original failure.");
      }
      Err(inner_err)
    }
  }
}

/// Runs the inner action with a panic guard: abnormal termination must not
/// escape past the wrapper boundary, or the session would leak unreleased.
async fn run_guarded<In, Out, Sess, Err>(
  inner: &Action<In, Out, Sess, Err>,
  input: In,
  session: Sess,
) -> Result<Out, Err>
where
  In: Send + 'static,
  Out: Send + 'static,
  Sess: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  match AssertUnwindSafe(inner.run(input, session)).catch_unwind().await {
    Ok(outcome) => outcome,
    Err(panic_payload) => {
      let message = panic_message(&panic_payload);
      event!(Level::ERROR, %message, "Inner action aborted abnormally.");
      Err(Err::from(SkeinError::Aborted { message }))
    }
  }
}

fn panic_message(payload: &Box<dyn Any + Send>) -> String {
  if let Some(message) = payload.downcast_ref::<&'static str>() {
    (*message).to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "non-string panic payload".to_string()
  }
}
