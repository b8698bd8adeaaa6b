// skein/src/action/combinators.rs

//! Composition of actions: sequencing, branching, parallel combination,
//! and join. Every combinator builds a new action node by wrapping the
//! operands' run functions; nothing here suspends on its own: suspension
//! points belong to capability-invoking leaves.

use crate::action::definition::Action;
use crate::core::either::Either;
use crate::error::SkeinError;
use futures::future;
use std::sync::Arc;

impl<In, Out, Ctx, Err> Action<In, Out, Ctx, Err>
where
  In: Send + 'static,
  Out: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  /// Sequential composition. `next` runs only if `self` succeeded; on
  /// failure, `next` is skipped entirely and the failure is forwarded
  /// unchanged (short-circuit).
  ///
  /// Associative: `(a.and_then(b)).and_then(c)` and
  /// `a.and_then(b.and_then(c))` are indistinguishable for every input.
  pub fn and_then<Out2>(self, next: Action<Out, Out2, Ctx, Err>) -> Action<In, Out2, Ctx, Err>
  where
    Out2: Send + 'static,
  {
    let first = self.run_fn;
    let second = next.run_fn;
    Action {
      run_fn: Arc::new(move |input, ctx: Ctx| {
        let first = Arc::clone(&first);
        let second = Arc::clone(&second);
        Box::pin(async move {
          let mid = first(input, ctx.clone()).await?;
          second(mid, ctx).await
        })
      }),
    }
  }

  /// Runs `self` and `other` against a clone of the same input, logically in
  /// parallel: both futures are issued before either completes, and the pair
  /// resolves exactly when both have completed: never early, never dropping
  /// the later-arriving result.
  ///
  /// Both must succeed for the pair to succeed. If either fails the result
  /// is that failure; when both fail, the left (first-initiated) failure is
  /// surfaced, deterministically.
  pub fn both<OutB>(self, other: Action<In, OutB, Ctx, Err>) -> Action<In, (Out, OutB), Ctx, Err>
  where
    In: Clone,
    OutB: Send + 'static,
  {
    let left = self.run_fn;
    let right = other.run_fn;
    Action {
      run_fn: Arc::new(move |input: In, ctx: Ctx| {
        let left = Arc::clone(&left);
        let right = Arc::clone(&right);
        Box::pin(async move {
          // join, not try_join: the combinator must not resume before the
          // slower branch settles.
          let (left_outcome, right_outcome) =
            future::join(left(input.clone(), ctx.clone()), right(input, ctx)).await;
          match (left_outcome, right_outcome) {
            (Ok(a), Ok(b)) => Ok((a, b)),
            (Err(left_err), _) => Err(left_err),
            (Ok(_), Err(right_err)) => Err(right_err),
          }
        })
      }),
    }
  }

  /// Sequences `other` after `self` while preserving `self`'s output
  /// alongside `other`'s: `both` where the first branch is `identity`.
  ///
  /// `identity().split(f).join(|orig, out| (orig, out))` yields
  /// `(input, f(input))` wherever `f` succeeds.
  pub fn split<OutB>(self, other: Action<Out, OutB, Ctx, Err>) -> Action<In, (Out, OutB), Ctx, Err>
  where
    Out: Clone,
    OutB: Send + 'static,
  {
    self.and_then(Action::identity().both(other))
  }
}

impl<In, L, R, Ctx, Err> Action<In, Either<L, R>, Ctx, Err>
where
  In: Send + 'static,
  L: Send + 'static,
  R: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  /// Routes on the selector's output: `self` produces an `Either`, and
  /// exactly one of `on_left`/`on_right` runs with the carried value. If the
  /// selector fails, branching is skipped and the failure propagates.
  pub fn branch<Out>(
    self,
    on_left: Action<L, Out, Ctx, Err>,
    on_right: Action<R, Out, Ctx, Err>,
  ) -> Action<In, Out, Ctx, Err>
  where
    Out: Send + 'static,
  {
    let selector = self.run_fn;
    let left = on_left.run_fn;
    let right = on_right.run_fn;
    Action {
      run_fn: Arc::new(move |input, ctx: Ctx| {
        let selector = Arc::clone(&selector);
        let left = Arc::clone(&left);
        let right = Arc::clone(&right);
        Box::pin(async move {
          match selector(input, ctx.clone()).await? {
            Either::Left(l) => left(l, ctx).await,
            Either::Right(r) => right(r, ctx).await,
          }
        })
      }),
    }
  }
}

impl<In, A, B, Ctx, Err> Action<In, (A, B), Ctx, Err>
where
  In: Send + 'static,
  A: Send + 'static,
  B: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  /// Synchronous combinator applied once a `both`/`split` pair has resolved.
  pub fn join<Out, F>(self, f: F) -> Action<In, Out, Ctx, Err>
  where
    Out: Send + 'static,
    F: Fn(A, B) -> Out + Send + Sync + 'static,
  {
    self.and_then(Action::map(move |(a, b)| f(a, b)))
  }
}
