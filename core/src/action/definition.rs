// skein/src/action/definition.rs

//! Contains the `Action<In, Out, Ctx, Err>` value, its leaf constructors,
//! and the `run` contract. Combinators live in `action/combinators.rs`.

use crate::error::SkeinError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The future shape every action node resolves to.
pub type ActionFuture<Out, Err> = Pin<Box<dyn Future<Output = Result<Out, Err>> + Send>>;

/// Uniform run contract shared by every node of a composed action.
pub(crate) type RunFn<In, Out, Ctx, Err> = dyn Fn(In, Ctx) -> ActionFuture<Out, Err> + Send + Sync;

/// A composable, immutable description of a computation from an input `In`
/// and a capability context `Ctx` to an asynchronous `Result<Out, Err>`.
///
/// An `Action` is a value: building one performs no work, and cloning one is
/// an `Arc` bump. Execution happens only when [`Action::run`] is awaited,
/// typically via a [`crate::runner::Runner`]. Side effects are only ever
/// performed through capabilities reachable via `Ctx`; the composition core
/// itself never touches external state.
///
/// `Ctx` is any cheaply-cloneable value implementing the capability traits an
/// action's leaves require. Because requirements are expressed as trait
/// bounds, an action typed against one capability runs unchanged against any
/// context that also implements more.
///
/// `Err` must be `From<SkeinError>` so framework-originated failures (e.g. an
/// aborted inner action caught by a transaction wrapper) can surface through
/// user-defined error types.
pub struct Action<In, Out, Ctx, Err = SkeinError>
where
  In: Send + 'static,
  Out: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  pub(crate) run_fn: Arc<RunFn<In, Out, Ctx, Err>>,
}

impl<In, Out, Ctx, Err> Action<In, Out, Ctx, Err>
where
  In: Send + 'static,
  Out: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  /// The general leaf constructor: an asynchronous function of the input and
  /// the capability context. Capability-invoking actions are built from this.
  pub fn from_fn<F, Fut>(f: F) -> Self
  where
    F: Fn(In, Ctx) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Out, Err>> + Send + 'static,
  {
    Self {
      run_fn: Arc::new(move |input, ctx| Box::pin(f(input, ctx))),
    }
  }

  /// A synchronous pure transform. Never suspends and never fails on its
  /// own; a failing business rule belongs in [`Action::try_map`].
  pub fn map<F>(f: F) -> Self
  where
    F: Fn(In) -> Out + Send + Sync + 'static,
  {
    Self::from_fn(move |input, _ctx| std::future::ready(Ok(f(input))))
  }

  /// A synchronous transform that may decide the business condition was not
  /// met. This is how "not found" / "not authorized" style domain failures
  /// enter a chain without exceptions-as-control-flow.
  pub fn try_map<F>(f: F) -> Self
  where
    F: Fn(In) -> Result<Out, Err> + Send + Sync + 'static,
  {
    Self::from_fn(move |input, _ctx| std::future::ready(f(input)))
  }

  /// Executes this action against the given input and capability context.
  pub async fn run(&self, input: In, ctx: Ctx) -> Result<Out, Err> {
    (self.run_fn)(input, ctx).await
  }
}

impl<In, Ctx, Err> Action<In, In, Ctx, Err>
where
  In: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  /// The unit of sequential composition: passes its input through untouched.
  /// `identity().and_then(a)` and `a.and_then(identity())` behave exactly
  /// like `a`.
  pub fn identity() -> Self {
    Self::map(|input| input)
  }
}

// Manual Clone: the derive would demand Clone on every type parameter, but
// cloning an action is only an Arc bump.
impl<In, Out, Ctx, Err> Clone for Action<In, Out, Ctx, Err>
where
  In: Send + 'static,
  Out: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    Self {
      run_fn: Arc::clone(&self.run_fn),
    }
  }
}

impl<In, Out, Ctx, Err> std::fmt::Debug for Action<In, Out, Ctx, Err>
where
  In: Send + 'static,
  Out: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Action")
      .field("input_type", &std::any::type_name::<In>())
      .field("output_type", &std::any::type_name::<Out>())
      .field("context_type", &std::any::type_name::<Ctx>())
      .finish()
  }
}
