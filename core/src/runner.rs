// skein/src/runner.rs

//! The `Runner<Ctx>`: owns a capability context and drives top-level actions
//! to a final `Result`.

use crate::action::Action;
use crate::error::SkeinError;
use tracing::{event, instrument, Level};

/// Entry point for executing composed actions.
///
/// A runner owns one capability context, typically built once at startup
/// from process-scoped resources, and hands a clone of it to every action
/// it drives. The runner always yields a `Result`; failures produced
/// anywhere in the chain surface here, there is no other exit pathway.
pub struct Runner<Ctx>
where
  Ctx: Clone + Send + Sync + 'static,
{
  ctx: Ctx,
}

impl<Ctx> Runner<Ctx>
where
  Ctx: Clone + Send + Sync + 'static,
{
  pub fn new(ctx: Ctx) -> Self {
    Self { ctx }
  }

  /// The context this runner supplies to actions.
  pub fn context(&self) -> &Ctx {
    &self.ctx
  }

  /// Feeds `input` and a clone of the owned context into `action` and drives
  /// it to completion.
  #[instrument(
    name = "Runner::run",
    skip_all,
    fields(
      input_type = %std::any::type_name::<In>(),
      output_type = %std::any::type_name::<Out>(),
      context_type = %std::any::type_name::<Ctx>(),
      error_type = %std::any::type_name::<Err>(),
    ),
    err(Display)
  )]
  pub async fn run<In, Out, Err>(&self, action: &Action<In, Out, Ctx, Err>, input: In) -> Result<Out, Err>
  where
    In: Send + 'static,
    Out: Send + 'static,
    Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
  {
    event!(Level::DEBUG, "Driving action to completion.");
    let outcome = action.run(input, self.ctx.clone()).await;
    match &outcome {
      Ok(_) => event!(Level::DEBUG, "Action completed successfully."),
      Err(e) => event!(Level::DEBUG, error = %e, "Action failed."),
    }
    outcome
  }
}
