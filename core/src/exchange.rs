// skein/src/exchange.rs

//! Query/command descriptors: a request-building action paired with a
//! response-interpreting action, fused around a context's [`Execute`]
//! capability.

use crate::action::Action;
use crate::capability::execute::Execute;
use crate::error::SkeinError;

/// Pairs request construction with response interpretation.
///
/// `to_request` derives an opaque backend request from the in-flight input;
/// `from_response` derives the action's output from the backend's raw
/// response. The response mapper receives the *original input* alongside the
/// raw response so it can echo or cross-check identity fields (hence
/// `In: Clone` when fusing).
///
/// The engine never inspects `Req` or `Resp`: only these two user-supplied
/// actions do.
pub struct Exchange<In, Req, Resp, Out, Ctx, Err = SkeinError>
where
  In: Send + 'static,
  Req: Send + 'static,
  Resp: Send + 'static,
  Out: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  to_request: Action<In, Req, Ctx, Err>,
  from_response: Action<(In, Resp), Out, Ctx, Err>,
}

impl<In, Req, Resp, Out, Ctx, Err> Exchange<In, Req, Resp, Out, Ctx, Err>
where
  In: Send + 'static,
  Req: Send + 'static,
  Resp: Send + 'static,
  Out: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  pub fn new(
    to_request: Action<In, Req, Ctx, Err>,
    from_response: Action<(In, Resp), Out, Ctx, Err>,
  ) -> Self {
    Self {
      to_request,
      from_response,
    }
  }

  /// Fuses the descriptor into a single action: build the request, issue it
  /// through the context's [`Execute`] capability, interpret the response.
  /// A failure at any of the three stages short-circuits the rest.
  pub fn into_action(self) -> Action<In, Out, Ctx, Err>
  where
    In: Clone,
    Ctx: Execute<Req, Err, Response = Resp>,
  {
    let to_request = self.to_request;
    let from_response = self.from_response;
    Action::from_fn(move |input: In, ctx: Ctx| {
      let to_request = to_request.clone();
      let from_response = from_response.clone();
      async move {
        let request = to_request.run(input.clone(), ctx.clone()).await?;
        let raw = ctx.execute(request).await?;
        from_response.run((input, raw), ctx).await
      }
    })
  }
}

impl<In, Req, Resp, Out, Ctx, Err> Clone for Exchange<In, Req, Resp, Out, Ctx, Err>
where
  In: Send + 'static,
  Req: Send + 'static,
  Resp: Send + 'static,
  Out: Send + 'static,
  Ctx: Clone + Send + Sync + 'static,
  Err: std::error::Error + From<SkeinError> + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    Self {
      to_request: self.to_request.clone(),
      from_response: self.from_response.clone(),
    }
  }
}
