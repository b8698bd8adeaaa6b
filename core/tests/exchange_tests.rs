// tests/exchange_tests.rs
mod common;

use common::*;
use skein::{Action, Exchange};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A lookup descriptor: the response mapper receives the original key
/// alongside the raw response and echoes it into the output.
fn lookup() -> Exchange<String, KvRequest, KvResponse, (String, String), KvContext, TestError> {
  Exchange::new(
    Action::map(KvRequest::Get),
    Action::try_map(|(key, response): (String, KvResponse)| match response {
      KvResponse::Found(value) => Ok((key, value)),
      KvResponse::Missing => Err(TestError::Step(format!("no record for '{}'", key))),
      other => Err(TestError::Step(format!("unexpected response {:?}", other))),
    }),
  )
}

#[tokio::test]
async fn test_exchange_builds_request_executes_and_maps_response() {
  setup_tracing();
  let ctx = KvContext::with_entry("alpha", "one");
  let action = lookup().into_action();

  let result = action.run("alpha".to_string(), ctx.clone()).await;

  // The original input was echoed through to the response mapper.
  assert_eq!(result, Ok(("alpha".to_string(), "one".to_string())));
  assert_eq!(ctx.log.calls(), vec!["execute"]);
}

#[tokio::test]
async fn test_exchange_mapper_can_reject_the_response() {
  setup_tracing();
  let ctx = KvContext::default();
  let action = lookup().into_action();

  let result = action.run("ghost".to_string(), ctx.clone()).await;

  assert_eq!(result, Err(TestError::Step("no record for 'ghost'".to_string())));
  assert_eq!(ctx.log.calls(), vec!["execute"]); // backend was consulted, mapper said no
}

#[tokio::test]
async fn test_backend_failure_skips_the_response_mapper() {
  setup_tracing();
  let mapper_invocations = Arc::new(AtomicUsize::new(0));
  let counter = mapper_invocations.clone();

  let descriptor = Exchange::<String, KvRequest, KvResponse, String, KvContext, TestError>::new(
    Action::map(KvRequest::Get),
    Action::map(move |(_key, _response)| {
      counter.fetch_add(1, Ordering::SeqCst);
      "mapped".to_string()
    }),
  );
  let ctx = KvContext {
    fail_execute: true,
    ..KvContext::default()
  };

  let result = descriptor.into_action().run("alpha".to_string(), ctx.clone()).await;

  assert_eq!(result, Err(TestError::Backend("execute refused".to_string())));
  assert_eq!(mapper_invocations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_request_builder_failure_never_reaches_the_backend() {
  setup_tracing();
  let descriptor = Exchange::<String, KvRequest, KvResponse, String, KvContext, TestError>::new(
    Action::try_map(|_key: String| Err(TestError::Step("cannot build request".to_string()))),
    Action::map(|(_key, _response)| "mapped".to_string()),
  );
  let ctx = KvContext::default();

  let result = descriptor.into_action().run("alpha".to_string(), ctx.clone()).await;

  assert_eq!(result, Err(TestError::Step("cannot build request".to_string())));
  assert!(ctx.log.calls().is_empty()); // execute was never issued
}

#[tokio::test]
async fn test_exchange_composes_into_larger_chains() {
  setup_tracing();
  let ctx = KvContext::with_entry("alpha", "one");

  let store = Exchange::<(String, String), KvRequest, KvResponse, String, KvContext, TestError>::new(
    Action::map(|(key, value): (String, String)| KvRequest::Put(key, value)),
    Action::try_map(|((key, _value), response): ((String, String), KvResponse)| match response {
      KvResponse::Done => Ok(key),
      other => Err(TestError::Step(format!("unexpected response {:?}", other))),
    }),
  );

  // Read "alpha", copy its value under "beta", then read it back.
  let copy_under_beta = lookup()
    .into_action()
    .and_then(Action::map(|(_key, value)| ("beta".to_string(), value)))
    .and_then(store.into_action())
    .and_then(lookup().into_action());

  let result = copy_under_beta.run("alpha".to_string(), ctx.clone()).await;

  assert_eq!(result, Ok(("beta".to_string(), "one".to_string())));
  assert_eq!(ctx.log.calls(), vec!["execute", "execute", "execute"]);
}
