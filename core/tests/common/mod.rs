// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use skein::{Execute, Shared, SkeinError, Transact};
use std::collections::HashMap;
use tracing::Level;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)] // Clone, PartialEq, Eq for assertions
pub enum TestError {
  #[error("skein framework error: {0}")] // Stored as String for Eq comparison
  Engine(String),

  #[error("test step failed: {0}")]
  Step(String),

  #[error("test backend refused: {0}")]
  Backend(String),
}

impl From<SkeinError> for TestError {
  fn from(se: SkeinError) -> Self {
    // Debug-format the framework error so variants stay assertable.
    TestError::Engine(format!("{:?}", se))
  }
}

// --- Call recording shared by the fakes ---

/// Order-preserving record of capability calls, shared across context clones.
#[derive(Clone, Default)]
pub struct CallLog(Shared<Vec<String>>);

impl CallLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record(&self, name: &str) {
    self.0.write().push(name.to_string());
  }

  pub fn calls(&self) -> Vec<String> {
    self.0.read().clone()
  }
}

// --- Context for pure composition tests (no capabilities required) ---
#[derive(Clone, Debug, Default)]
pub struct NullContext;

// --- Transactional fake: records every lifecycle call ---

#[derive(Clone, Default)]
pub struct FakeTxContext {
  pub log: CallLog,
  pub fail_acquire: bool,
  pub fail_commit: bool,
  pub fail_rollback: bool,
  pub fail_release: bool,
}

/// The scoped context handed to inner actions; shares the owning context's
/// call log so inner-action effects interleave with lifecycle calls.
#[derive(Clone)]
pub struct FakeSession {
  pub log: CallLog,
}

#[async_trait]
impl Transact<TestError> for FakeTxContext {
  type Session = FakeSession;

  async fn acquire(&self) -> Result<FakeSession, TestError> {
    self.log.record("acquire");
    if self.fail_acquire {
      return Err(TestError::Backend("acquire refused".to_string()));
    }
    Ok(FakeSession {
      log: self.log.clone(),
    })
  }

  async fn commit(&self, _session: &FakeSession) -> Result<(), TestError> {
    self.log.record("commit");
    if self.fail_commit {
      return Err(TestError::Backend("commit refused".to_string()));
    }
    Ok(())
  }

  async fn rollback(&self, _session: &FakeSession) -> Result<(), TestError> {
    self.log.record("rollback");
    if self.fail_rollback {
      return Err(TestError::Backend("rollback refused".to_string()));
    }
    Ok(())
  }

  async fn release(&self, _session: FakeSession) -> Result<(), TestError> {
    self.log.record("release");
    if self.fail_release {
      return Err(TestError::Backend("release refused".to_string()));
    }
    Ok(())
  }
}

// --- Request-issuing fake: an in-memory key/value backend ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvRequest {
  Get(String),
  Put(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvResponse {
  Found(String),
  Missing,
  Done,
}

#[derive(Clone, Default)]
pub struct KvContext {
  pub store: Shared<HashMap<String, String>>,
  pub log: CallLog,
  pub fail_execute: bool,
}

impl KvContext {
  pub fn with_entry(key: &str, value: &str) -> Self {
    let ctx = Self::default();
    ctx.store.write().insert(key.to_string(), value.to_string());
    ctx
  }
}

#[async_trait]
impl Execute<KvRequest, TestError> for KvContext {
  type Response = KvResponse;

  async fn execute(&self, request: KvRequest) -> Result<KvResponse, TestError> {
    self.log.record("execute");
    if self.fail_execute {
      return Err(TestError::Backend("execute refused".to_string()));
    }
    match request {
      KvRequest::Get(key) => Ok(
        self
          .store
          .read()
          .get(&key)
          .map(|value| KvResponse::Found(value.clone()))
          .unwrap_or(KvResponse::Missing),
      ),
      KvRequest::Put(key, value) => {
        self.store.write().insert(key, value);
        Ok(KvResponse::Done)
      }
    }
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
