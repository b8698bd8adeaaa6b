// skein/examples/transactional_transfer.rs

use async_trait::async_trait;
use skein::{transact, Action, Runner, Shared, SkeinError, Transact};
use std::collections::HashMap;
use tracing::info;

// --- An in-memory ledger with a staging transactional capability ---

#[derive(Clone, Default)]
struct Ledger {
  accounts: Shared<HashMap<String, i64>>,
}

impl Ledger {
  fn with_account(self, name: &str, balance: i64) -> Self {
    self.accounts.write().insert(name.to_string(), balance);
    self
  }

  fn balance(&self, name: &str) -> i64 {
    self.accounts.read().get(name).copied().unwrap_or(0)
  }
}

/// The scoped context inner actions run against: changes accumulate in a
/// staged snapshot and only reach the committed accounts on commit.
#[derive(Clone)]
struct LedgerSession {
  committed: Shared<HashMap<String, i64>>,
  staged: Shared<HashMap<String, i64>>,
}

impl LedgerSession {
  fn balance(&self, account: &str) -> Result<i64, SkeinError> {
    self
      .staged
      .read()
      .get(account)
      .copied()
      .ok_or_else(|| SkeinError::domain(format!("unknown account '{}'", account)))
  }

  fn adjust(&self, account: &str, delta: i64) {
    *self.staged.write().entry(account.to_string()).or_insert(0) += delta;
  }
}

#[async_trait]
impl Transact<SkeinError> for Ledger {
  type Session = LedgerSession;

  async fn acquire(&self) -> Result<LedgerSession, SkeinError> {
    let snapshot = self.accounts.read().clone();
    Ok(LedgerSession {
      committed: self.accounts.clone(),
      staged: Shared::new(snapshot),
    })
  }

  async fn commit(&self, session: &LedgerSession) -> Result<(), SkeinError> {
    *session.committed.write() = session.staged.read().clone();
    Ok(())
  }

  async fn rollback(&self, _session: &LedgerSession) -> Result<(), SkeinError> {
    // Staged changes simply never reach the committed accounts.
    Ok(())
  }

  async fn release(&self, _session: LedgerSession) -> Result<(), SkeinError> {
    Ok(())
  }
}

// --- The transfer workflow ---

#[derive(Clone, Debug)]
struct Transfer {
  from: String,
  to: String,
  amount: i64,
}

fn transfer_action() -> Action<Transfer, i64, Ledger, SkeinError> {
  let debit = Action::<Transfer, Transfer, LedgerSession, SkeinError>::from_fn(
    |transfer: Transfer, session: LedgerSession| async move {
      let balance = session.balance(&transfer.from)?;
      if balance < transfer.amount {
        return Err(SkeinError::domain(format!(
          "insufficient funds in '{}': {} < {}",
          transfer.from, balance, transfer.amount
        )));
      }
      session.adjust(&transfer.from, -transfer.amount);
      Ok(transfer)
    },
  );

  let credit = Action::<Transfer, i64, LedgerSession, SkeinError>::from_fn(
    |transfer: Transfer, session: LedgerSession| async move {
      session.adjust(&transfer.to, transfer.amount);
      session.balance(&transfer.to)
    },
  );

  // Both steps run inside one transaction: a failed debit rolls everything
  // back, and the staged credit never becomes visible.
  transact(debit.and_then(credit))
}

#[tokio::main]
async fn main() -> Result<(), SkeinError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Transactional Transfer Example ---");

  let ledger = Ledger::default()
    .with_account("alice", 100)
    .with_account("bob", 20);
  let runner = Runner::new(ledger.clone());
  let transfer = transfer_action();

  // A covered transfer commits.
  let new_balance = runner
    .run(
      &transfer,
      Transfer {
        from: "alice".to_string(),
        to: "bob".to_string(),
        amount: 30,
      },
    )
    .await?;
  info!("transfer committed, bob now holds {}", new_balance);

  // An uncovered transfer rolls back; balances stay untouched.
  let result = runner
    .run(
      &transfer,
      Transfer {
        from: "bob".to_string(),
        to: "alice".to_string(),
        amount: 1_000,
      },
    )
    .await;
  match result {
    Ok(_) => info!("unexpected success"),
    Err(e) => info!("transfer rejected: {}", e),
  }

  info!(
    "final balances: alice = {}, bob = {}",
    ledger.balance("alice"),
    ledger.balance("bob")
  );

  Ok(())
}
