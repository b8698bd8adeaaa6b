// skein/examples/basic_compose.rs

use skein::{Action, Runner, SkeinError};
use tracing::info;

// 1. Define a capability context for the chain.
//    This chain is pure, so the context carries no capabilities; real
//    applications put their backend handles here.
#[derive(Clone, Debug, Default)]
struct AppContext;

#[tokio::main]
async fn main() -> Result<(), SkeinError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Composition Example ---");

  // 2. Build the chain: parse an amount, double it, describe it.
  //    try_map encodes the domain failure; map stays pure.
  let parse_amount = Action::<String, i64, AppContext, SkeinError>::try_map(|raw: String| {
    raw
      .trim()
      .parse::<i64>()
      .map_err(|e| SkeinError::domain(format!("'{}' is not an amount: {}", raw, e)))
  });

  let chain = parse_amount
    .and_then(Action::map(|n| n * 2))
    .and_then(Action::map(|n| format!("doubled amount: {}", n)));

  // 3. Hand a context to a runner and drive the chain.
  let runner = Runner::new(AppContext);

  let ok = runner.run(&chain, "21".to_string()).await?;
  info!("success: {}", ok);

  // A failing input short-circuits the rest of the chain.
  match runner.run(&chain, "abc".to_string()).await {
    Ok(unexpected) => info!("unexpected success: {}", unexpected),
    Err(e) => info!("failed as expected: {}", e),
  }

  Ok(())
}
