// skein/examples/branching.rs

use skein::{Action, Either, Runner, SkeinError};
use tracing::info;

#[derive(Clone, Debug, Default)]
struct AppContext;

#[derive(Clone, Debug)]
struct Order {
  customer: String,
  total_cents: i64,
}

#[tokio::main]
async fn main() -> Result<(), SkeinError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Branching Example ---");

  // The selector is itself an action: large orders route left for manual
  // review, the rest route right for automatic approval.
  let selector = Action::<Order, Either<Order, Order>, AppContext, SkeinError>::map(|order| {
    if order.total_cents >= 100_000 {
      Either::Left(order)
    } else {
      Either::Right(order)
    }
  });

  let review = Action::<Order, String, AppContext, SkeinError>::map(|order| {
    format!("order from {} queued for review", order.customer)
  });
  let approve = Action::<Order, String, AppContext, SkeinError>::map(|order| {
    format!("order from {} approved automatically", order.customer)
  });

  let routing = selector.branch(review, approve);
  let runner = Runner::new(AppContext);

  let big = Order {
    customer: "acme".to_string(),
    total_cents: 250_000,
  };
  let small = Order {
    customer: "initech".to_string(),
    total_cents: 1_999,
  };

  info!("{}", runner.run(&routing, big).await?);
  info!("{}", runner.run(&routing, small).await?);

  Ok(())
}
