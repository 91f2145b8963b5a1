//! Basic example: a sale-transfer handler decorated with the three
//! reference behaviors.
//!
//! Run with `cargo run --example basic`. The chain logs entry and exit,
//! scopes the work in a (recorded) transaction, and reports elapsed time.

use action_chain::{
    standard_rules, Action, Declaration, SystemClock, TracingSink, TransactionLog, WrapperRegistry,
};
use std::sync::Arc;

#[derive(Debug)]
struct TransferTo {
    sale: u64,
    location: u64,
}

fn main() {
    tracing_subscriber::fmt().init();

    let transactions = Arc::new(TransactionLog::new());

    // Configuration time: declare which behaviors decorate TransferTo,
    // outermost first.
    let registry = WrapperRegistry::new();
    registry
        .register_named::<TransferTo>(
            "TransferTo",
            Declaration::standard(),
            standard_rules(
                Arc::new(TracingSink::new()),
                Arc::clone(&transactions) as Arc<dyn action_chain::TransactionProvider>,
                Arc::new(SystemClock::new()),
            ),
        )
        .expect("TransferTo registered once");

    // The unit of work itself knows nothing about the chain.
    let handler = registry
        .compose(Action::from_fn(|transfer: &TransferTo| {
            tracing::info!(
                sale = transfer.sale,
                location = transfer.location,
                "moving sale to new location"
            );
            Ok(())
        }))
        .expect("declaration resolves");

    handler
        .invoke(&TransferTo {
            sale: 42,
            location: 7,
        })
        .expect("transfer succeeds");

    println!("\nTransaction events: {:?}", transactions.events());
}
