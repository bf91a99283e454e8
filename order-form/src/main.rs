//! Order form driver.
//!
//! Loads the catalog, then reads one JSON action per line from stdin and
//! prints the order after each one:
//!
//! ```text
//! {"type":"updateTicketSelection","bandId":"skalar","ticketType":"vip","newQuantity":2,"costDelta":9998}
//! {"type":"updateField","field":"expiry","value":"1225"}
//! {"type":"submit"}
//! ```

use box_office_core::environment::SystemClock;
use order_form::{
    Catalog, Config, LoggingTransport, OrderAction, OrderForm, OrderFormEnvironment, OrderFormError,
    OrderState, RuleRegistry,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let catalog = Catalog::from_path(&config.catalog_path)?;
    for band in catalog.bands() {
        println!("{} - {} @ {}: {}", band.name, band.date, band.location, band.description_text());
        for ticket in &band.ticket_types {
            println!("    {} ({}) {}", ticket.name, ticket.id, ticket.cost);
        }
    }

    let env = OrderFormEnvironment::new(
        Arc::new(RuleRegistry::standard()?),
        Arc::new(LoggingTransport::new(config.submit_endpoint.clone())),
        Arc::new(SystemClock),
    );
    let form = OrderForm::new(catalog, env).await;
    info!(endpoint = %config.submit_endpoint, "Order form ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let action = match OrderAction::from_json(line) {
            Ok(action) => action,
            Err(e) => {
                warn!(error = %e, "Skipping line");
                continue;
            },
        };

        if action == OrderAction::Submit {
            match form.submit().await {
                Ok(ack) => println!("Order placed. Confirmation: {}", ack.confirmation),
                Err(OrderFormError::Submission(notice)) => println!("{notice}"),
                Err(e) => println!("Order could not be sent: {e}"),
            }
        } else {
            let _ = form.dispatch(action).await;
        }

        print_summary(&form.snapshot().await);
    }

    Ok(())
}

fn print_summary(state: &OrderState) {
    let invalid: Vec<String> = state.invalid_fields.iter().map(|field| field.to_string()).collect();
    println!(
        "total={} tickets={} invalid=[{}]",
        state.total_cost,
        state.ticket_selections.total_quantity(),
        invalid.join(", ")
    );
    for field in state.invalid_fields.iter() {
        println!("    {}", field.error_message());
    }
}
