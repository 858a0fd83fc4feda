//! Demo consumer: watches the record API with the polling client and prints
//! contact submissions and the customer count as snapshots arrive.

use std::sync::Arc;

use site_records::{
    Record, RecordClient, RecordPoller, RecordSubscriber, StoredRecord, DEFAULT_POLL_INTERVAL,
};

struct ConsolePrinter;

impl RecordSubscriber for ConsolePrinter {
    fn on_records(&self, records: Vec<StoredRecord>) {
        let mut contacts = 0usize;
        let mut customer_count = 0usize;
        for stored in &records {
            match stored.record() {
                Some(Record::Contact(contact)) => {
                    contacts += 1;
                    println!(
                        "  contact: {} <{}>",
                        contact.name.as_deref().unwrap_or("(no name)"),
                        contact.email.as_deref().unwrap_or("-")
                    );
                }
                Some(Record::CustomerCount(_)) => customer_count += 1,
                _ => {}
            }
        }
        println!(
            "> snapshot: {} records ({} contacts, {} customer_count)",
            records.len(),
            contacts,
            customer_count
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let base_url = std::env::var("RECORDS_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    println!("> Watching {} (Ctrl+C to stop)...", base_url);

    let poller = RecordPoller::start(
        RecordClient::new(reqwest::Client::new(), base_url),
        DEFAULT_POLL_INTERVAL,
        Arc::new(ConsolePrinter),
    )
    .await?;

    tokio::signal::ctrl_c().await?;
    poller.stop();
    poller.join().await;
    println!("> Stopped.");
    Ok(())
}
