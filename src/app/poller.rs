//! Polling client for the record API.
//!
//! The website clients have no push channel: they refetch the full record
//! list on a fixed interval and republish it wholesale to a subscriber. Each
//! delivery replaces the subscriber's previous view; nothing is merged or
//! diffed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

use crate::app::client::RecordClient;
use crate::domain::record::StoredRecord;

/// Poll interval used by the website clients.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Receives each full snapshot of the record list.
pub trait RecordSubscriber: Send + Sync {
    fn on_records(&self, records: Vec<StoredRecord>);
}

/// A running poll loop. Stop it with [`stop`](Self::stop); dropping the
/// handle also winds the loop down without waiting for an in-flight tick.
pub struct RecordPoller {
    shutdown: watch::Sender<bool>,
    refresh: Arc<Notify>,
    task: JoinHandle<()>,
}

impl RecordPoller {
    /// Fetches once and delivers that snapshot to `subscriber` before
    /// returning, then refetches every `interval` until [`stop`](Self::stop).
    ///
    /// A failed initial fetch is returned to the caller; the loop is not
    /// started in that case.
    pub async fn start(
        client: RecordClient,
        interval: Duration,
        subscriber: Arc<dyn RecordSubscriber>,
    ) -> anyhow::Result<Self> {
        let records = client.list().await?;
        subscriber.on_records(records);

        let (shutdown, mut stopped) = watch::channel(false);
        let refresh = Arc::new(Notify::new());
        let trigger = refresh.clone();
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = stopped.changed() => break,
                    _ = tokio::time::sleep(interval) => {}
                    _ = trigger.notified() => {}
                }
                if *stopped.borrow() {
                    break;
                }
                // The fetch itself is never cancelled: a stop during a tick
                // lets the tick finish and only prevents the next one.
                match client.list().await {
                    Ok(records) => subscriber.on_records(records),
                    Err(err) => {
                        eprintln!("> RecordPoller: fetch failed, keeping previous view: {}", err);
                    }
                }
            }
        });

        Ok(Self {
            shutdown,
            refresh,
            task,
        })
    }

    /// Requests an immediate out-of-band tick, the way the pages refetch
    /// right after a create or delete. Delivery still happens on the poll
    /// task, so ticks never overlap.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Prevents any further tick from firing. A tick already in flight is
    /// allowed to complete but will not reschedule.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Waits for the poll loop to wind down after [`stop`](Self::stop).
    pub async fn join(self) {
        let _ = self.task.await;
    }
}
