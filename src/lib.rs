pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::client::RecordClient;
pub use app::poller::{RecordPoller, RecordSubscriber, DEFAULT_POLL_INTERVAL};
pub use app::service::{RecordService, StoreConfig};
pub use domain::record::{Record, StoredRecord};
pub use storage::records::{RecordStore, StoreError};
