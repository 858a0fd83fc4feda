//! Record persistence: a schema-less JSONB collection plus the distinguished
//! visit-counter row, both in PostgreSQL.

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{RecordStore, StoredRow, VISIT_COUNTER_KEY};
