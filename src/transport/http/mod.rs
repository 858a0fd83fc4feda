pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod health;
    pub mod records;
    pub mod visit;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
