//! Web layer: JSON API for entries, snapshots and sensors, plus a
//! dashboard page.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
