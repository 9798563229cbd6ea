//! Shared types for the front desk service
//!
//! Wire models (venues, visits, waiting list, seat decisions), unified error
//! types and response structures used by the server and its clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
