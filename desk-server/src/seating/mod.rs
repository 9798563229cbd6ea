//! Table availability and seat allocation
//!
//! - **availability**: free / occupied table computation (pure)
//! - **policy**: seat decisions for new visits and waiting list promotion

pub mod availability;
pub mod policy;

pub use availability::{availability, free_tables, occupied_tables};
pub use policy::AllocationPolicy;
