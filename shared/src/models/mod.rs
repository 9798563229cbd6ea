//! Data models
//!
//! Shared between desk-server and front-end clients (via API).

pub mod seating;
pub mod venue;
pub mod visit;
pub mod waitlist;

// Re-exports
pub use seating::*;
pub use venue::*;
pub use visit::*;
pub use waitlist::*;
