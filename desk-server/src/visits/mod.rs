//! Visits and waiting list
//!
//! - **storage**: redb persistence (visits, occupancy index, waiting list)
//! - **manager**: `FrontDesk`, the transactional seating workflow
//!
//! # Architecture
//!
//! ```text
//! HTTP handler → FrontDesk → AllocationPolicy → SeatDecision
//!                    ↓                              ↓
//!              VisitStorage (redb) ←── store visit / mark entry seated
//!                    ↓
//!             DeskEvent broadcast
//! ```

mod error;
pub mod manager;
pub mod storage;

pub use error::{DeskError, DeskResult};
pub use manager::{DeskEvent, FrontDesk};
pub use storage::{StorageError, StorageResult, VisitStorage};
