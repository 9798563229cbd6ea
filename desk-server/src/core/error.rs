use thiserror::Error;

use crate::floor_plan::FloorPlanError;
use crate::visits::DeskError;

/// Startup and serving errors
///
/// Request-level failures use `shared::error::AppError`; these only abort
/// the process.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Floor plan error: {0}")]
    FloorPlan(#[from] FloorPlanError),

    #[error("Front desk initialization failed: {0}")]
    FrontDesk(#[from] DeskError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
