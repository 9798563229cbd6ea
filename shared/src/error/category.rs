//! Error category by code range

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// - `Request` (0xxx): the payload itself is wrong
/// - `Seating` (7xxx): venue, table, visit or waiting list state
/// - `System` (9xxx): storage or configuration, logged server side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Request,
    Seating,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::Request,
            7000..8000 => Self::Seating,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
