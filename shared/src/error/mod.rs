//! Error system of the front desk API
//!
//! - [`ErrorCode`]: numeric codes by range (0xxx request, 7xxx seating, 9xxx system)
//! - [`ErrorCategory`]: range classification
//! - [`AppError`]: code, message and the ids involved
//! - [`ApiResponse`]: response envelope
//!
//! ```
//! use shared::error::{ApiResponse, AppError};
//!
//! let err = AppError::visit_not_found("v-42");
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, 7101);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
