//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::VenueNotFound | Self::VisitNotFound | Self::WaitlistEntryNotFound => {
                StatusCode::NOT_FOUND
            }

            // State conflicts: the UI refreshes and offers an alternative
            Self::TableOccupied
            | Self::VisitAlreadyFinished
            | Self::WaitlistEntryAlreadySeated => StatusCode::CONFLICT,

            Self::ValidationFailed | Self::FloorConfigInvalid | Self::TableOutOfRange => {
                StatusCode::BAD_REQUEST
            }

            Self::DatabaseError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
