use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use super::storage::StorageError;
use crate::floor_plan::FloorPlanError;

/// Front desk errors
///
/// Expected seating outcomes (`VenueFull`, `TableOccupied`) are not errors;
/// they travel as `SeatDecision` / `SeatOutcome` values.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    FloorPlan(#[from] FloorPlanError),

    #[error("Visit not found: {0}")]
    VisitNotFound(String),

    #[error("Visit already finished: {0}")]
    VisitAlreadyFinished(String),

    #[error("Waiting list entry not found: {0}")]
    WaitlistEntryNotFound(String),

    #[error("Waiting list entry already seated: {0}")]
    WaitlistEntryAlreadySeated(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type DeskResult<T> = Result<T, DeskError>;

/// Map a floor plan precondition failure to an error code
fn classify_floor_plan_error(e: &FloorPlanError) -> ErrorCode {
    match e {
        FloorPlanError::UnknownVenue(_) => ErrorCode::VenueNotFound,
        FloorPlanError::UnknownFloorConfiguration { .. } => ErrorCode::FloorConfigInvalid,
        FloorPlanError::TableOutOfRange { .. } => ErrorCode::TableOutOfRange,
        FloorPlanError::InvalidConfig(_) | FloorPlanError::Io(_) | FloorPlanError::Parse(_) => {
            ErrorCode::ConfigError
        }
    }
}

impl From<DeskError> for AppError {
    fn from(err: DeskError) -> Self {
        match err {
            DeskError::Storage(StorageError::OccupancyConflict { key, visit_id }) => {
                AppError::table_occupied(key, visit_id)
            }
            DeskError::Storage(e) => {
                tracing::error!(error = %e, "Storage error occurred");
                AppError::database(e.to_string())
            }
            DeskError::FloorPlan(e) => {
                let code = classify_floor_plan_error(&e);
                let err = AppError::with_message(code, e.to_string());
                match e {
                    FloorPlanError::UnknownVenue(venue_id) => {
                        err.with_detail("venue_id", venue_id.0)
                    }
                    FloorPlanError::UnknownFloorConfiguration { venue_id, floor } => err
                        .with_detail("venue_id", venue_id.0)
                        .with_detail("floor", floor.map(|f| f.0)),
                    FloorPlanError::TableOutOfRange {
                        venue_id,
                        table_number,
                        table_count,
                    } => err
                        .with_detail("venue_id", venue_id.0)
                        .with_detail("table_number", table_number)
                        .with_detail("table_count", table_count),
                    _ => err,
                }
            }
            DeskError::VisitNotFound(id) => AppError::visit_not_found(id),
            DeskError::VisitAlreadyFinished(id) => AppError::visit_already_finished(id),
            DeskError::WaitlistEntryNotFound(id) => AppError::waitlist_entry_not_found(id),
            DeskError::WaitlistEntryAlreadySeated(id) => AppError::waitlist_entry_seated(id),
            DeskError::Validation(msg) => AppError::validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Floor, VenueId};

    #[test]
    fn test_floor_plan_errors_keep_details() {
        let err: AppError = DeskError::FloorPlan(FloorPlanError::UnknownFloorConfiguration {
            venue_id: VenueId::from("torre"),
            floor: Some(Floor(3)),
        })
        .into();
        assert_eq!(err.code, ErrorCode::FloorConfigInvalid);
        let details = err.details.unwrap();
        assert_eq!(details.get("venue_id").unwrap(), "torre");
        assert_eq!(details.get("floor").unwrap(), 3);

        let err: AppError =
            DeskError::FloorPlan(FloorPlanError::UnknownVenue(VenueId::from("x"))).into();
        assert_eq!(err.code, ErrorCode::VenueNotFound);
    }

    #[test]
    fn test_occupancy_conflict_maps_to_table_occupied() {
        let err: AppError = DeskError::Storage(StorageError::OccupancyConflict {
            key: "sul/0/2".to_string(),
            visit_id: "v1".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::TableOccupied);
        assert_eq!(err.details.unwrap().get("visit_id").unwrap(), "v1");
    }

    #[test]
    fn test_manager_errors() {
        let err: AppError = DeskError::VisitAlreadyFinished("v1".to_string()).into();
        assert_eq!(err.code, ErrorCode::VisitAlreadyFinished);
        let err: AppError = DeskError::Validation("client_name is required".to_string()).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
