//! Allocation policy
//!
//! Decides where a client sits given the current active visits. The policy
//! only authorizes a table; writing the visit is the caller's job
//! (see `FrontDesk`, which does both inside one redb write transaction).

use std::sync::Arc;

use shared::models::{ActiveVisit, Floor, SeatDecision, VenueId, WaitlistEntry};
use tracing::debug;

use super::availability::free_tables;
use crate::floor_plan::{FloorPlan, FloorPlanError, FloorPlanResult};

/// Seat allocation policy over a fixed floor plan
#[derive(Debug, Clone)]
pub struct AllocationPolicy {
    plan: Arc<FloorPlan>,
}

impl AllocationPolicy {
    pub fn new(plan: Arc<FloorPlan>) -> Self {
        Self { plan }
    }

    pub fn floor_plan(&self) -> &FloorPlan {
        &self.plan
    }

    /// Decide a seat for a new visit
    ///
    /// - no free table at all: `VenueFull`, whatever the request
    /// - `desired_table` given: `Seated` when free, `TableOccupied` otherwise
    /// - no `desired_table`: lowest free table
    ///
    /// Unknown venues, invalid floors and out-of-range table numbers are
    /// precondition violations returned as `Err`.
    pub fn request_seat(
        &self,
        venue_id: &VenueId,
        floor: Option<Floor>,
        desired_table: Option<u32>,
        visits: &[ActiveVisit],
    ) -> FloorPlanResult<SeatDecision> {
        let capacity = self.plan.capacity_of(venue_id)?;
        FloorPlan::validate_floor(capacity, floor)?;

        if let Some(table_number) = desired_table
            && !capacity.contains_table(table_number)
        {
            return Err(FloorPlanError::TableOutOfRange {
                venue_id: venue_id.clone(),
                table_number,
                table_count: capacity.table_count,
            });
        }

        let free = free_tables(capacity, floor, visits);

        let decision = match (desired_table, free.first()) {
            // A full venue wins over any desired table
            (_, None) => SeatDecision::VenueFull,
            (Some(table_number), Some(_)) if free.contains(&table_number) => {
                SeatDecision::Seated { table_number }
            }
            (Some(table_number), Some(_)) => SeatDecision::TableOccupied { table_number },
            (None, Some(&table_number)) => SeatDecision::Seated { table_number },
        };

        debug!(
            venue_id = %venue_id,
            floor = ?floor,
            desired_table = ?desired_table,
            free_count = free.len(),
            decision = ?decision,
            "Seat decision"
        );

        Ok(decision)
    }

    /// Decide a seat for a waiting list entry, in the entry's venue
    pub fn promote_from_waitlist(
        &self,
        entry: &WaitlistEntry,
        floor: Option<Floor>,
        desired_table: Option<u32>,
        visits: &[ActiveVisit],
    ) -> FloorPlanResult<SeatDecision> {
        self.request_seat(&entry.venue_id, floor, desired_table, visits)
    }
}
