//! Table availability calculator
//!
//! `free = {1..=table_count} - occupied`, where `occupied` holds the table
//! numbers of active visits in the same venue (and floor, for floored
//! venues). Pure functions; callers re-run them whenever the visit set
//! changes.

use std::collections::BTreeSet;

use shared::models::{ActiveVisit, Availability, Floor, VenueCapacity};

/// Whether `visit` holds a table in the given venue / floor
fn occupies(visit: &ActiveVisit, capacity: &VenueCapacity, floor: Option<Floor>) -> bool {
    visit.is_active()
        && visit.venue_id == capacity.venue_id
        && (!capacity.has_floors() || visit.floor == floor)
}

/// Table numbers held by active visits, ascending
///
/// Numbers outside the venue's range are kept here so stale data stays
/// visible, but they never affect [`free_tables`].
pub fn occupied_tables(
    capacity: &VenueCapacity,
    floor: Option<Floor>,
    visits: &[ActiveVisit],
) -> BTreeSet<u32> {
    if capacity.has_floors() && floor.is_none() {
        return BTreeSet::new();
    }
    visits
        .iter()
        .filter(|v| occupies(v, capacity, floor))
        .map(|v| v.table_number)
        .collect()
}

/// Free table numbers in ascending order
///
/// A floored venue without a floor selection yields an empty sequence.
pub fn free_tables(capacity: &VenueCapacity, floor: Option<Floor>, visits: &[ActiveVisit]) -> Vec<u32> {
    if capacity.has_floors() && floor.is_none() {
        return Vec::new();
    }
    let occupied = occupied_tables(capacity, floor, visits);
    (1..=capacity.table_count)
        .filter(|n| !occupied.contains(n))
        .collect()
}

/// Full availability view for a venue / floor
pub fn availability(
    capacity: &VenueCapacity,
    floor: Option<Floor>,
    visits: &[ActiveVisit],
) -> Availability {
    let occupied: Vec<u32> = occupied_tables(capacity, floor, visits)
        .into_iter()
        .filter(|n| capacity.contains_table(*n))
        .collect();
    Availability {
        venue_id: capacity.venue_id.clone(),
        floor,
        table_count: capacity.table_count,
        free_tables: free_tables(capacity, floor, visits),
        occupied_tables: occupied,
    }
}
