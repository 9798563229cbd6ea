//! Seating decisions and availability views

use serde::{Deserialize, Serialize};

use super::venue::{Floor, VenueId};
use super::visit::ActiveVisit;

/// Outcome of an allocation attempt
///
/// `VenueFull` and `TableOccupied` are expected outcomes: the caller offers
/// another table or the waiting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SeatDecision {
    Seated { table_number: u32 },
    VenueFull,
    TableOccupied { table_number: u32 },
}

/// Outcome of a committed seating (direct or from the waiting list)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SeatOutcome {
    Seated { visit: ActiveVisit },
    VenueFull,
    TableOccupied { table_number: u32 },
}

impl SeatOutcome {
    pub fn visit(&self) -> Option<&ActiveVisit> {
        match self {
            SeatOutcome::Seated { visit } => Some(visit),
            _ => None,
        }
    }
}

/// Seat request payload (advisory decision, nothing is written)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatRequest {
    #[serde(default)]
    pub floor: Option<Floor>,
    #[serde(default)]
    pub table_number: Option<u32>,
}

/// Free / occupied tables of a venue or floor
///
/// `free_tables.len() + occupied_tables.len() == table_count` whenever the
/// floor selection is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub venue_id: VenueId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<Floor>,
    pub table_count: u32,
    pub free_tables: Vec<u32>,
    pub occupied_tables: Vec<u32>,
}

impl Availability {
    pub fn is_full(&self) -> bool {
        self.free_tables.is_empty()
    }
}
