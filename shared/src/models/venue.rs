//! Venue Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Venue identifier (loja)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub String);

impl VenueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VenueId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for VenueId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Floor (andar) within a venue, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Floor(pub u8);

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Capacity entry of the floor plan
///
/// Table numbers run from 1 to `table_count`. Venues with floors repeat the
/// same numbering range on every floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueCapacity {
    pub venue_id: VenueId,
    pub name: String,
    pub table_count: u32,
    #[serde(default)]
    pub floor_count: u8,
}

impl VenueCapacity {
    pub fn new(venue_id: impl Into<VenueId>, name: impl Into<String>, table_count: u32) -> Self {
        Self {
            venue_id: venue_id.into(),
            name: name.into(),
            table_count,
            floor_count: 0,
        }
    }

    /// Split the venue into `floor_count` floors sharing the numbering range
    pub fn with_floors(mut self, floor_count: u8) -> Self {
        self.floor_count = floor_count;
        self
    }

    pub fn has_floors(&self) -> bool {
        self.floor_count > 0
    }

    /// Floors of the venue, empty when the venue is not subdivided
    pub fn floors(&self) -> impl Iterator<Item = Floor> {
        (1..=self.floor_count).map(Floor)
    }

    pub fn contains_table(&self, table_number: u32) -> bool {
        (1..=self.table_count).contains(&table_number)
    }
}

/// Venue as exposed by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueInfo {
    pub venue_id: VenueId,
    pub name: String,
    pub table_count: u32,
    pub has_floors: bool,
    pub floors: Vec<Floor>,
}

impl From<&VenueCapacity> for VenueInfo {
    fn from(capacity: &VenueCapacity) -> Self {
        Self {
            venue_id: capacity.venue_id.clone(),
            name: capacity.name.clone(),
            table_count: capacity.table_count,
            has_floors: capacity.has_floors(),
            floors: capacity.floors().collect(),
        }
    }
}
