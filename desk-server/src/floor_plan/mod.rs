//! Venue capacity table (floor plan)
//!
//! Static mapping `venue -> {table_count, floors}` loaded once at startup and
//! shared read-only through `Arc<FloorPlan>`. Nothing here is derived from
//! persisted data.
//!
//! # File format
//!
//! ```json
//! [
//!   { "venue_id": "central", "name": "Loja Central", "table_count": 29 },
//!   { "venue_id": "torre", "name": "Loja Torre", "table_count": 10, "floor_count": 2 }
//! ]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use shared::models::{Floor, VenueCapacity, VenueId};
use thiserror::Error;

/// Floor plan errors
///
/// Every variant is a configuration or precondition violation, never an
/// expected seating outcome.
#[derive(Debug, Error)]
pub enum FloorPlanError {
    #[error("Unknown venue: {0}")]
    UnknownVenue(VenueId),

    #[error("Invalid floor {floor:?} for venue {venue_id}")]
    UnknownFloorConfiguration {
        venue_id: VenueId,
        floor: Option<Floor>,
    },

    #[error("Table {table_number} out of range 1..={table_count} for venue {venue_id}")]
    TableOutOfRange {
        venue_id: VenueId,
        table_number: u32,
        table_count: u32,
    },

    #[error("Invalid floor plan: {0}")]
    InvalidConfig(String),

    #[error("Failed to read floor plan: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse floor plan: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type FloorPlanResult<T> = Result<T, FloorPlanError>;

/// Immutable venue capacity table
#[derive(Debug, Clone)]
pub struct FloorPlan {
    venues: BTreeMap<VenueId, VenueCapacity>,
}

impl FloorPlan {
    /// Build a floor plan, rejecting empty plans, duplicate ids and venues
    /// without tables
    pub fn new(venues: Vec<VenueCapacity>) -> FloorPlanResult<Self> {
        if venues.is_empty() {
            return Err(FloorPlanError::InvalidConfig(
                "floor plan has no venues".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for venue in &venues {
            let id = venue.venue_id.as_str();
            if id.trim().is_empty() || id.contains('/') {
                return Err(FloorPlanError::InvalidConfig(format!(
                    "invalid venue_id: {:?}",
                    id
                )));
            }
            if !seen.insert(venue.venue_id.clone()) {
                return Err(FloorPlanError::InvalidConfig(format!(
                    "duplicate venue: {}",
                    venue.venue_id
                )));
            }
            if venue.table_count == 0 {
                return Err(FloorPlanError::InvalidConfig(format!(
                    "venue {} has no tables",
                    venue.venue_id
                )));
            }
        }

        Ok(Self {
            venues: venues
                .into_iter()
                .map(|v| (v.venue_id.clone(), v))
                .collect(),
        })
    }

    /// Load a floor plan from a JSON file
    pub fn load(path: impl AsRef<Path>) -> FloorPlanResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let venues: Vec<VenueCapacity> = serde_json::from_str(&content)?;
        let plan = Self::new(venues)?;
        tracing::info!(
            path = %path.display(),
            venues = plan.len(),
            "Floor plan loaded"
        );
        Ok(plan)
    }

    /// Capacity entry of a venue
    pub fn capacity_of(&self, venue_id: &VenueId) -> FloorPlanResult<&VenueCapacity> {
        self.venues
            .get(venue_id)
            .ok_or_else(|| FloorPlanError::UnknownVenue(venue_id.clone()))
    }

    /// Check a floor selection against the venue
    ///
    /// A floored venue needs a floor in `1..=floor_count`; a venue without
    /// floors accepts none.
    pub fn validate_floor(capacity: &VenueCapacity, floor: Option<Floor>) -> FloorPlanResult<()> {
        let valid = match floor {
            None => !capacity.has_floors(),
            Some(Floor(n)) => capacity.has_floors() && (1..=capacity.floor_count).contains(&n),
        };
        if valid {
            Ok(())
        } else {
            Err(FloorPlanError::UnknownFloorConfiguration {
                venue_id: capacity.venue_id.clone(),
                floor,
            })
        }
    }

    /// All venues ordered by id
    pub fn venues(&self) -> impl Iterator<Item = &VenueCapacity> {
        self.venues.values()
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

impl Default for FloorPlan {
    /// Built-in plan: three single-level venues and one venue split in two floors
    fn default() -> Self {
        Self {
            venues: [
                VenueCapacity::new("central", "Loja Central", 29),
                VenueCapacity::new("norte", "Loja Norte", 22),
                VenueCapacity::new("sul", "Loja Sul", 10),
                VenueCapacity::new("torre", "Loja Torre", 10).with_floors(2),
            ]
            .into_iter()
            .map(|v| (v.venue_id.clone(), v))
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_plan() {
        let plan = FloorPlan::default();
        assert_eq!(plan.len(), 4);

        let central = plan.capacity_of(&VenueId::from("central")).unwrap();
        assert_eq!(central.table_count, 29);
        assert!(!central.has_floors());

        let torre = plan.capacity_of(&VenueId::from("torre")).unwrap();
        assert!(torre.has_floors());
        assert_eq!(torre.floors().collect::<Vec<_>>(), vec![Floor(1), Floor(2)]);
    }

    #[test]
    fn test_unknown_venue() {
        let plan = FloorPlan::default();
        let err = plan.capacity_of(&VenueId::from("leste")).unwrap_err();
        assert!(matches!(err, FloorPlanError::UnknownVenue(v) if v.as_str() == "leste"));
    }

    #[test]
    fn test_rejects_duplicates_and_empty_venues() {
        let dup = FloorPlan::new(vec![
            VenueCapacity::new("a", "A", 3),
            VenueCapacity::new("a", "A again", 5),
        ]);
        assert!(matches!(dup, Err(FloorPlanError::InvalidConfig(_))));

        let zero = FloorPlan::new(vec![VenueCapacity::new("a", "A", 0)]);
        assert!(matches!(zero, Err(FloorPlanError::InvalidConfig(_))));

        assert!(FloorPlan::new(vec![]).is_err());
        assert!(FloorPlan::new(vec![VenueCapacity::new("a/b", "Slash", 2)]).is_err());
    }

    #[test]
    fn test_validate_floor() {
        let flat = VenueCapacity::new("sul", "Sul", 10);
        let floored = VenueCapacity::new("torre", "Torre", 10).with_floors(2);

        assert!(FloorPlan::validate_floor(&flat, None).is_ok());
        assert!(FloorPlan::validate_floor(&flat, Some(Floor(1))).is_err());
        assert!(FloorPlan::validate_floor(&floored, None).is_err());
        assert!(FloorPlan::validate_floor(&floored, Some(Floor(2))).is_ok());
        assert!(FloorPlan::validate_floor(&floored, Some(Floor(3))).is_err());
        assert!(FloorPlan::validate_floor(&floored, Some(Floor(0))).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"venue_id":"x","name":"X","table_count":5}},{{"venue_id":"y","name":"Y","table_count":3,"floor_count":2}}]"#
        )
        .unwrap();

        let plan = FloorPlan::load(file.path()).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.capacity_of(&VenueId::from("y")).unwrap().floor_count, 2);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            FloorPlan::load(file.path()),
            Err(FloorPlanError::Parse(_))
        ));
    }
}
