//! Visit Model

use serde::{Deserialize, Serialize};

use super::venue::{Floor, VenueId};

/// Visit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    Active,
    Finished,
}

/// Client attendance at a table (atendimento)
///
/// Only `Active` visits occupy their table. Visits are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveVisit {
    pub id: String,
    pub venue_id: VenueId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<Floor>,
    pub table_number: u32,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_id: Option<String>,
    /// Waiting list entry this visit was promoted from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waitlist_entry_id: Option<String>,
    pub status: VisitStatus,
    /// Entry time (ms since epoch)
    pub entry_time: i64,
    /// Exit time (ms since epoch), set when finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<i64>,
}

impl ActiveVisit {
    pub fn is_active(&self) -> bool {
        self.status == VisitStatus::Active
    }

    /// Close the visit, releasing its table
    pub fn finish(&mut self, exit_time: i64) {
        self.status = VisitStatus::Finished;
        self.exit_time = Some(exit_time);
    }

    /// Occupancy key `venue/floor/table`, floor `0` for venues without floors
    pub fn occupancy_key(&self) -> String {
        occupancy_key(&self.venue_id, self.floor, self.table_number)
    }
}

pub fn occupancy_key(venue_id: &VenueId, floor: Option<Floor>, table_number: u32) -> String {
    format!(
        "{}/{}/{}",
        venue_id,
        floor.map(|f| f.0).unwrap_or(0),
        table_number
    )
}

/// Seat a client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitCreate {
    pub venue_id: VenueId,
    #[serde(default)]
    pub floor: Option<Floor>,
    /// Specific table chosen by the receptionist, lowest free table when absent
    #[serde(default)]
    pub table_number: Option<u32>,
    pub client_name: String,
    #[serde(default)]
    pub client_document: Option<String>,
    #[serde(default)]
    pub broker_id: Option<String>,
}
