//! Waiting List Model

use serde::{Deserialize, Serialize};

use super::venue::{Floor, VenueId};

/// Waiting list entry status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    Waiting,
    Seated,
}

/// Client waiting for a table (lista de espera)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: String,
    pub venue_id: VenueId,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_id: Option<String>,
    /// Development (empreendimento) the client is interested in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_development: Option<String>,
    pub status: WaitlistStatus,
    pub created_at: i64,
    /// Arrival order, breaks ties between equal `created_at`
    #[serde(default)]
    pub sequence: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seated_at: Option<i64>,
    /// Visit created on promotion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_id: Option<String>,
}

impl WaitlistEntry {
    pub fn is_waiting(&self) -> bool {
        self.status == WaitlistStatus::Waiting
    }

    /// Record the promotion to `visit_id`
    pub fn mark_seated(&mut self, visit_id: impl Into<String>, seated_at: i64) {
        self.status = WaitlistStatus::Seated;
        self.visit_id = Some(visit_id.into());
        self.seated_at = Some(seated_at);
    }
}

/// Add to waiting list payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistCreate {
    pub venue_id: VenueId,
    pub client_name: String,
    #[serde(default)]
    pub client_document: Option<String>,
    #[serde(default)]
    pub broker_id: Option<String>,
    #[serde(default)]
    pub desired_development: Option<String>,
}

/// Promote waiting list entry payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaitlistPromote {
    #[serde(default)]
    pub floor: Option<Floor>,
    #[serde(default)]
    pub table_number: Option<u32>,
}
