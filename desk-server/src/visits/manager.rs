//! FrontDesk - seating, waiting list and visit lifecycle
//!
//! # Seating Flow
//!
//! ```text
//! seat_visit(req)
//!     ├─ 1. Validate payload
//!     ├─ 2. Begin write transaction
//!     ├─ 3. Read active visits of the venue (same transaction)
//!     ├─ 4. AllocationPolicy decides (Seated / VenueFull / TableOccupied)
//!     ├─ 5. Store visit + claim occupancy key
//!     ├─ 6. Commit
//!     └─ 7. Broadcast DeskEvent
//! ```
//!
//! Steps 3 to 6 run under redb's single writer, so two receptionists can
//! never seat clients at the same table.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::models::{
    ActiveVisit, Availability, Floor, SeatDecision, SeatOutcome, VenueId, VenueInfo, VisitCreate,
    VisitStatus, WaitlistCreate, WaitlistEntry, WaitlistPromote, WaitlistStatus,
};
use shared::util::{new_id, now_millis};
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::error::{DeskError, DeskResult};
use super::storage::{StorageError, VisitStorage};
use crate::floor_plan::FloorPlan;
use crate::seating::{self, AllocationPolicy};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};

/// Change notification channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Change notifications for live refresh of availability views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeskEvent {
    VisitStarted { visit: ActiveVisit },
    VisitFinished { visit: ActiveVisit },
    WaitlistJoined { entry: WaitlistEntry },
    WaitlistSeated { entry: WaitlistEntry, visit: ActiveVisit },
}

/// Front desk manager
pub struct FrontDesk {
    storage: VisitStorage,
    policy: AllocationPolicy,
    event_tx: broadcast::Sender<DeskEvent>,
}

impl std::fmt::Debug for FrontDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrontDesk")
            .field("storage", &"<VisitStorage>")
            .field("venues", &self.policy.floor_plan().len())
            .finish()
    }
}

impl FrontDesk {
    /// Open the visit database at `db_path`
    pub fn new(db_path: impl AsRef<Path>, plan: Arc<FloorPlan>) -> DeskResult<Self> {
        let storage = VisitStorage::open(db_path)?;
        info!(venues = plan.len(), "FrontDesk started");
        Ok(Self::with_storage(storage, plan))
    }

    pub fn with_storage(storage: VisitStorage, plan: Arc<FloorPlan>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            storage,
            policy: AllocationPolicy::new(plan),
            event_tx,
        }
    }

    pub fn floor_plan(&self) -> &FloorPlan {
        self.policy.floor_plan()
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<DeskEvent> {
        self.event_tx.subscribe()
    }

    fn broadcast(&self, event: DeskEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("No change subscribers");
        }
    }

    // ========== Queries ==========

    pub fn venues(&self) -> Vec<VenueInfo> {
        self.floor_plan().venues().map(VenueInfo::from).collect()
    }

    /// Free and occupied tables of a venue / floor
    ///
    /// A floored venue queried without a floor reports no free table.
    pub fn availability(&self, venue_id: &VenueId, floor: Option<Floor>) -> DeskResult<Availability> {
        let capacity = self.floor_plan().capacity_of(venue_id)?;
        if floor.is_some() {
            FloorPlan::validate_floor(capacity, floor)?;
        }
        let visits = self.storage.active_visits(venue_id)?;
        Ok(seating::availability(capacity, floor, &visits))
    }

    /// Active visits of a venue
    pub fn active_visits(&self, venue_id: &VenueId) -> DeskResult<Vec<ActiveVisit>> {
        self.floor_plan().capacity_of(venue_id)?;
        let mut visits = self.storage.active_visits(venue_id)?;
        visits.sort_by_key(|v| (v.floor, v.table_number));
        Ok(visits)
    }

    /// Every visit of a venue, finished ones included, oldest first
    pub fn visit_history(&self, venue_id: &VenueId) -> DeskResult<Vec<ActiveVisit>> {
        self.floor_plan().capacity_of(venue_id)?;
        Ok(self.storage.visits_for_venue(venue_id)?)
    }

    pub fn visit(&self, visit_id: &str) -> DeskResult<ActiveVisit> {
        self.storage
            .find_visit(visit_id)?
            .ok_or_else(|| DeskError::VisitNotFound(visit_id.to_string()))
    }

    pub fn waitlist(
        &self,
        venue_id: Option<&VenueId>,
        status: Option<WaitlistStatus>,
    ) -> DeskResult<Vec<WaitlistEntry>> {
        if let Some(venue_id) = venue_id {
            self.floor_plan().capacity_of(venue_id)?;
        }
        Ok(self.storage.waitlist(venue_id, status)?)
    }

    pub fn waitlist_entry(&self, entry_id: &str) -> DeskResult<WaitlistEntry> {
        self.storage
            .find_waitlist_entry(entry_id)?
            .ok_or_else(|| DeskError::WaitlistEntryNotFound(entry_id.to_string()))
    }

    // ========== Seating ==========

    /// Advisory seat decision against current occupancy; writes nothing
    pub fn request_seat(
        &self,
        venue_id: &VenueId,
        floor: Option<Floor>,
        desired_table: Option<u32>,
    ) -> DeskResult<SeatDecision> {
        let visits = self.storage.active_visits(venue_id)?;
        Ok(self
            .policy
            .request_seat(venue_id, floor, desired_table, &visits)?)
    }

    /// Seat a client: decide and insert the visit atomically
    pub fn seat_visit(&self, req: VisitCreate) -> DeskResult<SeatOutcome> {
        let client_name = validate_required_text(&req.client_name, "client_name", MAX_NAME_LEN)?;
        let client_document =
            validate_optional_text(req.client_document, "client_document", MAX_SHORT_TEXT_LEN)?;
        let broker_id = validate_optional_text(req.broker_id, "broker_id", MAX_SHORT_TEXT_LEN)?;

        let txn = self.storage.begin_write()?;
        let visits = self.storage.active_visits_txn(&txn, &req.venue_id)?;
        let decision =
            self.policy
                .request_seat(&req.venue_id, req.floor, req.table_number, &visits)?;

        let table_number = match decision {
            SeatDecision::Seated { table_number } => table_number,
            SeatDecision::VenueFull => {
                info!(venue_id = %req.venue_id, floor = ?req.floor, "Venue full");
                return Ok(SeatOutcome::VenueFull);
            }
            SeatDecision::TableOccupied { table_number } => {
                return Ok(SeatOutcome::TableOccupied { table_number });
            }
        };

        let visit = ActiveVisit {
            id: new_id(),
            venue_id: req.venue_id,
            floor: req.floor,
            table_number,
            client_name,
            client_document,
            broker_id,
            waitlist_entry_id: None,
            status: VisitStatus::Active,
            entry_time: now_millis(),
            exit_time: None,
        };
        self.storage.store_visit(&txn, &visit)?;
        txn.commit().map_err(StorageError::from)?;

        info!(
            visit_id = %visit.id,
            venue_id = %visit.venue_id,
            floor = ?visit.floor,
            table_number,
            "Visit started"
        );
        self.broadcast(DeskEvent::VisitStarted {
            visit: visit.clone(),
        });
        Ok(SeatOutcome::Seated { visit })
    }

    /// Finish a visit, releasing its table
    pub fn finalize_visit(&self, visit_id: &str) -> DeskResult<ActiveVisit> {
        let txn = self.storage.begin_write()?;
        let mut visit = self
            .storage
            .find_visit_txn(&txn, visit_id)?
            .ok_or_else(|| DeskError::VisitNotFound(visit_id.to_string()))?;
        if !visit.is_active() {
            return Err(DeskError::VisitAlreadyFinished(visit_id.to_string()));
        }

        visit.finish(now_millis());
        self.storage.store_visit(&txn, &visit)?;
        txn.commit().map_err(StorageError::from)?;

        info!(
            visit_id = %visit.id,
            venue_id = %visit.venue_id,
            table_number = visit.table_number,
            "Visit finished"
        );
        self.broadcast(DeskEvent::VisitFinished {
            visit: visit.clone(),
        });
        Ok(visit)
    }

    // ========== Waiting List ==========

    /// Put a client on the waiting list of a venue
    pub fn join_waitlist(&self, req: WaitlistCreate) -> DeskResult<WaitlistEntry> {
        self.floor_plan().capacity_of(&req.venue_id)?;
        let client_name = validate_required_text(&req.client_name, "client_name", MAX_NAME_LEN)?;
        let client_document =
            validate_optional_text(req.client_document, "client_document", MAX_SHORT_TEXT_LEN)?;
        let broker_id = validate_optional_text(req.broker_id, "broker_id", MAX_SHORT_TEXT_LEN)?;
        let desired_development =
            validate_optional_text(req.desired_development, "desired_development", MAX_NAME_LEN)?;

        let txn = self.storage.begin_write()?;
        let entry = WaitlistEntry {
            id: new_id(),
            venue_id: req.venue_id,
            client_name,
            client_document,
            broker_id,
            desired_development,
            status: WaitlistStatus::Waiting,
            created_at: now_millis(),
            sequence: self.storage.next_waitlist_sequence(&txn)?,
            seated_at: None,
            visit_id: None,
        };
        self.storage.store_waitlist_entry(&txn, &entry)?;
        txn.commit().map_err(StorageError::from)?;

        info!(entry_id = %entry.id, venue_id = %entry.venue_id, "Client joined waiting list");
        self.broadcast(DeskEvent::WaitlistJoined {
            entry: entry.clone(),
        });
        Ok(entry)
    }

    /// Seat a waiting client
    ///
    /// On success the entry becomes `seated` and the visit is created in the
    /// same transaction. On `VenueFull` / `TableOccupied` the entry keeps
    /// waiting.
    pub fn promote_from_waitlist(
        &self,
        entry_id: &str,
        req: WaitlistPromote,
    ) -> DeskResult<SeatOutcome> {
        let txn = self.storage.begin_write()?;
        let mut entry = self
            .storage
            .find_waitlist_entry_txn(&txn, entry_id)?
            .ok_or_else(|| DeskError::WaitlistEntryNotFound(entry_id.to_string()))?;
        if !entry.is_waiting() {
            return Err(DeskError::WaitlistEntryAlreadySeated(entry_id.to_string()));
        }

        let visits = self.storage.active_visits_txn(&txn, &entry.venue_id)?;
        let decision =
            self.policy
                .promote_from_waitlist(&entry, req.floor, req.table_number, &visits)?;

        let table_number = match decision {
            SeatDecision::Seated { table_number } => table_number,
            SeatDecision::VenueFull => return Ok(SeatOutcome::VenueFull),
            SeatDecision::TableOccupied { table_number } => {
                return Ok(SeatOutcome::TableOccupied { table_number });
            }
        };

        let now = now_millis();
        let visit = ActiveVisit {
            id: new_id(),
            venue_id: entry.venue_id.clone(),
            floor: req.floor,
            table_number,
            client_name: entry.client_name.clone(),
            client_document: entry.client_document.clone(),
            broker_id: entry.broker_id.clone(),
            waitlist_entry_id: Some(entry.id.clone()),
            status: VisitStatus::Active,
            entry_time: now,
            exit_time: None,
        };
        entry.mark_seated(visit.id.clone(), now);

        self.storage.store_visit(&txn, &visit)?;
        self.storage.store_waitlist_entry(&txn, &entry)?;
        txn.commit().map_err(StorageError::from)?;

        info!(
            entry_id = %entry.id,
            visit_id = %visit.id,
            venue_id = %visit.venue_id,
            table_number,
            "Waiting client seated"
        );
        self.broadcast(DeskEvent::WaitlistSeated {
            entry,
            visit: visit.clone(),
        });
        Ok(SeatOutcome::Seated { visit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::VenueCapacity;

    fn create_test_desk() -> FrontDesk {
        let plan = FloorPlan::new(vec![
            VenueCapacity::new("sul", "Sul", 10),
            VenueCapacity::new("mini", "Mini", 3),
            VenueCapacity::new("torre", "Torre", 2).with_floors(2),
        ])
        .unwrap();
        FrontDesk::with_storage(VisitStorage::open_in_memory().unwrap(), Arc::new(plan))
    }

    fn seat_req(venue: &str, table_number: Option<u32>) -> VisitCreate {
        VisitCreate {
            venue_id: VenueId::from(venue),
            floor: None,
            table_number,
            client_name: "Maria Souza".to_string(),
            client_document: Some("123.456.789-00".to_string()),
            broker_id: Some("broker-7".to_string()),
        }
    }

    fn seated_table(outcome: &SeatOutcome) -> u32 {
        outcome.visit().expect("expected seated outcome").table_number
    }

    #[test]
    fn test_empty_venue_seats_first_table() {
        let desk = create_test_desk();
        let decision = desk.request_seat(&VenueId::from("sul"), None, None).unwrap();
        assert_eq!(decision, SeatDecision::Seated { table_number: 1 });

        let outcome = desk.seat_visit(seat_req("sul", None)).unwrap();
        assert_eq!(seated_table(&outcome), 1);
    }

    #[test]
    fn test_next_free_and_occupied_request() {
        let desk = create_test_desk();
        for _ in 0..3 {
            desk.seat_visit(seat_req("sul", None)).unwrap();
        }
        let venue = VenueId::from("sul");
        assert_eq!(
            desk.request_seat(&venue, None, None).unwrap(),
            SeatDecision::Seated { table_number: 4 }
        );
        assert_eq!(
            desk.request_seat(&venue, None, Some(2)).unwrap(),
            SeatDecision::TableOccupied { table_number: 2 }
        );
        assert_eq!(
            desk.seat_visit(seat_req("sul", Some(2))).unwrap(),
            SeatOutcome::TableOccupied { table_number: 2 }
        );
    }

    #[test]
    fn test_full_venue_then_finalize_frees_table() {
        let desk = create_test_desk();
        let visits: Vec<_> = (0..3)
            .map(|_| desk.seat_visit(seat_req("mini", None)).unwrap())
            .collect();
        let venue = VenueId::from("mini");

        assert_eq!(desk.request_seat(&venue, None, None).unwrap(), SeatDecision::VenueFull);
        assert_eq!(desk.seat_visit(seat_req("mini", None)).unwrap(), SeatOutcome::VenueFull);
        assert_eq!(desk.request_seat(&venue, None, Some(2)).unwrap(), SeatDecision::VenueFull);
        assert_eq!(desk.seat_visit(seat_req("mini", Some(2))).unwrap(), SeatOutcome::VenueFull);

        let on_two = visits
            .iter()
            .filter_map(|o| o.visit())
            .find(|v| v.table_number == 2)
            .unwrap();
        let finished = desk.finalize_visit(&on_two.id).unwrap();
        assert_eq!(finished.status, VisitStatus::Finished);
        assert!(finished.exit_time.is_some());

        assert_eq!(
            desk.request_seat(&venue, None, None).unwrap(),
            SeatDecision::Seated { table_number: 2 }
        );
    }

    #[test]
    fn test_visit_history_keeps_finished_visits() {
        let desk = create_test_desk();
        let first = desk.seat_visit(seat_req("sul", None)).unwrap();
        desk.seat_visit(seat_req("sul", None)).unwrap();
        desk.seat_visit(seat_req("mini", None)).unwrap();
        desk.finalize_visit(&first.visit().unwrap().id).unwrap();

        let venue = VenueId::from("sul");
        let history = desk.visit_history(&venue).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().filter(|v| v.is_active()).count(), 1);
        assert_eq!(desk.active_visits(&venue).unwrap().len(), 1);

        assert!(matches!(
            desk.visit_history(&VenueId::from("nowhere")),
            Err(DeskError::FloorPlan(_))
        ));
    }

    #[test]
    fn test_finalize_twice_fails() {
        let desk = create_test_desk();
        let outcome = desk.seat_visit(seat_req("sul", None)).unwrap();
        let id = outcome.visit().unwrap().id.clone();

        desk.finalize_visit(&id).unwrap();
        assert!(matches!(
            desk.finalize_visit(&id),
            Err(DeskError::VisitAlreadyFinished(_))
        ));
        assert!(matches!(
            desk.finalize_visit("missing"),
            Err(DeskError::VisitNotFound(_))
        ));
    }

    #[test]
    fn test_promote_waits_until_table_frees() {
        let desk = create_test_desk();
        let outcomes: Vec<_> = (0..3)
            .map(|_| desk.seat_visit(seat_req("mini", None)).unwrap())
            .collect();

        let entry = desk
            .join_waitlist(WaitlistCreate {
                venue_id: VenueId::from("mini"),
                client_name: "João Lima".to_string(),
                client_document: None,
                broker_id: None,
                desired_development: Some("Residencial Aurora".to_string()),
            })
            .unwrap();

        let outcome = desk
            .promote_from_waitlist(&entry.id, WaitlistPromote::default())
            .unwrap();
        assert_eq!(outcome, SeatOutcome::VenueFull);
        let outcome = desk
            .promote_from_waitlist(
                &entry.id,
                WaitlistPromote {
                    floor: None,
                    table_number: Some(3),
                },
            )
            .unwrap();
        assert_eq!(outcome, SeatOutcome::VenueFull);
        assert!(desk.waitlist_entry(&entry.id).unwrap().is_waiting());

        let first = outcomes[0].visit().unwrap();
        desk.finalize_visit(&first.id).unwrap();

        let outcome = desk
            .promote_from_waitlist(&entry.id, WaitlistPromote::default())
            .unwrap();
        let visit = outcome.visit().unwrap();
        assert_eq!(visit.table_number, first.table_number);
        assert_eq!(visit.client_name, "João Lima");
        assert_eq!(visit.waitlist_entry_id.as_deref(), Some(entry.id.as_str()));

        let seated = desk.waitlist_entry(&entry.id).unwrap();
        assert_eq!(seated.status, WaitlistStatus::Seated);
        assert_eq!(seated.visit_id.as_deref(), Some(visit.id.as_str()));

        assert!(matches!(
            desk.promote_from_waitlist(&entry.id, WaitlistPromote::default()),
            Err(DeskError::WaitlistEntryAlreadySeated(_))
        ));
    }

    #[test]
    fn test_floors_in_manager() {
        let desk = create_test_desk();
        let venue = VenueId::from("torre");

        let mut req = seat_req("torre", None);
        assert!(matches!(
            desk.seat_visit(req.clone()),
            Err(DeskError::FloorPlan(_))
        ));

        req.floor = Some(Floor(1));
        desk.seat_visit(req.clone()).unwrap();
        desk.seat_visit(req.clone()).unwrap();
        assert_eq!(desk.seat_visit(req).unwrap(), SeatOutcome::VenueFull);

        let floor_two = desk.availability(&venue, Some(Floor(2))).unwrap();
        assert_eq!(floor_two.free_tables, vec![1, 2]);
        let floor_one = desk.availability(&venue, Some(Floor(1))).unwrap();
        assert!(floor_one.is_full());
        assert_eq!(floor_one.occupied_tables, vec![1, 2]);

        let no_floor = desk.availability(&venue, None).unwrap();
        assert!(no_floor.free_tables.is_empty());
    }

    #[test]
    fn test_validation() {
        let desk = create_test_desk();
        let mut req = seat_req("sul", None);
        req.client_name = "   ".to_string();
        assert!(matches!(desk.seat_visit(req), Err(DeskError::Validation(_))));

        assert!(matches!(
            desk.join_waitlist(WaitlistCreate {
                venue_id: VenueId::from("unknown"),
                client_name: "X".to_string(),
                client_document: None,
                broker_id: None,
                desired_development: None,
            }),
            Err(DeskError::FloorPlan(_))
        ));
    }

    #[test]
    fn test_waitlist_keeps_arrival_order() {
        let desk = create_test_desk();
        let venue = VenueId::from("mini");
        // Back-to-back joins mostly land in the same millisecond
        let joined: Vec<String> = (0..20)
            .map(|i| {
                desk.join_waitlist(WaitlistCreate {
                    venue_id: venue.clone(),
                    client_name: format!("Cliente {i}"),
                    client_document: None,
                    broker_id: None,
                    desired_development: None,
                })
                .unwrap()
                .id
            })
            .collect();

        let listed = desk.waitlist(Some(&venue), Some(WaitlistStatus::Waiting)).unwrap();
        let ids: Vec<String> = listed.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, joined);
        let sequences: Vec<u64> = listed.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, (1..=20).collect::<Vec<u64>>());
    }

    #[test]
    fn test_oversized_fields_are_rejected() {
        let desk = create_test_desk();

        let mut req = seat_req("mini", None);
        req.client_name = "a".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(desk.seat_visit(req), Err(DeskError::Validation(_))));

        let mut req = seat_req("mini", None);
        req.client_document = Some("1".repeat(MAX_SHORT_TEXT_LEN + 1));
        assert!(matches!(desk.seat_visit(req), Err(DeskError::Validation(msg)) if msg.starts_with("client_document")));

        let mut req = seat_req("mini", None);
        req.broker_id = Some("b".repeat(MAX_SHORT_TEXT_LEN + 1));
        assert!(matches!(desk.seat_visit(req), Err(DeskError::Validation(_))));

        // Nothing was seated
        let venue = VenueId::from("mini");
        assert!(desk.active_visits(&venue).unwrap().is_empty());

        let oversized = desk.join_waitlist(WaitlistCreate {
            venue_id: venue.clone(),
            client_name: "Ana".to_string(),
            client_document: None,
            broker_id: None,
            desired_development: Some("d".repeat(MAX_NAME_LEN + 1)),
        });
        assert!(matches!(oversized, Err(DeskError::Validation(msg)) if msg.starts_with("desired_development")));
        assert!(desk.waitlist(Some(&venue), None).unwrap().is_empty());

        let mut req = seat_req("mini", None);
        req.client_name = "  Ana  ".to_string();
        req.client_document = Some("  ".to_string());
        let visit = desk.seat_visit(req).unwrap().visit().cloned().unwrap();
        assert_eq!(visit.client_name, "Ana");
        assert_eq!(visit.client_document, None);
    }

    #[test]
    fn test_concurrent_seating_never_double_books() {
        let desk = Arc::new(create_test_desk());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let desk = desk.clone();
                std::thread::spawn(move || desk.seat_visit(seat_req("mini", None)).unwrap())
            })
            .collect();

        let outcomes: Vec<SeatOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let mut tables: Vec<u32> = outcomes.iter().filter_map(|o| o.visit()).map(|v| v.table_number).collect();
        tables.sort();
        assert_eq!(tables, vec![1, 2, 3]);
        assert_eq!(
            outcomes.iter().filter(|o| **o == SeatOutcome::VenueFull).count(),
            5
        );
    }

    #[tokio::test]
    async fn test_events_are_broadcast() {
        let desk = create_test_desk();
        let mut rx = desk.subscribe();

        let outcome = desk.seat_visit(seat_req("sul", None)).unwrap();
        let visit = outcome.visit().unwrap().clone();
        desk.finalize_visit(&visit.id).unwrap();

        match rx.recv().await.unwrap() {
            DeskEvent::VisitStarted { visit: v } => assert_eq!(v.id, visit.id),
            other => panic!("unexpected event: {:?}", other),
        }
        match rx.recv().await.unwrap() {
            DeskEvent::VisitFinished { visit: v } => assert_eq!(v.status, VisitStatus::Finished),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
