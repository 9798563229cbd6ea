use std::sync::Arc;

use crate::core::{Config, Result};
use crate::floor_plan::FloorPlan;
use crate::visits::FrontDesk;

/// Server state shared by every handler
///
/// Cheap to clone: services sit behind `Arc`.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | immutable configuration |
/// | floor_plan | Arc<FloorPlan> | venue capacity table |
/// | front_desk | Arc<FrontDesk> | seating / waiting list manager |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub floor_plan: Arc<FloorPlan>,
    pub front_desk: Arc<FrontDesk>,
}

impl ServerState {
    pub fn new(config: Config, floor_plan: Arc<FloorPlan>, front_desk: Arc<FrontDesk>) -> Self {
        Self {
            config,
            floor_plan,
            front_desk,
        }
    }

    /// Initialize server state
    ///
    /// 1. Work directory (`data/`)
    /// 2. Floor plan (file or built-in)
    /// 3. Visit database (`data/visits.redb`)
    ///
    /// A bad floor plan or an unreadable database aborts startup.
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(config.data_dir())?;

        let floor_plan = match &config.floor_plan_path {
            Some(path) => FloorPlan::load(path)?,
            None => {
                tracing::info!("FLOOR_PLAN_PATH not set, using built-in floor plan");
                FloorPlan::default()
            }
        };
        let floor_plan = Arc::new(floor_plan);

        let front_desk = FrontDesk::new(config.database_path(), floor_plan.clone())?;

        Ok(Self::new(config.clone(), floor_plan, Arc::new(front_desk)))
    }
}
