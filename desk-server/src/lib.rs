//! Front Desk Server - table allocation for real-estate sales venues
//!
//! Receptionists seat visiting clients at a free table of a venue (loja),
//! or put them on the venue's waiting list when every table is taken.
//!
//! # Module structure
//!
//! ```text
//! desk-server/src/
//! ├── core/          # config, state, server errors
//! ├── floor_plan/    # venue capacity table
//! ├── seating/       # availability calculator, allocation policy
//! ├── visits/        # redb storage, FrontDesk manager
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, error re-exports
//! ```

pub mod api;
pub mod core;
pub mod floor_plan;
pub mod seating;
pub mod utils;
pub mod visits;

pub use core::{Config, Server, ServerState};
pub use floor_plan::{FloorPlan, FloorPlanError};
pub use seating::AllocationPolicy;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use visits::{DeskError, DeskEvent, FrontDesk, VisitStorage};

pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Load `.env`, then start logging
///
/// Production logs JSON to the console and to `<work_dir>/logs/app`;
/// other environments log pretty output to the console only.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    if config.is_production() {
        let log_dir = config.log_dir();
        init_logger_with_file(&config.log_level, true, Some(&log_dir))?;
    } else {
        init_logger(&config.log_level, false)?;
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ______                 __     ____            __
   / ____/________  ____  / /_   / __ \___  _____/ /__
  / /_  / ___/ __ \/ __ \/ __/  / / / / _ \/ ___/ //_/
 / __/ / /  / /_/ / / / / /_   / /_/ /  __(__  ) ,<
/_/   /_/   \____/_/ /_/\__/  /_____/\___/____/_/|_|
    "#
    );
}
