//! Income and expense summaries over a window of recent months.

mod aggregation;
mod handler;
mod window;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use aggregation::{Analytics, CategorySpending, MonthlySummary, summarize};
pub use handler::{analytics_for, get_analytics_endpoint};
pub use window::{DEFAULT_MONTHS, month_window};

/// The state needed for computing analytics.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}
