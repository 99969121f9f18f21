//! The analytics endpoint.

use axum::{
    Json,
    extract::{Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    analytics::{Analytics, AnalyticsState, DEFAULT_MONTHS, month_window, summarize},
    db::lock_connection,
    response::ApiResponse,
    timezone::local_today,
    transaction::{TransactionFilter, get_transactions},
    validation::ValidationError,
};

/// The query string for the analytics endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// How many months to summarise, counting the current month.
    pub months: Option<String>,
}

impl AnalyticsQuery {
    fn months(&self) -> Result<u32, ValidationError> {
        match self.months.as_deref().map(str::trim) {
            None | Some("") => Ok(DEFAULT_MONTHS),
            Some(text) => match text.parse::<u32>() {
                Ok(months) if months >= 1 => Ok(months),
                _ => Err(ValidationError::InvalidMonths(text.to_owned())),
            },
        }
    }
}

/// Summarise the transactions in the last `months` months, including the current month.
pub async fn get_analytics_endpoint(
    State(state): State<AnalyticsState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<ApiResponse<Analytics>>, Error> {
    let months = query.months()?;
    let today = local_today(&state.local_timezone)?;
    let connection = lock_connection(&state.db_connection)?;

    let analytics = analytics_for(today, months, &connection)?;

    Ok(Json(ApiResponse::success(analytics)))
}

/// Summarise the transactions in the `months` months ending with the month of `anchor`.
///
/// # Errors
/// This function will return a:
/// - [Error::Validation] if `months` is zero or reaches before the supported calendar,
/// - or [Error::SqlError] if there is an SQL error.
pub fn analytics_for(anchor: Date, months: u32, connection: &Connection) -> Result<Analytics, Error> {
    let window = month_window(anchor, months)?;

    let transactions = get_transactions(
        &TransactionFilter::date_range(Some(window.start), Some(window.end)),
        connection,
    )?;
    tracing::debug!(
        "Summarising {} transactions from {} to {}",
        transactions.len(),
        window.start,
        window.end
    );

    Ok(summarize(&transactions))
}
