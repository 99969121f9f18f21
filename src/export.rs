//! Downloading transactions as a CSV file.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    dates::{format_date, parse_date},
    db::lock_connection,
    timezone::local_today,
    transaction::{Transaction, TransactionFilter, get_transactions},
    validation::ValidationError,
};

/// The header line of an exported CSV file.
const CSV_HEADER: &str = "Type,Amount,Date,Category,Notes\n";

/// The state needed for exporting transactions.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The optional, inclusive date range of transactions to export.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TryFrom<ExportQuery> for TransactionFilter {
    type Error = ValidationError;

    fn try_from(query: ExportQuery) -> Result<Self, Self::Error> {
        let parse = |value: Option<String>| {
            value
                .filter(|text| !text.is_empty())
                .map(|text| parse_date(&text))
                .transpose()
        };

        Ok(TransactionFilter::date_range(
            parse(query.start_date)?,
            parse(query.end_date)?,
        ))
    }
}

/// Render `transactions` as CSV, one row per transaction in the given order.
///
/// The header line is written as is, every field in the rows is quoted.
///
/// # Errors
/// Returns [Error::CsvError] if a row could not be written.
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(CSV_HEADER.as_bytes().to_vec());

    for transaction in transactions {
        let amount = transaction.amount.to_string();
        let date = format_date(transaction.date);

        writer
            .write_record([
                transaction.transaction_type.as_str(),
                amount.as_str(),
                date.as_str(),
                transaction.category.as_str(),
                transaction.notes.as_deref().unwrap_or_default(),
            ])
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}

/// Download the transactions in the requested date range as a CSV file, newest first.
pub async fn export_csv_endpoint(
    State(state): State<ExportState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, Error> {
    let filter = TransactionFilter::try_from(query)?;
    let today = local_today(&state.local_timezone)?;

    let transactions = {
        let connection = lock_connection(&state.db_connection)?;
        get_transactions(&filter, &connection)?
    };
    let csv = transactions_to_csv(&transactions)?;
    tracing::info!("Exported {} transactions as CSV", transactions.len());

    let content_disposition = format!(
        "attachment; filename=\"transactions-{}.csv\"",
        format_date(today)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (header::CONTENT_DISPOSITION, content_disposition),
        ],
        csv,
    )
        .into_response())
}


#[cfg(test)]
mod export_endpoint_tests {
    use axum::http::header;
    use axum_test::TestServer;
    use time::macros::date;

    use crate::{
        TransactionType, build_router,
        dates::format_date,
        endpoints,
        test_utils::get_test_app_state,
        timezone::local_today,
        transaction::{NewTransaction, create_transaction},
    };

    fn server_with_transactions() -> TestServer {
        let state = get_test_app_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for transaction in [
                NewTransaction::new(TransactionType::Income, 100.0, date!(2024 - 01 - 15), "Salary"),
                NewTransaction::new(TransactionType::Expense, 40.0, date!(2024 - 01 - 20), "Food")
                    .notes("Groceries"),
                NewTransaction::new(TransactionType::Expense, 60.0, date!(2024 - 02 - 01), "Rent"),
            ] {
                create_transaction(transaction, &connection).unwrap();
            }
        }

        TestServer::new(build_router(state)).unwrap()
    }

    #[tokio::test]
    async fn exports_all_transactions_newest_first() {
        let server = server_with_transactions();

        let response = server.get(endpoints::EXPORT_CSV).await;

        response.assert_status_ok();
        assert_eq!(
            response.header(header::CONTENT_TYPE),
            "text/csv; charset=utf-8"
        );
        let today = format_date(local_today("Etc/UTC").unwrap());
        assert_eq!(
            response.header(header::CONTENT_DISPOSITION),
            format!("attachment; filename=\"transactions-{today}.csv\"").as_str()
        );
        assert_eq!(
            response.text(),
            "Type,Amount,Date,Category,Notes\n\
             \"expense\",\"60\",\"2024-02-01\",\"Rent\",\"\"\n\
             \"expense\",\"40\",\"2024-01-20\",\"Food\",\"Groceries\"\n\
             \"income\",\"100\",\"2024-01-15\",\"Salary\",\"\"\n"
        );
    }

    #[tokio::test]
    async fn exports_date_range() {
        let server = server_with_transactions();

        let response = server
            .get(endpoints::EXPORT_CSV)
            .add_query_param("startDate", "2024-01-16")
            .add_query_param("endDate", "2024-01-31")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.text(),
            "Type,Amount,Date,Category,Notes\n\
             \"expense\",\"40\",\"2024-01-20\",\"Food\",\"Groceries\"\n"
        );
    }

    #[tokio::test]
    async fn invalid_date_is_bad_request() {
        let server = server_with_transactions();

        let response = server
            .get(endpoints::EXPORT_CSV)
            .add_query_param("startDate", "last tuesday")
            .await;

        response.assert_status_bad_request();
    }
}
