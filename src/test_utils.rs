#![allow(missing_docs)]

use axum::{body::Body, http::Response};
use rusqlite::Connection;
use serde_json::Value;

use crate::{AppState, db::initialize};

/// Open an in-memory database with all tables created.
pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");
    initialize(&connection).expect("Could not initialize database");
    connection
}

pub(crate) fn get_test_app_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");
    AppState::new(connection, "Etc/UTC").expect("Could not create app state")
}

pub(crate) async fn parse_json_body(response: Response<Body>) -> Value {
    let body = response.into_body();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not read response body");

    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}
