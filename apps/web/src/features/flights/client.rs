//! Client helpers for flight endpoints. Flights are public, so these calls
//! work with or without a session.

use crate::{
    app_lib::{
        AppError, ApiClient,
        api::{Transport, path_id},
    },
    features::flights::types::{Flight, FlightResponse, FlightSearch, FlightsResponse},
};

/// Fetches one flight with its seat inventory.
pub async fn get_flight<T: Transport>(api: &ApiClient<T>, id: &str) -> Result<Flight, AppError> {
    let id = path_id("Flight", id)?;
    let response: FlightResponse = api.get(&format!("/flights/{id}")).await?;
    Ok(response.flight)
}

/// Searches flights; an empty search lists everything the API returns.
pub async fn search_flights<T: Transport>(
    api: &ApiClient<T>,
    search: &FlightSearch,
) -> Result<Vec<Flight>, AppError> {
    let query = search.query_string();
    let path = if query.is_empty() {
        "/flights/search".to_string()
    } else {
        format!("/flights/search?{query}")
    };
    let response: FlightsResponse = api.get(&path).await?;
    Ok(response.flights)
}
