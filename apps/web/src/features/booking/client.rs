//! Client helpers for the bookings endpoints. All of them need a session; a
//! 401 here signs the user out through the shared API client.

use crate::{
    app_lib::{
        AppError, ApiClient,
        api::{Transport, path_id},
    },
    features::booking::types::{Booking, BookingResponse, BookingsResponse, CreateBookingRequest},
};
use serde_json::Value;
use tracing::info;

pub async fn create_booking<T: Transport>(
    api: &ApiClient<T>,
    request: &CreateBookingRequest,
) -> Result<Booking, AppError> {
    let response: BookingResponse = api.post("/bookings", request).await?;
    info!(
        booking_id = %response.booking.id,
        passengers = request.passengers.len(),
        "booking created"
    );
    Ok(response.booking)
}

/// Lists the signed-in user's bookings.
pub async fn list_bookings<T: Transport>(api: &ApiClient<T>) -> Result<Vec<Booking>, AppError> {
    let response: BookingsResponse = api.get("/bookings").await?;
    Ok(response.bookings)
}

pub async fn get_booking<T: Transport>(api: &ApiClient<T>, id: &str) -> Result<Booking, AppError> {
    let id = path_id("Booking", id)?;
    let response: BookingResponse = api.get(&format!("/bookings/{id}")).await?;
    Ok(response.booking)
}

/// Cancels a booking. The response body is not needed; callers refetch.
pub async fn cancel_booking<T: Transport>(api: &ApiClient<T>, id: &str) -> Result<(), AppError> {
    let id = path_id("Booking", id)?;
    let _: Value = api.patch(&format!("/bookings/{id}")).await?;
    info!(booking_id = %id, "booking cancelled");
    Ok(())
}
