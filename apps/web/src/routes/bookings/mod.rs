//! Bookings routes: the signed-in user's list with cancel, and one booking's
//! details. Both sit behind the auth guard; a 401 from either sends the user
//! back to sign-in.

mod detail;
mod list;

pub(crate) use detail::BookingDetailsPage;
pub(crate) use list::MyBookingsPage;

use crate::features::booking::types::{BookedFlight, Booking, BookingStatus};

/// "KHI → ISB" for populated flights, the flight id otherwise.
fn route_label(booking: &Booking) -> String {
    match booking.flight.as_ref() {
        Some(BookedFlight::Details(flight)) => {
            format!("{} → {}", flight.origin, flight.destination)
        }
        Some(BookedFlight::Id(id)) => format!("Flight {id}"),
        None => "Flight unavailable".to_string(),
    }
}

fn status_class(status: &BookingStatus) -> &'static str {
    match status {
        BookingStatus::Confirmed => "text-emerald-700 dark:text-emerald-300",
        BookingStatus::Cancelled => "text-red-700 dark:text-red-300",
        BookingStatus::Pending | BookingStatus::Unknown => "text-gray-600 dark:text-gray-300",
    }
}
