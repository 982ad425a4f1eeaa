//! Route paths shared by links, redirects and the route table.

pub const HOME: &str = "/";
pub const SIGN_IN: &str = "/signin";
pub const SIGN_UP: &str = "/signup";
pub const FLIGHTS: &str = "/flights";
pub const MY_BOOKINGS: &str = "/my-bookings";

pub fn booking(flight_id: &str) -> String {
    format!("/booking/{flight_id}")
}

pub fn booking_details(id: &str) -> String {
    format!("/booking-details/{id}")
}
