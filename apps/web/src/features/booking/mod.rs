//! Booking feature: the draft engine behind the booking form plus the bookings
//! API calls used by the list and detail pages. Submitting a booking needs a
//! session; the draft itself does not.

pub(crate) mod client;
pub(crate) mod draft;
pub(crate) mod types;
