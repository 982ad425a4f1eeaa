//! Domain features (auth, flights, bookings) and their shared logic. Routes
//! import these modules so view code stays focused on rendering while request
//! handling and state rules live with the feature.

pub(crate) mod auth;
pub(crate) mod booking;
pub(crate) mod flights;
