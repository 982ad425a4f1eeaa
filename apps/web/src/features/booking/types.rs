//! Booking wire types. Passenger records are what the bookings API stores, so
//! the shape sent on create is the shape read back by list and detail calls.

use crate::features::flights::types::{Flight, SeatClass};
use serde::{Deserialize, Serialize};

/// A validated passenger as sent to and returned by the bookings API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerRecord {
    pub name: String,
    pub age: u32,
    pub seat_number: String,
    pub seat_class: SeatClass,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub flight_id: String,
    pub passengers: Vec<PassengerRecord>,
    pub total_amount: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Pending,
    Unknown,
}

impl From<String> for BookingStatus {
    fn from(value: String) -> Self {
        match value.trim() {
            "Confirmed" => BookingStatus::Confirmed,
            "Cancelled" => BookingStatus::Cancelled,
            "Pending" => BookingStatus::Pending,
            _ => BookingStatus::Unknown,
        }
    }
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Pending => "Pending",
            BookingStatus::Unknown => "Unknown",
        }
    }
}

/// The flight a booking refers to: populated on list/detail reads, a bare id
/// right after creation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BookedFlight {
    Details(Box<Flight>),
    Id(String),
}

impl BookedFlight {
    pub fn id(&self) -> &str {
        match self {
            BookedFlight::Details(flight) => &flight.id,
            BookedFlight::Id(id) => id,
        }
    }

    pub fn details(&self) -> Option<&Flight> {
        match self {
            BookedFlight::Details(flight) => Some(flight.as_ref()),
            BookedFlight::Id(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: String,
    pub flight: Option<BookedFlight>,
    #[serde(default)]
    pub passengers: Vec<PassengerRecord>,
    pub total_amount: f64,
    #[serde(default = "unknown_status")]
    pub status: BookingStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Booking {
    pub fn is_cancellable(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }
}

fn unknown_status() -> BookingStatus {
    BookingStatus::Unknown
}

#[derive(Clone, Debug, Deserialize)]
pub struct BookingResponse {
    pub booking: Booking,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BookingsResponse {
    #[serde(default)]
    pub bookings: Vec<Booking>,
}
