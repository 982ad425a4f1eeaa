//! Flight inventory types and search parameters. Field names follow the API's
//! camelCase JSON; record ids arrive as `id` or `_id`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use url::form_urlencoded;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatClass {
    Economy,
    Business,
    First,
}

impl SeatClass {
    pub const ALL: [SeatClass; 3] = [SeatClass::Economy, SeatClass::Business, SeatClass::First];

    pub fn as_str(self) -> &'static str {
        match self {
            SeatClass::Economy => "Economy",
            SeatClass::Business => "Business",
            SeatClass::First => "First",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeatClass::First => "First Class",
            other => other.as_str(),
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim() {
            "Economy" => Some(SeatClass::Economy),
            "Business" => Some(SeatClass::Business),
            "First" => Some(SeatClass::First),
            _ => None,
        }
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One seat in a flight's inventory. Availability is a snapshot taken when
/// the flight was fetched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub number: String,
    pub class: SeatClass,
    pub price: f64,
    pub is_available: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(alias = "_id")]
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub arrival_date: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub duration: Option<String>,
    #[serde(default)]
    pub seats: Vec<Seat>,
}

impl Flight {
    pub fn seat(&self, number: &str) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.number == number)
    }

    /// Cheapest available seat, for listings.
    pub fn lowest_fare(&self) -> Option<f64> {
        self.seats
            .iter()
            .filter(|seat| seat.is_available)
            .map(|seat| seat.price)
            .reduce(f64::min)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct FlightResponse {
    pub flight: Flight,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FlightsResponse {
    #[serde(default)]
    pub flights: Vec<Flight>,
}

/// Search filters for `/flights/search`. Blank fields are left out of the
/// query string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlightSearch {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub airline: String,
    pub seat_class: Option<SeatClass>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl FlightSearch {
    pub fn query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        let text = [
            ("origin", &self.origin),
            ("destination", &self.destination),
            ("departureDate", &self.departure_date),
            ("airline", &self.airline),
        ];
        for (key, value) in text {
            let value = value.trim();
            if !value.is_empty() {
                query.append_pair(key, value);
            }
        }
        if let Some(class) = self.seat_class {
            query.append_pair("class", class.as_str());
        }
        for (key, value) in [("minPrice", self.min_price), ("maxPrice", self.max_price)] {
            if let Some(value) = value {
                query.append_pair(key, &value.to_string());
            }
        }
        query.finish()
    }
}

/// Reads a price filter from form input. Blank, unparsable and negative
/// values leave the filter off.
pub fn parse_price(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|price| *price >= 0.0)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}
