//! In-progress booking for one flight: a roster of passengers, their seat
//! picks and the derived total.
//!
//! Two rules hold after every mutation:
//!
//! - no two passengers hold the same seat number;
//! - a held seat exists in the flight, matches the passenger's class and was
//!   available when the flight was fetched.
//!
//! The total is never set directly; it is recomputed from the seats held.

use crate::{
    app_lib::{AppError, ApiClient, api::Transport},
    features::{
        booking::{
            client::create_booking,
            types::{Booking, CreateBookingRequest, PassengerRecord},
        },
        flights::types::{Flight, Seat, SeatClass},
    },
};
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct PassengerDraft {
    pub name: String,
    pub age: Option<u32>,
    pub seat_class: SeatClass,
    pub seat_number: Option<String>,
}

impl Default for PassengerDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: None,
            seat_class: SeatClass::Economy,
            seat_number: None,
        }
    }
}

impl PassengerDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if !matches!(self.age, Some(age) if age > 0) {
            missing.push("age");
        }
        if self.seat_number.is_none() {
            missing.push("seat");
        }
        missing
    }
}

/// One edit to a passenger row.
#[derive(Clone, Debug, PartialEq)]
pub enum PassengerField {
    Name(String),
    Age(Option<u32>),
    SeatClass(SeatClass),
    SeatNumber(Option<String>),
}

/// Parses an age input; anything that is not a positive whole number is
/// treated as unset.
pub fn parse_age(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|age| *age > 0)
}

/// What a passenger's seat selector should offer.
#[derive(Clone, Debug, PartialEq)]
pub enum SeatOptions<'a> {
    /// The class has nothing left for this passenger; render a disabled
    /// placeholder instead of an empty list.
    NoneAvailable { class: SeatClass },
    Choices {
        selected: Option<&'a Seat>,
        choices: Vec<&'a Seat>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct BookingDraft {
    flight: Flight,
    passengers: Vec<PassengerDraft>,
    total_amount: f64,
}

impl BookingDraft {
    /// Starts a draft with one blank Economy passenger.
    pub fn new(flight: Flight) -> Self {
        Self {
            flight,
            passengers: vec![PassengerDraft::default()],
            total_amount: 0.0,
        }
    }

    pub fn flight(&self) -> &Flight {
        &self.flight
    }

    pub fn passengers(&self) -> &[PassengerDraft] {
        &self.passengers
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    /// Appends a blank passenger and returns its index.
    pub fn add_passenger(&mut self) -> usize {
        self.passengers.push(PassengerDraft::default());
        self.passengers.len() - 1
    }

    /// Removes a passenger. The first passenger always stays; returns `false`
    /// when nothing was removed.
    pub fn remove_passenger(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.passengers.len() {
            return false;
        }
        self.passengers.remove(index);
        self.compute_total();
        true
    }

    /// Applies one field edit. A class change clears the seat. A seat pick
    /// that breaks the draft's rules is rejected and leaves the draft as is.
    pub fn update_passenger(&mut self, index: usize, field: PassengerField) -> Result<(), AppError> {
        if index >= self.passengers.len() {
            return Err(AppError::Validation(format!(
                "Passenger {} does not exist.",
                index + 1
            )));
        }

        match field {
            PassengerField::Name(name) => self.passengers[index].name = name,
            PassengerField::Age(age) => self.passengers[index].age = age.filter(|age| *age > 0),
            PassengerField::SeatClass(class) => {
                let passenger = &mut self.passengers[index];
                passenger.seat_class = class;
                passenger.seat_number = None;
            }
            PassengerField::SeatNumber(None) => self.passengers[index].seat_number = None,
            PassengerField::SeatNumber(Some(number)) => {
                let number = number.trim();
                if number.is_empty() {
                    self.passengers[index].seat_number = None;
                } else {
                    self.check_seat(index, number)?;
                    self.passengers[index].seat_number = Some(number.to_string());
                }
            }
        }

        self.compute_total();
        Ok(())
    }

    /// Seats of `class` that are available and not held by any passenger.
    /// Recomputed on every call.
    pub fn available_seats_for(&self, class: SeatClass) -> impl Iterator<Item = &Seat> + '_ {
        self.flight.seats.iter().filter(move |seat| {
            seat.class == class && seat.is_available && !self.is_claimed(&seat.number, None)
        })
    }

    /// Selector options for one passenger: their current seat plus every seat
    /// of their class nobody else holds.
    pub fn seat_options(&self, index: usize) -> Option<SeatOptions<'_>> {
        let passenger = self.passengers.get(index)?;
        let class = passenger.seat_class;
        let choices: Vec<&Seat> = self
            .flight
            .seats
            .iter()
            .filter(|seat| {
                seat.class == class
                    && seat.is_available
                    && !self.is_claimed(&seat.number, Some(index))
            })
            .collect();

        if choices.is_empty() {
            return Some(SeatOptions::NoneAvailable { class });
        }

        let selected = passenger
            .seat_number
            .as_deref()
            .and_then(|number| choices.iter().copied().find(|seat| seat.number == number));
        Some(SeatOptions::Choices { selected, choices })
    }

    /// Recomputes the total from the seats currently held and returns it.
    pub fn compute_total(&mut self) -> f64 {
        self.total_amount = self
            .passengers
            .iter()
            .filter_map(|passenger| passenger.seat_number.as_deref())
            .filter_map(|number| self.flight.seat(number))
            .map(|seat| seat.price)
            .sum();
        self.total_amount
    }

    /// Checks every passenger and builds the request body.
    pub fn validate(&self) -> Result<CreateBookingRequest, AppError> {
        let mut passengers = Vec::with_capacity(self.passengers.len());
        for (index, passenger) in self.passengers.iter().enumerate() {
            let missing = passenger.missing_fields();
            let (Some(age), Some(seat_number), true) = (
                passenger.age,
                passenger.seat_number.clone(),
                missing.is_empty(),
            ) else {
                return Err(AppError::Validation(format!(
                    "Passenger {} is missing: {}.",
                    index + 1,
                    missing.join(", ")
                )));
            };
            passengers.push(PassengerRecord {
                name: passenger.name.trim().to_string(),
                age,
                seat_number,
                seat_class: passenger.seat_class,
            });
        }

        let total_amount = passengers
            .iter()
            .filter_map(|passenger| self.flight.seat(&passenger.seat_number))
            .map(|seat| seat.price)
            .sum();

        Ok(CreateBookingRequest {
            flight_id: self.flight.id.clone(),
            passengers,
            total_amount,
        })
    }

    /// Validates and submits. An invalid draft never reaches the network; the
    /// draft itself is left untouched either way.
    pub async fn submit<T: Transport>(&self, api: &ApiClient<T>) -> Result<Booking, AppError> {
        let request = self.validate()?;
        debug!(
            flight_id = %request.flight_id,
            passengers = request.passengers.len(),
            "submitting booking"
        );
        create_booking(api, &request).await
    }

    fn check_seat(&self, index: usize, number: &str) -> Result<(), AppError> {
        let class = self.passengers[index].seat_class;
        let Some(seat) = self.flight.seat(number) else {
            return Err(AppError::Validation(format!(
                "Seat {number} is not on this flight."
            )));
        };
        if seat.class != class {
            return Err(AppError::Validation(format!(
                "Seat {number} is not in {}.",
                class.label()
            )));
        }
        if !seat.is_available {
            return Err(AppError::Validation(format!(
                "Seat {number} is no longer available."
            )));
        }
        if self.is_claimed(number, Some(index)) {
            return Err(AppError::Validation(format!(
                "Seat {number} is already taken by another passenger."
            )));
        }
        Ok(())
    }

    fn is_claimed(&self, number: &str, except: Option<usize>) -> bool {
        self.passengers.iter().enumerate().any(|(index, passenger)| {
            Some(index) != except && passenger.seat_number.as_deref() == Some(number)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{BookingDraft, PassengerField, SeatOptions, parse_age};
    use crate::{
        app_lib::{
            AppError, ErrorKind, Session,
            api::{Method, MockTransport, mock_client},
            session::MemoryTokenStore,
        },
        features::flights::types::{Flight, Seat, SeatClass},
    };
    use serde_json::json;

    fn seat(number: &str, class: SeatClass, price: f64, is_available: bool) -> Seat {
        Seat {
            number: number.to_string(),
            class,
            price,
            is_available,
        }
    }

    fn flight() -> Flight {
        Flight {
            id: "f1".to_string(),
            airline: "PIA".to_string(),
            flight_number: "PK-301".to_string(),
            origin: "KHI".to_string(),
            destination: "ISB".to_string(),
            departure_date: "2026-11-02T08:00:00Z".to_string(),
            arrival_date: "2026-11-02T10:00:00Z".to_string(),
            duration: None,
            seats: vec![
                seat("A1", SeatClass::Economy, 100.0, true),
                seat("A2", SeatClass::Economy, 120.0, true),
                seat("B1", SeatClass::Business, 300.0, false),
            ],
        }
    }

    fn numbers<'a>(seats: impl Iterator<Item = &'a Seat>) -> Vec<&'a str> {
        seats.map(|seat| seat.number.as_str()).collect()
    }

    fn pick(draft: &mut BookingDraft, index: usize, number: &str) -> Result<(), AppError> {
        draft.update_passenger(index, PassengerField::SeatNumber(Some(number.to_string())))
    }

    fn fill(draft: &mut BookingDraft, index: usize, name: &str, age: u32) {
        draft
            .update_passenger(index, PassengerField::Name(name.to_string()))
            .expect("name");
        draft
            .update_passenger(index, PassengerField::Age(Some(age)))
            .expect("age");
    }

    #[test]
    fn seat_selection_drives_availability_and_total() {
        let mut draft = BookingDraft::new(flight());
        assert_eq!(
            numbers(draft.available_seats_for(SeatClass::Economy)),
            vec!["A1", "A2"]
        );

        pick(&mut draft, 0, "A2").expect("A2");
        assert_eq!(draft.total_amount(), 120.0);

        let second = draft.add_passenger();
        assert_eq!(second, 1);
        assert_eq!(draft.passengers()[1].seat_class, SeatClass::Economy);
        assert_eq!(
            numbers(draft.available_seats_for(SeatClass::Economy)),
            vec!["A1"]
        );

        pick(&mut draft, 1, "A1").expect("A1");
        assert_eq!(draft.total_amount(), 220.0);
        assert_eq!(draft.available_seats_for(SeatClass::Economy).count(), 0);
    }

    #[test]
    fn unavailable_seats_are_never_offered_or_accepted() {
        let mut draft = BookingDraft::new(flight());
        assert_eq!(draft.available_seats_for(SeatClass::Business).count(), 0);

        draft
            .update_passenger(0, PassengerField::SeatClass(SeatClass::Business))
            .expect("class");
        let err = pick(&mut draft, 0, "B1").expect_err("unavailable");

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(draft.passengers()[0].seat_number, None);
        assert_eq!(
            draft.seat_options(0),
            Some(SeatOptions::NoneAvailable {
                class: SeatClass::Business
            })
        );
    }

    #[test]
    fn duplicate_and_wrong_class_picks_are_rejected() {
        let mut draft = BookingDraft::new(flight());
        pick(&mut draft, 0, "A1").expect("A1");
        draft.add_passenger();

        assert!(pick(&mut draft, 1, "A1").is_err());
        assert!(pick(&mut draft, 1, "Z9").is_err());
        draft
            .update_passenger(1, PassengerField::SeatClass(SeatClass::First))
            .expect("class");
        assert!(pick(&mut draft, 1, "A2").is_err());

        assert_eq!(draft.passengers()[1].seat_number, None);
        assert_eq!(draft.total_amount(), 100.0);
        // Re-selecting your own seat is fine.
        pick(&mut draft, 0, "A1").expect("same seat");
    }

    #[test]
    fn class_change_clears_seat_and_total() {
        let mut draft = BookingDraft::new(flight());
        pick(&mut draft, 0, "A2").expect("A2");

        for _ in 0..2 {
            draft
                .update_passenger(0, PassengerField::SeatClass(SeatClass::Economy))
                .expect("class");
            assert_eq!(draft.passengers()[0].seat_number, None);
            assert_eq!(draft.total_amount(), 0.0);
        }
    }

    #[test]
    fn first_passenger_cannot_be_removed() {
        let mut draft = BookingDraft::new(flight());

        assert!(!draft.remove_passenger(0));
        assert_eq!(draft.passengers().len(), 1);
        assert!(!draft.remove_passenger(5));
    }

    #[test]
    fn removing_a_passenger_frees_their_seat() {
        let mut draft = BookingDraft::new(flight());
        pick(&mut draft, 0, "A1").expect("A1");
        draft.add_passenger();
        pick(&mut draft, 1, "A2").expect("A2");
        assert_eq!(draft.total_amount(), 220.0);

        assert!(draft.remove_passenger(1));

        assert_eq!(draft.total_amount(), 100.0);
        assert_eq!(
            numbers(draft.available_seats_for(SeatClass::Economy)),
            vec!["A2"]
        );
    }

    #[test]
    fn seat_options_keep_own_selection() {
        let mut draft = BookingDraft::new(flight());
        pick(&mut draft, 0, "A2").expect("A2");
        draft.add_passenger();

        let Some(SeatOptions::Choices { selected, choices }) = draft.seat_options(0) else {
            panic!("expected choices");
        };
        assert_eq!(selected.map(|seat| seat.number.as_str()), Some("A2"));
        assert_eq!(numbers(choices.into_iter()), vec!["A1", "A2"]);

        let Some(SeatOptions::Choices { selected, choices }) = draft.seat_options(1) else {
            panic!("expected choices");
        };
        assert_eq!(selected, None);
        assert_eq!(numbers(choices.into_iter()), vec!["A1"]);
        assert_eq!(draft.seat_options(9), None);
    }

    #[test]
    fn update_out_of_range_is_a_validation_error() {
        let mut draft = BookingDraft::new(flight());
        let err = draft
            .update_passenger(3, PassengerField::Name("x".to_string()))
            .expect_err("no passenger");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn parse_age_requires_positive_integer() {
        assert_eq!(parse_age(" 34 "), Some(34));
        assert_eq!(parse_age("0"), None);
        assert_eq!(parse_age("-3"), None);
        assert_eq!(parse_age("abc"), None);
    }

    #[test]
    fn validate_names_missing_fields() {
        let mut draft = BookingDraft::new(flight());
        draft
            .update_passenger(0, PassengerField::Age(Some(30)))
            .expect("age");

        let err = draft.validate().expect_err("incomplete");

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Passenger 1 is missing: name, seat.");
    }

    #[tokio::test]
    async fn submit_with_missing_name_sends_nothing() {
        let mut draft = BookingDraft::new(flight());
        pick(&mut draft, 0, "A1").expect("A1");
        draft
            .update_passenger(0, PassengerField::Age(Some(30)))
            .expect("age");
        let (api, handle) = mock_client(
            MockTransport::default(),
            Session::new(MemoryTokenStore::with_token("t")),
        );

        let err = draft.submit(&api).await.expect_err("missing name");

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(handle.requests().is_empty());
    }

    #[tokio::test]
    async fn submit_sends_booking_and_keeps_draft_on_failure() {
        let mut draft = BookingDraft::new(flight());
        fill(&mut draft, 0, " Ayesha ", 29);
        pick(&mut draft, 0, "A2").expect("A2");
        let transport = MockTransport::default()
            .reply(Err(AppError::Network("offline".to_string())))
            .reply(Ok(json!({
                "status": "success",
                "data": {"booking": {
                    "_id": "b1",
                    "flight": "f1",
                    "passengers": [{"name": "Ayesha", "age": 29, "seatNumber": "A2", "seatClass": "Economy"}],
                    "totalAmount": 120,
                    "status": "Confirmed"
                }}
            })));
        let (api, handle) = mock_client(transport, Session::new(MemoryTokenStore::with_token("t")));
        let before = draft.clone();

        let err = draft.submit(&api).await.expect_err("offline");
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(draft, before);

        let booking = draft.submit(&api).await.expect("retry");
        assert_eq!(booking.id, "b1");

        let requests = handle.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(requests[1].path, "/bookings");
        assert_eq!(
            requests[1].body,
            Some(json!({
                "flightId": "f1",
                "passengers": [{"name": "Ayesha", "age": 29, "seatNumber": "A2", "seatClass": "Economy"}],
                "totalAmount": 120.0
            }))
        );
    }
}
