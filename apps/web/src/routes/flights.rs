//! Flight search route. Public: anyone can search, but booking a seat sends
//! anonymous visitors through sign-in first.

use crate::{
    components::{AppShell, Button, ErrorAlert, Spinner},
    features::{
        auth::state::use_auth,
        flights::{
            client,
            types::{Flight, FlightSearch, SeatClass, parse_price},
        },
    },
    routes::paths,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white";

#[component]
pub fn FlightsPage() -> impl IntoView {
    let auth = use_auth();
    let (origin, set_origin) = signal(String::new());
    let (destination, set_destination) = signal(String::new());
    let (departure_date, set_departure_date) = signal(String::new());
    let (airline, set_airline) = signal(String::new());
    let (seat_class, set_seat_class) = signal::<Option<SeatClass>>(None);
    let (min_price, set_min_price) = signal(String::new());
    let (max_price, set_max_price) = signal(String::new());
    let (search, set_search) = signal(FlightSearch::default());

    let flights = LocalResource::new(move || {
        let search = search.get();
        let api = auth.api();
        async move { client::search_flights(&api, &search).await }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_search.set(FlightSearch {
            origin: origin.get_untracked(),
            destination: destination.get_untracked(),
            departure_date: departure_date.get_untracked(),
            airline: airline.get_untracked(),
            seat_class: seat_class.get_untracked(),
            min_price: parse_price(&min_price.get_untracked()),
            max_price: parse_price(&max_price.get_untracked()),
        });
    };

    view! {
        <AppShell>
            <div class="space-y-6">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Find a flight"</h1>
                <form class="grid gap-4 md:grid-cols-3" on:submit=on_submit>
                    <input
                        class=INPUT_CLASS
                        placeholder="From"
                        on:input=move |event| set_origin.set(event_target_value(&event))
                    />
                    <input
                        class=INPUT_CLASS
                        placeholder="To"
                        on:input=move |event| set_destination.set(event_target_value(&event))
                    />
                    <input
                        class=INPUT_CLASS
                        type="date"
                        on:input=move |event| set_departure_date.set(event_target_value(&event))
                    />
                    <input
                        class=INPUT_CLASS
                        placeholder="Airline"
                        on:input=move |event| set_airline.set(event_target_value(&event))
                    />
                    <select
                        class=INPUT_CLASS
                        on:change=move |event| {
                            set_seat_class.set(SeatClass::from_str(&event_target_value(&event)));
                        }
                    >
                        <option value="">"Any class"</option>
                        {SeatClass::ALL
                            .into_iter()
                            .map(|class| view! { <option value=class.as_str()>{class.label()}</option> })
                            .collect_view()}
                    </select>
                    <input
                        class=INPUT_CLASS
                        type="number"
                        min="0"
                        placeholder="Min price"
                        on:input=move |event| set_min_price.set(event_target_value(&event))
                    />
                    <input
                        class=INPUT_CLASS
                        type="number"
                        min="0"
                        placeholder="Max price"
                        on:input=move |event| set_max_price.set(event_target_value(&event))
                    />
                    <div>
                        <Button button_type="submit">"Search"</Button>
                    </div>
                </form>

                <Suspense fallback=move || view! { <Spinner /> }>
                    {move || match flights.get() {
                        Some(Ok(list)) if list.is_empty() => {
                            view! {
                                <p class="text-sm text-gray-500 dark:text-gray-400">
                                    "No flights match your search."
                                </p>
                            }
                            .into_any()
                        }
                        Some(Ok(list)) => {
                            view! {
                                <ul class="space-y-3">
                                    {list.into_iter().map(|flight| view! { <FlightRow flight /> }).collect_view()}
                                </ul>
                            }
                            .into_any()
                        }
                        Some(Err(err)) => {
                            view! { <ErrorAlert error=err /> }.into_any()
                        }
                        None => view! { <Spinner /> }.into_any(),
                    }}
                </Suspense>
            </div>
        </AppShell>
    }
}

#[component]
fn FlightRow(flight: Flight) -> impl IntoView {
    let fare = flight
        .lowest_fare()
        .map_or_else(|| "Sold out".to_string(), |price| format!("from ${price:.2}"));
    let duration = flight.duration.clone().unwrap_or_default();

    view! {
        <li class="rounded-lg border border-gray-200 bg-white p-4 dark:border-gray-700 dark:bg-gray-800">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <div>
                    <div class="font-semibold text-gray-900 dark:text-white">
                        {flight.airline.clone()} " " {flight.flight_number.clone()}
                    </div>
                    <div class="text-sm text-gray-500 dark:text-gray-400">
                        {flight.origin.clone()} " → " {flight.destination.clone()}
                    </div>
                    <div class="text-xs text-gray-500 dark:text-gray-400">
                        {flight.departure_date.clone()} " " {duration}
                    </div>
                </div>
                <div class="text-right space-y-2">
                    <div class="text-sm font-medium text-gray-900 dark:text-white">{fare}</div>
                    <A
                        href=paths::booking(&flight.id)
                        {..}
                        class="inline-flex items-center px-4 py-2 text-sm font-medium text-white bg-blue-700 rounded-lg hover:bg-blue-800"
                    >
                        "Book"
                    </A>
                </div>
            </div>
        </li>
    }
}
