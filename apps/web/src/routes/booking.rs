//! Booking form route for one flight. Loads the flight once, then every edit
//! goes through the booking draft so seat rules and the total stay consistent.

use crate::{
    app_lib::AppError,
    components::{AppShell, Button, ButtonVariant, ErrorAlert, Spinner},
    features::{
        auth::{RequireAuth, state::use_auth},
        booking::draft::{BookingDraft, PassengerField, SeatOptions, parse_age},
        flights::{
            client,
            types::{Flight, SeatClass},
        },
    },
    routes::paths,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::{hooks::use_navigate, hooks::use_params, params::Params};

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white";

#[derive(Params, PartialEq, Clone)]
struct BookingParams {
    flight_id: Option<String>,
}

#[component]
pub fn BookingPage() -> impl IntoView {
    let auth = use_auth();
    let params = use_params::<BookingParams>();
    let flight = LocalResource::new(move || {
        let id = params
            .get()
            .ok()
            .and_then(|params| params.flight_id)
            .unwrap_or_default();
        let api = auth.api();
        async move { client::get_flight(&api, &id).await }
    });

    view! {
        <AppShell>
            <RequireAuth>
                <Suspense fallback=move || view! { <Spinner /> }>
                    {move || match flight.get() {
                        Some(Ok(flight)) => view! { <BookingForm flight /> }.into_any(),
                        Some(Err(err)) => {
                            view! { <ErrorAlert error=err /> }
                                .into_any()
                        }
                        None => view! { <Spinner /> }.into_any(),
                    }}
                </Suspense>
            </RequireAuth>
        </AppShell>
    }
}

#[component]
fn BookingForm(flight: Flight) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let draft = RwSignal::new(BookingDraft::new(flight));
    let heading = draft.with_untracked(|draft| {
        let flight = draft.flight();
        format!(
            "{} {}: {} → {}",
            flight.airline, flight.flight_number, flight.origin, flight.destination
        )
    });
    let (error, set_error) = signal::<Option<AppError>>(None);

    let submit_action = Action::new_local(move |_: &()| {
        let draft = draft.get_untracked();
        let api = auth.api();
        async move { draft.submit(&api).await }
    });

    Effect::new(move |_| {
        if let Some(result) = submit_action.value().get() {
            match result {
                Ok(_) => navigate(paths::MY_BOOKINGS, Default::default()),
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        submit_action.dispatch(());
    };

    let passenger_count = move || draft.with(|draft| draft.passengers().len());

    view! {
        <form class="space-y-6" on:submit=on_submit>
            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">{heading}</h1>
            <For
                each=move || 0..passenger_count()
                key=|index| *index
                children=move |index| view! { <PassengerRow index draft set_error /> }
            />
            <div class="flex flex-wrap items-center justify-between gap-4">
                <Button on_click=Callback::new(move |_| {
                    draft.update(|draft| {
                        draft.add_passenger();
                    });
                })>
                    "Add passenger"
                </Button>
                <div class="text-lg font-semibold text-gray-900 dark:text-white">
                    "Total: $"
                    {move || format!("{:.2}", draft.with(BookingDraft::total_amount))}
                </div>
            </div>
            <Button button_type="submit" disabled=submit_action.pending()>
                "Confirm booking"
            </Button>
            {move || submit_action.pending().get().then_some(view! { <Spinner /> })}
            {move || {
                error
                    .get()
                    .map(|err| view! { <ErrorAlert error=err /> })
            }}
        </form>
    }
}

/// Owned snapshot of a passenger's seat selector.
enum SeatPicker {
    NoneAvailable(SeatClass),
    Choices {
        selected: Option<String>,
        choices: Vec<(String, f64)>,
    },
}

fn seat_picker(draft: &BookingDraft, index: usize) -> SeatPicker {
    match draft.seat_options(index) {
        Some(SeatOptions::NoneAvailable { class }) => SeatPicker::NoneAvailable(class),
        Some(SeatOptions::Choices { selected, choices }) => SeatPicker::Choices {
            selected: selected.map(|seat| seat.number.clone()),
            choices: choices
                .into_iter()
                .map(|seat| (seat.number.clone(), seat.price))
                .collect(),
        },
        None => SeatPicker::Choices {
            selected: None,
            choices: Vec::new(),
        },
    }
}

#[component]
fn PassengerRow(
    index: usize,
    draft: RwSignal<BookingDraft>,
    set_error: WriteSignal<Option<AppError>>,
) -> impl IntoView {
    let apply = move |field: PassengerField| {
        if let Some(Err(err)) = draft.try_update(|draft| draft.update_passenger(index, field)) {
            set_error.set(Some(err));
        }
    };
    let passenger = move || draft.with(|draft| draft.passengers().get(index).cloned());
    let name = move || passenger().map(|p| p.name).unwrap_or_default();
    let age = move || {
        passenger()
            .and_then(|p| p.age)
            .map(|age| age.to_string())
            .unwrap_or_default()
    };
    let class = move || passenger().map_or(SeatClass::Economy, |p| p.seat_class);

    view! {
        <fieldset class="rounded-lg border border-gray-200 p-4 dark:border-gray-700 space-y-3">
            <legend class="px-2 text-sm font-medium text-gray-700 dark:text-gray-200">
                {format!("Passenger {}", index + 1)}
            </legend>
            <div class="grid gap-3 md:grid-cols-4">
                <input
                    class=INPUT_CLASS
                    placeholder="Full name"
                    prop:value=name
                    on:input=move |event| apply(PassengerField::Name(event_target_value(&event)))
                />
                <input
                    class=INPUT_CLASS
                    type="number"
                    min="1"
                    placeholder="Age"
                    prop:value=age
                    on:input=move |event| apply(PassengerField::Age(parse_age(&event_target_value(&event))))
                />
                <select
                    class=INPUT_CLASS
                    prop:value=move || class().as_str()
                    on:change=move |event| {
                        if let Some(class) = SeatClass::from_str(&event_target_value(&event)) {
                            apply(PassengerField::SeatClass(class));
                        }
                    }
                >
                    {SeatClass::ALL
                        .into_iter()
                        .map(|class| view! { <option value=class.as_str()>{class.label()}</option> })
                        .collect_view()}
                </select>
                {move || match draft.with(|draft| seat_picker(draft, index)) {
                    SeatPicker::NoneAvailable(class) => {
                        view! {
                            <select class=INPUT_CLASS disabled>
                                <option>{format!("No seats available for {} class", class.as_str())}</option>
                            </select>
                        }
                        .into_any()
                    }
                    SeatPicker::Choices { selected, choices } => {
                        let current = selected.clone().unwrap_or_default();
                        view! {
                            <select
                                class=INPUT_CLASS
                                prop:value=current
                                on:change=move |event| {
                                    let value = event_target_value(&event);
                                    apply(PassengerField::SeatNumber(
                                        (!value.is_empty()).then_some(value),
                                    ));
                                }
                            >
                                <option value="">"Select a seat"</option>
                                {choices
                                    .into_iter()
                                    .map(|(number, price)| {
                                        let is_selected = selected.as_deref() == Some(number.as_str());
                                        view! {
                                            <option value=number.clone() selected=is_selected>
                                                {format!("{number} (${price:.2})")}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        }
                        .into_any()
                    }
                }}
            </div>
            <Show when=move || index != 0>
                <Button
                    variant=ButtonVariant::Danger
                    on_click=Callback::new(move |_| {
                        draft.update(|draft| {
                            draft.remove_passenger(index);
                        });
                    })
                >
                    "Remove"
                </Button>
            </Show>
        </fieldset>
    }
}
