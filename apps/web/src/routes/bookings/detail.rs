use super::{route_label, status_class};
use crate::{
    app_lib::AppError,
    components::{AppShell, ErrorAlert, Spinner},
    features::{
        auth::{RequireAuth, state::use_auth},
        booking::client,
    },
};
use leptos::prelude::*;
use leptos_router::{hooks::use_params, params::Params};

#[derive(Params, PartialEq, Clone)]
struct BookingDetailParams {
    id: Option<String>,
}

#[component]
pub fn BookingDetailsPage() -> impl IntoView {
    let auth = use_auth();
    let params = use_params::<BookingDetailParams>();
    let booking = LocalResource::new(move || {
        let id = params
            .get()
            .ok()
            .and_then(|params| params.id)
            .unwrap_or_default();
        let api = auth.api();
        async move {
            if id.trim().is_empty() {
                return Err(AppError::Validation("Booking id is required.".to_string()));
            }
            client::get_booking(&api, &id).await
        }
    });

    view! {
        <AppShell>
            <RequireAuth>
                <div class="block rounded-lg border border-neutral-200 bg-white p-6 dark:border-neutral-300 dark:bg-neutral-600 space-y-4">
                    <h1 class="text-lg font-semibold text-gray-900 dark:text-white">
                        "Booking details"
                    </h1>
                    <Suspense fallback=move || view! { <Spinner /> }>
                        {move || match booking.get() {
                            Some(Ok(detail)) => {
                                let flight = detail
                                    .flight
                                    .as_ref()
                                    .and_then(|flight| flight.details())
                                    .map(|flight| {
                                        format!(
                                            "{} {}, departs {}",
                                            flight.airline, flight.flight_number, flight.departure_date
                                        )
                                    });
                                view! {
                                    <div class="space-y-4">
                                        <div class="text-gray-900 dark:text-white font-medium">
                                            {route_label(&detail)}
                                        </div>
                                        {flight.map(|line| view! {
                                            <div class="text-sm text-gray-500 dark:text-gray-200">{line}</div>
                                        })}
                                        <div class=format!("text-sm font-medium {}", status_class(&detail.status))>
                                            {detail.status.as_str()}
                                        </div>
                                        <table class="min-w-full text-sm">
                                            <thead>
                                                <tr class="text-left text-gray-500 dark:text-gray-300">
                                                    <th class="py-2">"Name"</th>
                                                    <th class="py-2">"Age"</th>
                                                    <th class="py-2">"Seat"</th>
                                                    <th class="py-2">"Class"</th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                {detail
                                                    .passengers
                                                    .iter()
                                                    .map(|passenger| view! {
                                                        <tr class="text-gray-900 dark:text-white">
                                                            <td class="py-1">{passenger.name.clone()}</td>
                                                            <td class="py-1">{passenger.age}</td>
                                                            <td class="py-1">{passenger.seat_number.clone()}</td>
                                                            <td class="py-1">{passenger.seat_class.label()}</td>
                                                        </tr>
                                                    })
                                                    .collect_view()}
                                            </tbody>
                                        </table>
                                        <div class="text-right font-semibold text-gray-900 dark:text-white">
                                            {format!("Total ${:.2}", detail.total_amount)}
                                        </div>
                                    </div>
                                }
                                .into_any()
                            }
                            Some(Err(err)) => view! { <ErrorAlert error=err /> }.into_any(),
                            None => view! { <Spinner /> }.into_any(),
                        }}
                    </Suspense>
                </div>
            </RequireAuth>
        </AppShell>
    }
}
