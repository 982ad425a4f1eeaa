use super::{route_label, status_class};
use crate::{
    components::{AppShell, Button, ButtonVariant, ErrorAlert, Spinner},
    features::{
        auth::{RequireAuth, state::use_auth},
        booking::client,
    },
    routes::paths,
};
use leptos::prelude::*;
use leptos_router::components::A;

/// Lists the user's bookings and refetches after a cancellation.
#[component]
pub fn MyBookingsPage() -> impl IntoView {
    let auth = use_auth();
    let bookings = LocalResource::new(move || {
        let api = auth.api();
        async move { client::list_bookings(&api).await }
    });

    let cancel_action = Action::new_local(move |id: &String| {
        let api = auth.api();
        let id = id.clone();
        async move { client::cancel_booking(&api, &id).await }
    });

    Effect::new(move |_| {
        if let Some(Ok(())) = cancel_action.value().get() {
            bookings.refetch();
        }
    });

    view! {
        <AppShell>
            <RequireAuth>
                <div class="space-y-6">
                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                        "My bookings"
                    </h1>
                    {move || {
                        cancel_action
                            .value()
                            .get()
                            .and_then(Result::err)
                            .map(|err| view! { <ErrorAlert error=err /> })
                    }}
                    <Suspense fallback=move || view! { <Spinner /> }>
                        {move || match bookings.get() {
                            Some(Ok(list)) if list.is_empty() => {
                                view! {
                                    <p class="text-sm text-gray-500 dark:text-gray-400">
                                        "No bookings yet. "
                                        <A href=paths::FLIGHTS {..} class="text-blue-600 hover:underline">
                                            "Find a flight"
                                        </A>
                                    </p>
                                }
                                .into_any()
                            }
                            Some(Ok(list)) => {
                                view! {
                                    <ul class="space-y-3">
                                        {list
                                            .into_iter()
                                            .map(|booking| {
                                                let id = booking.id.clone();
                                                let cancellable = booking.is_cancellable();
                                                view! {
                                                    <li class="rounded-lg border border-gray-200 bg-white p-4 dark:border-gray-700 dark:bg-gray-800">
                                                        <div class="flex flex-wrap items-center justify-between gap-4">
                                                            <div>
                                                                <A
                                                                    href=paths::booking_details(&booking.id)
                                                                    {..}
                                                                    class="font-semibold text-blue-600 hover:text-blue-800 dark:text-blue-400"
                                                                >
                                                                    {route_label(&booking)}
                                                                </A>
                                                                <div class="text-sm text-gray-500 dark:text-gray-400">
                                                                    {format!(
                                                                        "{} passenger(s), ${:.2}",
                                                                        booking.passengers.len(),
                                                                        booking.total_amount,
                                                                    )}
                                                                </div>
                                                                <div class=format!("text-sm font-medium {}", status_class(&booking.status))>
                                                                    {booking.status.as_str()}
                                                                </div>
                                                            </div>
                                                            <Show when=move || cancellable>
                                                                <Button
                                                                    variant=ButtonVariant::Danger
                                                                    disabled=cancel_action.pending()
                                                                    on_click=Callback::new({
                                                                        let id = id.clone();
                                                                        move |_| {
                                                                            cancel_action.dispatch(id.clone());
                                                                        }
                                                                    })
                                                                >
                                                                    "Cancel"
                                                                </Button>
                                                            </Show>
                                                        </div>
                                                    </li>
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
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
