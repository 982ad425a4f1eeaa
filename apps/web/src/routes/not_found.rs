//! 404 page for unknown routes.

use crate::{components::AppShell, routes::paths};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <AppShell>
            <div class="flex flex-col items-center justify-center min-h-[50vh] text-center px-4">
                <h1 class="text-9xl font-black text-gray-100 dark:text-gray-800 select-none">
                    "404"
                </h1>
                <p class="mt-4 text-gray-500 dark:text-gray-400 max-w-sm mx-auto">
                    "This page does not exist. The flight or booking may have been removed."
                </p>
                <div class="mt-6 flex flex-col sm:flex-row items-center justify-center gap-4">
                    <A
                        href=paths::FLIGHTS
                        {..}
                        class="inline-flex items-center px-5 py-2.5 text-sm font-medium text-white bg-blue-700 rounded-lg hover:bg-blue-800 focus:ring-4 focus:outline-none focus:ring-blue-300 dark:bg-blue-600 dark:hover:bg-blue-700 dark:focus:ring-blue-800 transition-all"
                    >
                        "Search flights"
                    </A>
                    <button
                        on:click=move |_| {
                            if let Some(history) = web_sys::window().and_then(|window| window.history().ok()) {
                                let _ = history.back();
                            }
                        }
                        class="inline-flex items-center px-5 py-2.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100 hover:text-blue-700 dark:bg-gray-800 dark:text-gray-400 dark:border-gray-600 dark:hover:text-white dark:hover:bg-gray-700 transition-all"
                    >
                        "Go back"
                    </button>
                </div>
            </div>
        </AppShell>
    }
}
