//! Landing page.

use crate::{components::AppShell, features::auth::state::use_auth, routes::paths};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <AppShell>
            <div class="max-w-2xl mx-auto text-center space-y-6 py-12">
                <h1 class="text-4xl font-bold text-gray-900 dark:text-white">
                    "Book your next flight"
                </h1>
                <p class="text-gray-500 dark:text-gray-400">
                    "Search routes, pick seats for everyone travelling and manage your bookings."
                </p>
                <div class="flex justify-center gap-4">
                    <A
                        href=paths::FLIGHTS
                        {..}
                        class="px-5 py-2.5 text-sm font-medium text-white bg-blue-700 rounded-lg hover:bg-blue-800"
                    >
                        "Search flights"
                    </A>
                    <Show when=move || !auth.is_authenticated.get()>
                        <A
                            href=paths::SIGN_IN
                            {..}
                            class="px-5 py-2.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100"
                        >
                            "Sign in"
                        </A>
                        <A
                            href=paths::SIGN_UP
                            {..}
                            class="px-5 py-2.5 text-sm font-medium text-gray-900 bg-white border border-gray-200 rounded-lg hover:bg-gray-100"
                        >
                            "Create account"
                        </A>
                    </Show>
                </div>
            </div>
        </AppShell>
    }
}
