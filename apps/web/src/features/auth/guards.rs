//! Route guards driven by the `is_authenticated` signal. They only shape
//! navigation; the API enforces access on every request.

use crate::{features::auth::state::use_auth, routes::paths};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Sends anonymous visitors to the sign-in page.
#[component]
pub fn RequireAuth(children: Children) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if !auth.is_authenticated.get() {
            navigate(paths::SIGN_IN, Default::default());
        }
    });

    view! { {children()} }
}

/// Keeps signed-in users off the sign-in and sign-up pages, so a second
/// account can never be signed in over a live session.
#[component]
pub fn RedirectIfSignedIn(children: Children) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if auth.is_authenticated.get() {
            navigate(paths::FLIGHTS, Default::default());
        }
    });

    view! { {children()} }
}

/// Mounted once inside the router. Whenever the session ends, whether by
/// "Sign Out" or a 401 from any request, the user lands on the sign-in page
/// regardless of which route is open.
#[component]
pub fn SignOutRedirect() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move |was_signed_in: Option<bool>| {
        let signed_in = auth.is_authenticated.get();
        if was_signed_in == Some(true) && !signed_in {
            navigate(paths::SIGN_IN, Default::default());
        }
        signed_in
    });
}
