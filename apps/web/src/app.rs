//! Root component. The auth context wraps the router so every route shares
//! one API client, and the sign-out redirect sits inside the router because
//! it needs navigation.

use crate::{
    features::auth::{SignOutRedirect, state::AuthProvider},
    routes::AppRoutes,
};
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <AuthProvider>
            <Router>
                <SignOutRedirect />
                <AppRoutes />
            </Router>
        </AuthProvider>
    }
}
