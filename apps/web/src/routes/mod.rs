mod booking;
mod bookings;
mod flights;
mod home;
mod not_found;
pub(crate) mod paths;
mod signin;
mod signup;
mod verify_email;

pub(crate) use booking::BookingPage;
pub(crate) use bookings::{BookingDetailsPage, MyBookingsPage};
pub(crate) use flights::FlightsPage;
pub(crate) use home::HomePage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use signin::SignInPage;
pub(crate) use signup::SignUpPage;
pub(crate) use verify_email::VerifyEmailPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=HomePage />
            <Route path=path!("/signin") view=SignInPage />
            <Route path=path!("/signup") view=SignUpPage />
            <Route path=path!("/verify-email/:token") view=VerifyEmailPage />
            <Route path=path!("/flights") view=FlightsPage />
            <Route path=path!("/booking/:flight_id") view=BookingPage />
            <Route path=path!("/my-bookings") view=MyBookingsPage />
            <Route path=path!("/booking-details/:id") view=BookingDetailsPage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
