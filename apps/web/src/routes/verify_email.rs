use crate::{
    components::{Alert, AlertKind, AppShell, Spinner},
    features::auth::state::use_auth,
    routes::paths,
};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_navigate, hooks::use_params, params::Params};

/// Pause before moving on to sign-in after a successful verification.
const REDIRECT_DELAY_MS: u32 = 2_000;

#[derive(Params, PartialEq, Clone)]
struct VerifyEmailParams {
    token: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
enum VerifyStatus {
    Pending,
    MissingToken,
    Success,
    Error(String),
}

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let params = use_params::<VerifyEmailParams>();
    let (status, set_status) = signal(VerifyStatus::Pending);

    let verify_action = Action::new_local(move |token: &String| {
        let manager = auth.manager();
        let token = token.clone();
        async move { manager.verify_email(&token).await }
    });

    Effect::new(move |_| {
        if let Some(result) = verify_action.value().get() {
            match result {
                Ok(()) => {
                    set_status.set(VerifyStatus::Success);
                    let navigate = navigate.clone();
                    Timeout::new(REDIRECT_DELAY_MS, move || {
                        navigate(paths::SIGN_IN, Default::default());
                    })
                    .forget();
                }
                Err(err) => set_status.set(VerifyStatus::Error(err.to_string())),
            }
        }
    });

    // Links are single-use, so the token is submitted once per page load.
    Effect::new(move |_| {
        let token = params
            .get_untracked()
            .ok()
            .and_then(|params| params.token)
            .filter(|token| !token.trim().is_empty());
        match token {
            Some(token) => {
                verify_action.dispatch(token);
            }
            None => set_status.set(VerifyStatus::MissingToken),
        }
    });

    view! {
        <AppShell>
            <div class="max-w-lg mx-auto space-y-4">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                    "Verify your email"
                </h1>
                {move || match status.get() {
                    VerifyStatus::Pending => view! { <Spinner label="Verifying your email" /> }.into_any(),
                    VerifyStatus::Success => {
                        view! {
                            <Alert
                                kind=AlertKind::Success
                                message="Email verified. Taking you to sign in..."
                            />
                        }
                            .into_any()
                    }
                    VerifyStatus::MissingToken => {
                        view! {
                            <Alert
                                kind=AlertKind::Error
                                message="Missing verification token. Check your email link."
                            />
                        }
                            .into_any()
                    }
                    VerifyStatus::Error(message) => {
                        view! {
                            <div class="space-y-3">
                                <Alert kind=AlertKind::Error message=message />
                                <A
                                    href=paths::SIGN_UP
                                    {..}
                                    class="inline-flex items-center px-4 py-2 text-sm font-medium text-white bg-blue-700 rounded-lg hover:bg-blue-800"
                                >
                                    "Try signing up again"
                                </A>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </div>
        </AppShell>
    }
}
