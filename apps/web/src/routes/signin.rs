//! Sign-in route: email and password first, then the emailed one-time code when
//! the account has two-factor enabled. State transitions live in the session
//! manager; this page only collects input and renders outcomes.

use crate::{
    components::{Alert, AlertKind, AppShell, Button, Spinner},
    features::auth::{
        RedirectIfSignedIn,
        state::use_auth,
        types::{AuthError, LoginOutcome},
    },
    routes::paths,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_navigate};
use secrecy::SecretString;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

#[derive(Clone)]
struct Credentials {
    email: String,
    password: String,
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (code, set_code) = signal(String::new());
    let (awaiting_code, set_awaiting_code) = signal(false);
    let (error, set_error) = signal::<Option<AuthError>>(None);

    let login_action = Action::new_local(move |input: &Credentials| {
        let manager = auth.manager();
        let email = input.email.clone();
        let password = SecretString::from(input.password.clone());
        async move { manager.login(&email, &password).await }
    });

    let verify_action = Action::new_local(move |code: &String| {
        let manager = auth.manager();
        let email = email.get_untracked();
        let code = code.clone();
        async move { manager.verify_two_factor(&email, &code).await }
    });

    let navigate_after_login = navigate.clone();
    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(LoginOutcome::Authenticated) => {
                    navigate_after_login(paths::FLIGHTS, Default::default());
                }
                Ok(LoginOutcome::TwoFactorRequired) => {
                    set_password.set(String::new());
                    set_awaiting_code.set(true);
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = verify_action.value().get() {
            match result {
                Ok(()) => navigate(paths::FLIGHTS, Default::default()),
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_login = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        login_action.dispatch(Credentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
        });
    };

    let on_verify = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        verify_action.dispatch(code.get_untracked());
    };

    let pending = Signal::derive(move || login_action.pending().get() || verify_action.pending().get());

    view! {
        <AppShell>
            <RedirectIfSignedIn>
                <div class="max-w-sm mx-auto space-y-4">
                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Sign in"</h1>
                    {move || {
                        auth.session_expired
                            .get()
                            .then_some(view! {
                                <Alert
                                    kind=AlertKind::Info
                                    message="Your session has expired. Please sign in again."
                                />
                            })
                    }}
                    <Show
                        when=move || awaiting_code.get()
                        fallback=move || view! {
                            <form on:submit=on_login>
                                <div class="mb-5">
                                    <label class=LABEL_CLASS for="email">"Your email"</label>
                                    <input
                                        id="email"
                                        type="email"
                                        class=INPUT_CLASS
                                        autocomplete="email"
                                        placeholder="name@example.com"
                                        required
                                        prop:value=move || email.get()
                                        on:input=move |event| set_email.set(event_target_value(&event))
                                    />
                                </div>
                                <div class="mb-5">
                                    <label class=LABEL_CLASS for="password">"Your password"</label>
                                    <input
                                        id="password"
                                        type="password"
                                        class=INPUT_CLASS
                                        autocomplete="current-password"
                                        required
                                        on:input=move |event| set_password.set(event_target_value(&event))
                                    />
                                </div>
                                <Button button_type="submit" disabled=pending>
                                    "Sign in"
                                </Button>
                            </form>
                        }
                    >
                        <form on:submit=on_verify>
                            <div class="mb-5">
                                <Alert
                                    kind=AlertKind::Info
                                    message=format!("We sent a verification code to {}.", email.get_untracked())
                                />
                            </div>
                            <div class="mb-5">
                                <label class=LABEL_CLASS for="code">"Verification code"</label>
                                <input
                                    id="code"
                                    type="text"
                                    inputmode="numeric"
                                    autocomplete="one-time-code"
                                    class=INPUT_CLASS
                                    required
                                    on:input=move |event| set_code.set(event_target_value(&event))
                                />
                            </div>
                            <Button button_type="submit" disabled=pending>
                                "Verify"
                            </Button>
                        </form>
                    </Show>
                    {move || pending.get().then_some(view! { <div class="mt-4"><Spinner /></div> })}
                    {move || {
                        error
                            .get()
                            .map(|err| {
                                let unverified = err == AuthError::EmailNotVerified;
                                view! {
                                    <div class="mt-4 space-y-2">
                                        <Alert kind=AlertKind::Error message=err.to_string() />
                                        {unverified
                                            .then_some(view! {
                                                <p class="text-sm text-gray-500 dark:text-gray-400">
                                                    "Open the link we emailed when you signed up, then try again."
                                                </p>
                                            })}
                                    </div>
                                }
                            })
                    }}
                    <p class="text-sm text-gray-500 dark:text-gray-400">
                        "No account yet? "
                        <A
                            href=paths::SIGN_UP
                            {..}
                            class="font-medium text-blue-600 hover:underline dark:text-blue-500"
                        >
                            "Create one"
                        </A>
                    </p>
                </div>
            </RedirectIfSignedIn>
        </AppShell>
    }
}
