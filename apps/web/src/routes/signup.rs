//! Sign-up route. Checks the form locally, creates the account, then asks the
//! user to open the verification link before signing in. Nothing is stored on
//! success; the account has no session until it signs in.

use crate::{
    components::{Alert, AlertKind, AppShell, Button, Spinner},
    features::auth::{
        RedirectIfSignedIn,
        state::use_auth,
        types::{AuthError, MIN_PASSWORD_LENGTH, SignUpForm},
    },
    routes::paths,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;
use secrecy::SecretString;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

/// Form input captured for the async action without borrowing signals.
#[derive(Clone)]
struct SignUpInput {
    name: String,
    email: String,
    phone: String,
    password: String,
    confirm_password: String,
}

impl SignUpInput {
    fn into_form(self) -> SignUpForm {
        SignUpForm {
            name: self.name,
            email: self.email,
            phone: self.phone,
            password: SecretString::from(self.password),
            confirm_password: SecretString::from(self.confirm_password),
        }
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth = use_auth();
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AuthError>>(None);
    let (success, set_success) = signal(false);

    let signup_action = Action::new_local(move |input: &SignUpInput| {
        let manager = auth.manager();
        let form = input.clone().into_form();
        async move { manager.register(&form).await }
    });

    Effect::new(move |_| {
        if let Some(result) = signup_action.value().get() {
            match result {
                Ok(()) => {
                    set_password.set(String::new());
                    set_confirm_password.set(String::new());
                    set_success.set(true);
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        set_success.set(false);
        signup_action.dispatch(SignUpInput {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        });
    };

    view! {
        <AppShell>
            <RedirectIfSignedIn>
                <div class="max-w-sm mx-auto space-y-4">
                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                        "Create account"
                    </h1>
                    <form on:submit=on_submit>
                        <div class="mb-5">
                            <label class=LABEL_CLASS for="name">"Full name"</label>
                            <input
                                id="name"
                                type="text"
                                class=INPUT_CLASS
                                autocomplete="name"
                                required
                                on:input=move |event| set_name.set(event_target_value(&event))
                            />
                        </div>
                        <div class="mb-5">
                            <label class=LABEL_CLASS for="email">"Email"</label>
                            <input
                                id="email"
                                type="email"
                                class=INPUT_CLASS
                                autocomplete="email"
                                placeholder="name@example.com"
                                required
                                on:input=move |event| set_email.set(event_target_value(&event))
                            />
                        </div>
                        <div class="mb-5">
                            <label class=LABEL_CLASS for="phone">"Phone (optional)"</label>
                            <input
                                id="phone"
                                type="tel"
                                class=INPUT_CLASS
                                autocomplete="tel"
                                on:input=move |event| set_phone.set(event_target_value(&event))
                            />
                        </div>
                        <div class="mb-5">
                            <label class=LABEL_CLASS for="password">"Password"</label>
                            <input
                                id="password"
                                type="password"
                                class=INPUT_CLASS
                                autocomplete="new-password"
                                minlength={MIN_PASSWORD_LENGTH.to_string()}
                                required
                                prop:value=move || password.get()
                                on:input=move |event| set_password.set(event_target_value(&event))
                            />
                        </div>
                        <div class="mb-5">
                            <label class=LABEL_CLASS for="confirm_password">"Confirm password"</label>
                            <input
                                id="confirm_password"
                                type="password"
                                class=INPUT_CLASS
                                autocomplete="new-password"
                                required
                                prop:value=move || confirm_password.get()
                                on:input=move |event| {
                                    set_confirm_password.set(event_target_value(&event));
                                }
                            />
                        </div>
                        <Button button_type="submit" disabled=signup_action.pending()>
                            "Create account"
                        </Button>
                    </form>
                    {move || {
                        signup_action
                            .pending()
                            .get()
                            .then_some(view! { <div class="mt-4"><Spinner /></div> })
                    }}
                    {move || {
                        success
                            .get()
                            .then_some(view! {
                                <div class="mt-4">
                                    <Alert
                                        kind=AlertKind::Success
                                        message="Check your email for a link to verify your account."
                                    />
                                </div>
                            })
                    }}
                    {move || {
                        error
                            .get()
                            .map(|err| {
                                view! {
                                    <div class="mt-4">
                                        <Alert kind=AlertKind::Error message=err.to_string() />
                                    </div>
                                }
                            })
                    }}
                    <p class="text-sm text-gray-500 dark:text-gray-400">
                        "Already have an account? "
                        <A
                            href=paths::SIGN_IN
                            {..}
                            class="font-medium text-blue-600 hover:underline dark:text-blue-500"
                        >
                            "Sign in"
                        </A>
                    </p>
                </div>
            </RedirectIfSignedIn>
        </AppShell>
    }
}
