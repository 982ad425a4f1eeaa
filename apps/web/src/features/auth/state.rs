//! Auth context for the frontend. The provider builds the one API client and
//! session manager the app uses, and mirrors session events into signals so
//! guards, the header and the sign-in page react to sign-in, sign-out and
//! expiry without a reload. The
//! token itself stays in `localStorage`; only the boolean lives in memory.

use crate::{
    app_lib::{
        ApiClient, Session, SessionEvent, config::AppConfig, fetch::FetchTransport,
        session::LocalStorageTokenStore,
    },
    features::auth::{client::AuthClient, manager::SessionManager},
};
use leptos::prelude::*;

pub type WebClient = ApiClient<FetchTransport>;
pub type WebSessionManager = SessionManager<FetchTransport>;

#[derive(Clone, Copy)]
/// Auth context shared through Leptos.
pub struct AuthContext {
    api: StoredValue<WebClient, LocalStorage>,
    manager: StoredValue<WebSessionManager, LocalStorage>,
    pub is_authenticated: RwSignal<bool>,
    /// Set when the server rejected the token; cleared by the next sign-in.
    pub session_expired: RwSignal<bool>,
}

impl AuthContext {
    fn new(config: &AppConfig) -> Self {
        let session = Session::new(LocalStorageTokenStore::new(
            config.token_storage_key.clone(),
        ));
        let api = ApiClient::new(FetchTransport::new(config.api_base_url.clone()), session);
        let manager = SessionManager::new(AuthClient::new(api.clone()));

        let is_authenticated = RwSignal::new(manager.is_authenticated());
        let session_expired = RwSignal::new(false);
        api.session().subscribe(move |event| {
            let signed_in = event == SessionEvent::SignedIn;
            is_authenticated.set(signed_in);
            if signed_in {
                session_expired.set(false);
            }
        });
        api.session().on_unauthenticated(move || session_expired.set(true));

        Self {
            api: StoredValue::new_local(api),
            manager: StoredValue::new_local(manager),
            is_authenticated,
            session_expired,
        }
    }

    /// API client carrying the session token.
    pub fn api(&self) -> WebClient {
        self.api.get_value()
    }

    pub fn manager(&self) -> WebSessionManager {
        self.manager.get_value()
    }

    /// Explicit sign-out; the subscription above flips the signal.
    pub fn logout(&self) {
        self.manager.with_value(SessionManager::logout);
    }
}

/// Provides the auth context to every route.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let config = AppConfig::load();
    provide_context(AuthContext::new(&config));

    view! { {children()} }
}

/// Returns the auth context installed by [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| AuthContext::new(&AppConfig::load()))
}
