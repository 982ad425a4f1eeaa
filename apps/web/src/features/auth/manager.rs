//! Sign-in state machine.
//!
//! ```text
//! Anonymous -> CredentialsSubmitted -> Authenticated
//!                                   -> TwoFactorPending -> Authenticated
//! ```
//!
//! A failed login returns to `Anonymous`; a failed code keeps
//! `TwoFactorPending` so the user can retry. Submitting credentials first drops
//! any token left from an earlier sign-in. The token is written to the
//! [`Session`] exactly once per successful sign-in, and any sign-out (explicit
//! or a 401 from any endpoint) drops the machine back to `Anonymous`.

use crate::{
    app_lib::{AppError, Session, SessionEvent, SignOutReason, api::Transport},
    features::auth::{
        client::AuthClient,
        types::{AuthError, AuthResponse, AuthState, LoginOutcome, SignUpForm, normalize_email},
    },
};
use secrecy::{ExposeSecret, SecretString};
use std::{cell::RefCell, rc::Rc};
use tracing::{debug, info};

pub struct SessionManager<T> {
    client: AuthClient<T>,
    state: Rc<RefCell<AuthState>>,
}

impl<T> Clone for SessionManager<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: Transport> SessionManager<T> {
    /// Starts `Authenticated` when a token is already persisted, otherwise
    /// `Anonymous`.
    pub fn new(client: AuthClient<T>) -> Self {
        let initial = if client.session().is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };
        let state = Rc::new(RefCell::new(initial));

        let on_sign_out = Rc::clone(&state);
        client.session().subscribe(move |event| {
            if let SessionEvent::SignedOut(_) = event {
                *on_sign_out.borrow_mut() = AuthState::Anonymous;
            }
        });

        Self { client, state }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// True iff a token is stored. The token is not validated here; the first
    /// protected request does that.
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginOutcome, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() || password.expose_secret().trim().is_empty() {
            return Err(AuthError::Failed(AppError::Validation(
                "Email and password are required.".to_string(),
            )));
        }

        // A new sign-in replaces whatever account was signed in before.
        if self.session().clear_token(SignOutReason::Logout) {
            info!("previous session dropped for a new sign-in");
        }
        self.transition(AuthState::CredentialsSubmitted);
        let result = self.client.login(&email, password).await;

        match result {
            Ok(AuthResponse {
                two_factor_required: true,
                ..
            }) => {
                info!("two-factor code requested");
                self.transition(AuthState::TwoFactorPending { email });
                Ok(LoginOutcome::TwoFactorRequired)
            }
            Ok(AuthResponse { token, .. }) => {
                self.establish(token.as_deref().unwrap_or_default())
                    .inspect_err(|_| self.transition(AuthState::Anonymous))?;
                Ok(LoginOutcome::Authenticated)
            }
            Err(err) => {
                self.transition(AuthState::Anonymous);
                Err(AuthError::from_login(err))
            }
        }
    }

    pub async fn verify_two_factor(&self, email: &str, code: &str) -> Result<(), AuthError> {
        if !matches!(self.state(), AuthState::TwoFactorPending { .. }) {
            return Err(AuthError::Failed(AppError::Validation(
                "No sign-in is waiting for a verification code.".to_string(),
            )));
        }

        let email = normalize_email(email);
        let code = code.trim();
        if email.is_empty() || code.is_empty() {
            return Err(AuthError::Failed(AppError::Validation(
                "Enter the code sent to your email.".to_string(),
            )));
        }

        let response = self
            .client
            .verify_two_factor(&email, code)
            .await
            .map_err(AuthError::from_verification)?;
        self.establish(response.token.as_deref().unwrap_or_default())?;
        Ok(())
    }

    /// Creates an account after local checks pass. The state is untouched:
    /// the new account must verify its email before it can sign in.
    pub async fn register(&self, form: &SignUpForm) -> Result<(), AuthError> {
        form.validate()?;
        self.client.register(form).await?;
        info!("account created; awaiting email verification");
        Ok(())
    }

    pub async fn verify_email(&self, token: &str) -> Result<(), AuthError> {
        self.client
            .verify_email(token)
            .await
            .map_err(AuthError::from_email_verification)?;
        info!("email address verified");
        Ok(())
    }

    /// Explicit sign-out. The token is dropped locally; there is no server
    /// session to revoke.
    pub fn logout(&self) {
        if !self.session().clear_token(SignOutReason::Logout) {
            self.transition(AuthState::Anonymous);
        }
    }

    fn establish(&self, token: &str) -> Result<(), AuthError> {
        self.session().set_token(token)?;
        self.transition(AuthState::Authenticated);
        Ok(())
    }

    fn transition(&self, next: AuthState) {
        let mut state = self.state.borrow_mut();
        debug!(from = state_name(&state), to = state_name(&next), "auth state");
        *state = next;
    }
}

fn state_name(state: &AuthState) -> &'static str {
    match state {
        AuthState::Anonymous => "anonymous",
        AuthState::CredentialsSubmitted => "credentials_submitted",
        AuthState::TwoFactorPending { .. } => "two_factor_pending",
        AuthState::Authenticated => "authenticated",
    }
}

#[cfg(test)]
mod tests {
    use super::SessionManager;
    use crate::{
        app_lib::{
            AppError, ErrorKind, Session,
            api::{Method, MockTransport, mock_client},
            session::MemoryTokenStore,
        },
        features::auth::{
            client::AuthClient,
            types::{AuthError, AuthState, LoginOutcome, SignUpForm},
        },
    };
    use secrecy::SecretString;
    use serde_json::json;
    use std::rc::Rc;

    fn manager(
        transport: MockTransport,
        store: MemoryTokenStore,
    ) -> (SessionManager<MockTransport>, Rc<MockTransport>) {
        let (api, handle) = mock_client(transport, Session::new(store));
        (SessionManager::new(AuthClient::new(api)), handle)
    }

    fn password() -> SecretString {
        SecretString::from("hunter2".to_string())
    }

    #[test]
    fn starts_authenticated_with_persisted_token() {
        let (manager, _) = manager(
            MockTransport::default(),
            MemoryTokenStore::with_token("stored"),
        );
        assert_eq!(manager.state(), AuthState::Authenticated);
        assert!(manager.is_authenticated());
    }

    #[tokio::test]
    async fn login_without_two_factor_stores_token() {
        let store = MemoryTokenStore::default();
        let transport = MockTransport::default().reply(Ok(json!({"token": "abc"})));
        let (manager, handle) = manager(transport, store.clone());

        let outcome = manager
            .login(" Jane@Example.com ", &password())
            .await
            .expect("login succeeds");

        assert_eq!(outcome, LoginOutcome::Authenticated);
        assert_eq!(manager.state(), AuthState::Authenticated);
        assert_eq!(store.stored().as_deref(), Some("abc"));
        assert_eq!(store.saves(), 1);

        let requests = handle.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/auth/login");
        assert_eq!(
            requests[0].body,
            Some(json!({"email": "jane@example.com", "password": "hunter2"}))
        );
    }

    #[tokio::test]
    async fn two_factor_flow_stores_token_once() {
        let store = MemoryTokenStore::default();
        let transport = MockTransport::default()
            .reply(Ok(json!({"twoFactorRequired": true})))
            .reply(Ok(json!({"token": "otp-token"})));
        let (manager, handle) = manager(transport, store.clone());

        let outcome = manager
            .login("jane@example.com", &password())
            .await
            .expect("login succeeds");
        assert_eq!(outcome, LoginOutcome::TwoFactorRequired);
        assert_eq!(
            manager.state(),
            AuthState::TwoFactorPending {
                email: "jane@example.com".to_string()
            }
        );
        assert!(!manager.is_authenticated());
        assert_eq!(store.saves(), 0);

        manager
            .verify_two_factor("jane@example.com", " 123456 ")
            .await
            .expect("code accepted");

        assert_eq!(manager.state(), AuthState::Authenticated);
        assert!(manager.is_authenticated());
        assert_eq!(store.saves(), 1);
        assert_eq!(
            handle.requests()[1].body,
            Some(json!({"email": "jane@example.com", "code": "123456"}))
        );
    }

    #[tokio::test]
    async fn wrong_code_keeps_two_factor_pending() {
        let store = MemoryTokenStore::default();
        let transport = MockTransport::default()
            .reply(Ok(json!({"twoFactorRequired": true})))
            .reply(Err(AppError::from_response(400, r#"{"message":"Invalid OTP"}"#)))
            .reply(Ok(json!({"data": {"token": "second-try"}})));
        let (manager, _) = manager(transport, store.clone());

        manager
            .login("jane@example.com", &password())
            .await
            .expect("challenge issued");

        let err = manager
            .verify_two_factor("jane@example.com", "000000")
            .await
            .expect_err("wrong code");
        assert_eq!(err, AuthError::InvalidCode);
        assert!(matches!(
            manager.state(),
            AuthState::TwoFactorPending { .. }
        ));
        assert_eq!(store.saves(), 0);

        manager
            .verify_two_factor("jane@example.com", "123456")
            .await
            .expect("retry succeeds");
        assert_eq!(store.stored().as_deref(), Some("second-try"));
    }

    #[tokio::test]
    async fn failed_login_returns_to_anonymous() {
        let transport = MockTransport::default()
            .reply(Err(AppError::from_response(
                401,
                r#"{"message":"Incorrect email or password"}"#,
            )))
            .reply(Err(AppError::from_response(
                401,
                r#"{"message":"Email not verified"}"#,
            )))
            .reply(Err(AppError::Network("offline".to_string())));
        let (manager, _) = manager(transport, MemoryTokenStore::default());

        let invalid = manager.login("a@b.c", &password()).await.expect_err("401");
        assert_eq!(invalid, AuthError::InvalidCredentials);
        assert_eq!(manager.state(), AuthState::Anonymous);

        let unverified = manager.login("a@b.c", &password()).await.expect_err("401");
        assert_eq!(unverified, AuthError::EmailNotVerified);

        let offline = manager.login("a@b.c", &password()).await.expect_err("offline");
        assert_eq!(offline.kind(), ErrorKind::Network);
        assert_eq!(manager.state(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn new_login_drops_previous_account_token() {
        let store = MemoryTokenStore::with_token("old-account-token");
        let transport = MockTransport::default()
            .reply(Ok(json!({"twoFactorRequired": true})))
            .reply(Err(AppError::from_response(
                400,
                r#"{"message":"Incorrect email or password"}"#,
            )));
        let (manager, handle) = manager(transport, store.clone());

        let outcome = manager
            .login("b@c.d", &password())
            .await
            .expect("challenge issued");
        assert_eq!(outcome, LoginOutcome::TwoFactorRequired);
        assert_eq!(
            manager.state(),
            AuthState::TwoFactorPending {
                email: "b@c.d".to_string()
            }
        );
        assert!(!manager.is_authenticated());
        assert_eq!(store.stored(), None);
        assert_eq!(handle.requests()[0].bearer, None);

        manager
            .session()
            .set_token("second-old-token")
            .expect("token accepted");
        let err = manager.login("b@c.d", &password()).await.expect_err("400");
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(manager.state(), AuthState::Anonymous);
        assert!(!manager.is_authenticated());
        assert_eq!(store.stored(), None);
    }

    #[tokio::test]
    async fn blank_credentials_never_reach_the_network() {
        let (manager, handle) = manager(MockTransport::default(), MemoryTokenStore::default());

        let err = manager
            .login("   ", &password())
            .await
            .expect_err("validation");

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(handle.requests().is_empty());
    }

    #[tokio::test]
    async fn verify_without_pending_challenge_is_rejected() {
        let (manager, handle) = manager(MockTransport::default(), MemoryTokenStore::default());

        let err = manager
            .verify_two_factor("a@b.c", "123456")
            .await
            .expect_err("no challenge");

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(handle.requests().is_empty());
    }

    #[tokio::test]
    async fn unauthenticated_error_elsewhere_signs_out() {
        let store = MemoryTokenStore::default();
        let transport = MockTransport::default()
            .reply(Ok(json!({"token": "abc"})))
            .reply(Err(AppError::from_response(401, "jwt expired")));
        let (api, _) = mock_client(transport, Session::new(store.clone()));
        let manager = SessionManager::new(AuthClient::new(api.clone()));

        manager
            .login("a@b.c", &password())
            .await
            .expect("signed in");
        let _ = api.get::<serde_json::Value>("/bookings").await;

        assert!(!manager.is_authenticated());
        assert_eq!(manager.state(), AuthState::Anonymous);
        assert_eq!(store.removals(), 1);
    }

    #[tokio::test]
    async fn invalid_sign_up_never_reaches_the_network() {
        let (manager, handle) = manager(MockTransport::default(), MemoryTokenStore::default());
        let form = SignUpForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: String::new(),
            password: SecretString::from("correct horse".to_string()),
            confirm_password: SecretString::from("battery staple".to_string()),
        };

        let err = manager.register(&form).await.expect_err("mismatch");

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(handle.requests().is_empty());
    }

    #[tokio::test]
    async fn sign_up_then_verify_leaves_user_signed_out() {
        let store = MemoryTokenStore::default();
        let transport = MockTransport::default()
            .reply(Ok(json!({"status": "success"})))
            .reply(Ok(json!({"status": "success", "message": "Email verified"})))
            .reply(Err(AppError::from_response(
                400,
                r#"{"message":"Token is invalid or has expired"}"#,
            )));
        let (manager, handle) = manager(transport, store.clone());
        let form = SignUpForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: String::new(),
            password: SecretString::from("hunter2-long".to_string()),
            confirm_password: SecretString::from("hunter2-long".to_string()),
        };

        manager.register(&form).await.expect("account created");
        manager.verify_email("abc123").await.expect("verified");
        let reused = manager.verify_email("abc123").await.expect_err("used link");

        assert_eq!(reused, AuthError::InvalidVerificationLink);
        assert_eq!(manager.state(), AuthState::Anonymous);
        assert!(!manager.is_authenticated());
        assert_eq!(store.saves(), 0);
        assert_eq!(handle.requests()[1].path, "/auth/verify-email/abc123");
    }

    #[test]
    fn logout_clears_token() {
        let store = MemoryTokenStore::with_token("abc");
        let (manager, _) = manager(MockTransport::default(), store.clone());

        manager.logout();

        assert!(!manager.is_authenticated());
        assert_eq!(manager.state(), AuthState::Anonymous);
        assert_eq!(store.removals(), 1);
    }
}
