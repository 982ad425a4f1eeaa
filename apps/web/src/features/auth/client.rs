//! Client wrappers for the auth API endpoints. These helpers keep endpoint
//! paths in one place and expose the password only while the request body is
//! being built.

use crate::{
    app_lib::{
        AppError, ApiClient, Session,
        api::{Transport, path_id},
    },
    features::auth::types::{
        AuthResponse, LoginRequest, SignUpForm, SignUpRequest, VerifyTwoFactorRequest,
        normalize_email,
    },
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

pub struct AuthClient<T> {
    api: ApiClient<T>,
}

impl<T> Clone for AuthClient<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<T: Transport> AuthClient<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self { api }
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }

    /// Submits credentials. The response carries either a token or a
    /// two-factor challenge.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, AppError> {
        let request = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let body = self.api.post_raw("/auth/login", &request).await?;
        AuthResponse::from_body(body)
    }

    /// Submits the emailed one-time code for the pending login.
    pub async fn verify_two_factor(&self, email: &str, code: &str) -> Result<AuthResponse, AppError> {
        let request = VerifyTwoFactorRequest { email, code };
        let body = self.api.post_raw("/auth/verify-2fa", &request).await?;
        AuthResponse::from_body(body)
    }

    /// Creates an account. The API emails a verification link; no token is
    /// issued until the address is verified and the user signs in.
    pub async fn register(&self, form: &SignUpForm) -> Result<(), AppError> {
        let email = normalize_email(&form.email);
        let request = SignUpRequest {
            name: form.name.trim(),
            email: &email,
            password: form.password.expose_secret(),
            phone: form.phone(),
        };
        let _: Value = self.api.post("/auth/signup", &request).await?;
        Ok(())
    }

    /// Confirms the address behind an emailed verification link.
    pub async fn verify_email(&self, token: &str) -> Result<(), AppError> {
        let token = path_id("Verification", token)?;
        let _: Value = self
            .api
            .get(&format!("/auth/verify-email/{token}"))
            .await?;
        Ok(())
    }
}
