//! Request and response types for auth API calls, plus the auth flow's state
//! and error types. Requests carry credentials or one-time codes, so they must
//! never be logged.

use crate::app_lib::{AppError, ErrorKind};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct VerifyTwoFactorRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

#[derive(Serialize)]
pub struct SignUpRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
}

/// Minimum password length checked before a sign-up is sent.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Sign-up form input. Passwords stay wrapped until the request body is built.
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl SignUpForm {
    /// Local checks for early feedback; the API still has the final say.
    pub fn validate(&self) -> Result<(), AppError> {
        let password = self.password.expose_secret();
        if self.name.trim().is_empty()
            || normalize_email(&self.email).is_empty()
            || password.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Name, email and password are required.".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(AppError::Validation(
                "Email address looks invalid.".to_string(),
            ));
        }
        if password != self.confirm_password.expose_secret() {
            return Err(AppError::Validation("Passwords do not match.".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters."
            )));
        }
        Ok(())
    }

    /// Phone number, if one was entered.
    pub fn phone(&self) -> Option<&str> {
        Some(self.phone.trim()).filter(|phone| !phone.is_empty())
    }
}

/// Body of `/auth/login` and `/auth/verify-2fa` responses. Fields may sit at
/// the top level or inside the `data` envelope.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthResponse {
    pub token: Option<String>,
    pub two_factor_required: bool,
}

impl AuthResponse {
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        let nested = body.get("data").cloned();
        for candidate in std::iter::once(body).chain(nested) {
            if let Ok(response) = serde_json::from_value::<Self>(candidate)
                && response.is_meaningful()
            {
                return Ok(response);
            }
        }

        Err(AppError::Parse(
            "Response carried neither a token nor a two-factor challenge.".to_string(),
        ))
    }

    fn is_meaningful(&self) -> bool {
        self.two_factor_required || self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// What a successful login led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Token stored; the user is signed in.
    Authenticated,
    /// A one-time code was emailed; call `verify_two_factor` next.
    TwoFactorRequired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    CredentialsSubmitted,
    TwoFactorPending { email: String },
    Authenticated,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AuthError {
    InvalidCredentials,
    EmailNotVerified,
    /// Wrong or expired one-time code.
    InvalidCode,
    /// Email verification link that is unknown, used or expired.
    InvalidVerificationLink,
    Failed(AppError),
}

impl AuthError {
    /// Refines a login failure.
    pub fn from_login(err: AppError) -> Self {
        if err.message().to_lowercase().contains("not verified") {
            return AuthError::EmailNotVerified;
        }
        match err.status() {
            Some(400 | 401) => AuthError::InvalidCredentials,
            _ => AuthError::Failed(err),
        }
    }

    /// Refines a two-factor verification failure.
    pub fn from_verification(err: AppError) -> Self {
        match err.status() {
            Some(400 | 401) => AuthError::InvalidCode,
            _ => AuthError::Failed(err),
        }
    }

    /// Refines an email verification failure.
    pub fn from_email_verification(err: AppError) -> Self {
        match err.status() {
            Some(400 | 401 | 404) => AuthError::InvalidVerificationLink,
            _ if err.kind() == ErrorKind::Validation => AuthError::InvalidVerificationLink,
            _ => AuthError::Failed(err),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::InvalidCode => ErrorKind::Unauthenticated,
            AuthError::InvalidVerificationLink => ErrorKind::Validation,
            AuthError::EmailNotVerified => ErrorKind::Unauthorized,
            AuthError::Failed(err) => err.kind(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(formatter, "Invalid email or password."),
            AuthError::EmailNotVerified => {
                write!(formatter, "Please verify your email before signing in.")
            }
            AuthError::InvalidCode => {
                write!(formatter, "Invalid or expired code. Please try again.")
            }
            AuthError::InvalidVerificationLink => write!(
                formatter,
                "The verification link is invalid or has expired."
            ),
            AuthError::Failed(err) => write!(formatter, "{err}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Failed(err)
    }
}

/// Normalizes emails so the same address always produces the same request.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{AuthError, AuthResponse, SignUpForm, normalize_email};
    use crate::app_lib::{AppError, ErrorKind};
    use secrecy::SecretString;
    use serde_json::json;

    fn sign_up_form(password: &str, confirm: &str) -> SignUpForm {
        SignUpForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "  ".to_string(),
            password: SecretString::from(password.to_string()),
            confirm_password: SecretString::from(confirm.to_string()),
        }
    }

    #[test]
    fn auth_response_reads_top_level_fields() {
        let response = AuthResponse::from_body(json!({
            "status": "success",
            "token": "abc",
            "data": {"user": {"email": "a@b.c"}}
        }))
        .expect("token at top level");
        assert_eq!(response.token.as_deref(), Some("abc"));
        assert!(!response.two_factor_required);
    }

    #[test]
    fn auth_response_reads_enveloped_fields() {
        let response = AuthResponse::from_body(json!({"data": {"twoFactorRequired": true}}))
            .expect("challenge in envelope");
        assert!(response.two_factor_required);
        assert_eq!(response.token, None);
    }

    #[test]
    fn auth_response_without_token_or_challenge_is_an_error() {
        let err = AuthResponse::from_body(json!({"status": "success"})).expect_err("empty");
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(AuthResponse::from_body(json!({"token": "  "})).is_err());
    }

    #[test]
    fn login_failures_are_classified() {
        assert_eq!(
            AuthError::from_login(AppError::from_response(
                401,
                r#"{"message":"Incorrect email or password"}"#
            )),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            AuthError::from_login(AppError::from_response(
                401,
                r#"{"message":"Email not verified"}"#
            )),
            AuthError::EmailNotVerified
        );
        let generic = AuthError::from_login(AppError::from_response(500, "oops"));
        assert_eq!(generic.kind(), ErrorKind::Server);
    }

    #[test]
    fn verification_failures_are_classified() {
        assert_eq!(
            AuthError::from_verification(AppError::from_response(400, "Invalid OTP")),
            AuthError::InvalidCode
        );
        assert_eq!(
            AuthError::from_verification(AppError::Network("offline".to_string())).kind(),
            ErrorKind::Network
        );
    }

    #[test]
    fn sign_up_form_checks_fields_before_sending() {
        assert!(sign_up_form("correct horse", "correct horse").validate().is_ok());

        let mismatch = sign_up_form("correct horse", "correct house")
            .validate()
            .expect_err("mismatch");
        assert_eq!(mismatch.message(), "Passwords do not match.");

        let short = sign_up_form("short", "short").validate().expect_err("short");
        assert_eq!(short.kind(), ErrorKind::Validation);

        let mut nameless = sign_up_form("correct horse", "correct horse");
        nameless.name = " ".to_string();
        assert!(nameless.validate().is_err());

        let mut bad_email = sign_up_form("correct horse", "correct horse");
        bad_email.email = "jane.example.com".to_string();
        assert_eq!(
            bad_email.validate().expect_err("email").message(),
            "Email address looks invalid."
        );
    }

    #[test]
    fn blank_phone_is_left_out() {
        let mut form = sign_up_form("correct horse", "correct horse");
        assert_eq!(form.phone(), None);
        form.phone = " +1 555 0100 ".to_string();
        assert_eq!(form.phone(), Some("+1 555 0100"));
    }

    #[test]
    fn email_verification_failures_are_classified() {
        assert_eq!(
            AuthError::from_email_verification(AppError::from_response(
                400,
                r#"{"message":"Token is invalid or has expired"}"#
            )),
            AuthError::InvalidVerificationLink
        );
        assert_eq!(
            AuthError::from_email_verification(AppError::Network("offline".to_string())).kind(),
            ErrorKind::Network
        );
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Jane@Example.COM "), "jane@example.com");
    }
}
