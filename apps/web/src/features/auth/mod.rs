//! Auth feature: account sign-up with email verification, email/password
//! sign-in with an optional emailed one-time code, token persistence through
//! the shared session, and route gating.
//!
//! Flow: `login` posts credentials. The response either carries a token (signed
//! in) or asks for a two-factor code, which `verify_two_factor` exchanges for a
//! token. Neither passwords, codes nor tokens may be logged.

pub(crate) mod client;
#[cfg(target_arch = "wasm32")]
mod guards;
pub(crate) mod manager;
#[cfg(target_arch = "wasm32")]
pub(crate) mod state;
pub(crate) mod types;

#[cfg(target_arch = "wasm32")]
pub(crate) use guards::{RedirectIfSignedIn, RequireAuth, SignOutRedirect};
