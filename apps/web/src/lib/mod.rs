//! Shared frontend plumbing: the API client and its transport, the session
//! token service, configuration, errors, logging, and build metadata.
//!
//! ## Request path
//!
//! 1. A feature client (flights, bookings, auth) describes a request.
//! 2. [`api::ApiClient`] attaches `Authorization: Bearer <token>` when the
//!    [`session::Session`] holds a token.
//! 3. The transport sends it (`fetch` in the browser, a recording mock in tests).
//! 4. A 401 from any endpoint clears the token once and notifies subscribers,
//!    which send the user back to the sign-in page.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features. Callers must avoid logging the
//! token or credentials.

pub(crate) mod api;
pub(crate) mod build_info;
pub(crate) mod config;
pub(crate) mod errors;
#[cfg(target_arch = "wasm32")]
pub(crate) mod fetch;
pub(crate) mod session;
pub(crate) mod telemetry;

pub(crate) use api::ApiClient;
pub(crate) use errors::{AppError, ErrorKind};
pub(crate) use session::{Session, SessionEvent, SignOutReason};
