//! Browser `fetch` transport with a fixed abort timeout. It only moves bytes;
//! tokens and session rules are handled by [`super::api::ApiClient`].

use super::{
    api::{ApiRequest, Method, Transport, build_url_with_base},
    errors::AppError,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde_json::{Value, to_string};
use web_sys::AbortController;

/// Default request timeout (milliseconds) applied to every request.
const DEFAULT_TIMEOUT_MS: u32 = 10_000;

pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, AppError> {
        let url = build_url_with_base(&self.base_url, &request.path);
        let payload = request
            .body
            .as_ref()
            .map(to_string)
            .transpose()
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;

        let response = send_with_timeout(|signal| {
            let mut builder = builder_for(request.method, &url).abort_signal(Some(signal));

            if let Some(token) = request.bearer.as_deref() {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }

            let built = match payload {
                Some(body) => builder
                    .header("Content-Type", "application/json")
                    .body(body),
                None => builder.build(),
            };
            built.map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
        })
        .await?;

        handle_json_response(response).await
    }
}

fn builder_for(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Patch => Request::patch(url),
    }
}

/// Maps network errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Sends a request with an abort timeout to avoid hanging UI state.
async fn send_with_timeout(
    build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<Request, AppError>,
) -> Result<Response, AppError> {
    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request.send().await.map_err(map_request_error)
}

/// Parses JSON bodies (empty bodies become `Null`) and surfaces HTTP errors.
async fn handle_json_response(response: Response) -> Result<Value, AppError> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !response.ok() {
        return Err(AppError::from_response(status, &body));
    }
    if status == 204 || body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body)
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}
