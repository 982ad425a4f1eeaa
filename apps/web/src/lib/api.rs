//! JSON API client shared by every feature. Feature clients describe requests
//! (method, path, body) and [`ApiClient`] does the rest in one place: attach
//! the bearer token, send through a [`Transport`], apply the session teardown
//! rule, and decode the response body. Bodies may come wrapped in a
//! `{ "status": …, "data": … }` envelope or bare; both decode the same way.

use super::{errors::AppError, session::Session};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::rc::Rc;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// A request as seen by the transport. The bearer token is attached by
/// [`ApiClient`]; transports must never log it.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

/// Moves an [`ApiRequest`] over the wire and returns the decoded JSON body
/// (`Value::Null` for empty bodies). Non-2xx responses become
/// [`AppError::Http`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<Value, AppError>;
}

/// Decodes a response body. An object carrying a `data` key is an envelope and
/// only its payload is decoded, so field errors inside it are reported as-is.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    let payload = match value {
        Value::Object(mut fields) => match fields.remove("data") {
            Some(data) => data,
            None => Value::Object(fields),
        },
        other => other,
    };
    serde_json::from_value(payload)
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

pub struct ApiClient<T> {
    transport: Rc<T>,
    session: Session,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
            session: self.session.clone(),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, session: Session) -> Self {
        Self {
            transport: Rc::new(transport),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, AppError> {
        let value = self.execute(Method::Get, path, None).await?;
        decode(value)
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, AppError> {
        let payload = encode(body)?;
        let value = self.execute(Method::Post, path, Some(payload)).await?;
        decode(value)
    }

    /// Posts JSON and returns the body as-is, for responses whose fields may
    /// sit next to the `data` envelope rather than inside it.
    pub async fn post_raw<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, AppError> {
        let payload = encode(body)?;
        self.execute(Method::Post, path, Some(payload)).await
    }

    /// Sends a PATCH without a body, as used for state changes such as
    /// cancelling a booking.
    pub async fn patch<R: DeserializeOwned>(&self, path: &str) -> Result<R, AppError> {
        let value = self.execute(Method::Patch, path, None).await?;
        decode(value)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, AppError> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            body,
            bearer: self.session.token(),
        };
        debug!(
            method = method.as_str(),
            path,
            authenticated = request.bearer.is_some(),
            "api request"
        );

        let result = self.transport.send(request).await;
        if let Err(err) = &result {
            debug!(method = method.as_str(), path, kind = ?err.kind(), "api request failed");
        }
        self.session.intercept(result)
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Value, AppError> {
    serde_json::to_value(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
}

/// Validates a record id before it is placed in a request path.
pub fn path_id<'a>(label: &str, id: &'a str) -> Result<&'a str, AppError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{label} id is required.")));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::Validation(format!("{label} id is invalid.")));
    }
    Ok(trimmed)
}

/// Builds a URL from an explicit base URL and the provided path.
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Recording transport for tests: replies from a queue of canned results and
/// keeps every request it saw.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: std::cell::RefCell<std::collections::VecDeque<Result<Value, AppError>>>,
    requests: std::cell::RefCell<Vec<ApiRequest>>,
}

#[cfg(test)]
impl MockTransport {
    pub(crate) fn reply(self, result: Result<Value, AppError>) -> Self {
        self.replies.borrow_mut().push_back(result);
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[cfg(test)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, AppError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Network("no canned reply".to_string())))
    }
}

/// Test helper: an API client over a mock transport, returned with a handle
/// to inspect recorded requests.
#[cfg(test)]
pub(crate) fn mock_client(
    transport: MockTransport,
    session: Session,
) -> (ApiClient<MockTransport>, Rc<MockTransport>) {
    let client = ApiClient::new(transport, session);
    let handle = Rc::clone(&client.transport);
    (client, handle)
}
