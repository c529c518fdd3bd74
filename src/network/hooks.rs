//! Response and error hooks for [`RequestClient`](super::RequestClient)

use async_trait::async_trait;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::error::{ErrorKind, RequestError, Result};

/// Extra keyword arguments forwarded to a hook
pub type HookArgs = Map<String, Value>;

/// What a hook sees about the request it runs for
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub url: &'a str,
    pub method: &'a Method,
    pub kwargs: &'a HookArgs,
}

/// Post-processes a successful transport result
#[async_trait]
pub trait ResponseHook: Send + Sync {
    type Output: Send;

    async fn on_response(&self, response: Response, ctx: &HookContext<'_>) -> Result<Self::Output>;
}

/// Default hook: fail on 4xx/5xx, otherwise return the response untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct RaiseForStatus;

#[async_trait]
impl ResponseHook for RaiseForStatus {
    type Output = Response;

    async fn on_response(&self, response: Response, _ctx: &HookContext<'_>) -> Result<Response> {
        check_status(response).await
    }
}

/// Turn a client or server error status into [`RequestError::Status`]
///
/// The body is read so it can be attached to the failure log.
pub async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.ok().filter(|body| !body.is_empty());
    Err(RequestError::Status { status, url, body })
}

/// Checks the status, then decodes the body as JSON
pub struct JsonHook<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonHook<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonHook<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> ResponseHook for JsonHook<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Output = T;

    async fn on_response(&self, response: Response, _ctx: &HookContext<'_>) -> Result<T> {
        let response = check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            RequestError::invalid_response(format!("Invalid JSON response: {e}"), Some(body))
        })
    }
}

pub type ErrorFactory = Arc<dyn Fn(&str) -> RequestError + Send + Sync>;

/// What to raise once a failure has been logged
#[derive(Default)]
pub enum Raise {
    /// Swallow the failure and return the fallback response
    #[default]
    Never,
    /// Raise the client's default error kind with the error title as message
    Default,
    /// Build the error from the error title
    Factory(ErrorFactory),
    /// Raise this exact error
    Instance(RequestError),
}

impl Raise {
    /// Raise errors of `kind` carrying the error title
    pub fn kind(kind: ErrorKind) -> Self {
        Raise::Factory(Arc::new(move |title| RequestError::raised(kind, title)))
    }

    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&str) -> RequestError + Send + Sync + 'static,
    {
        Raise::Factory(Arc::new(factory))
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Raise::Never)
    }
}

impl From<bool> for Raise {
    fn from(raise: bool) -> Self {
        if raise { Raise::Default } else { Raise::Never }
    }
}

impl From<ErrorKind> for Raise {
    fn from(kind: ErrorKind) -> Self {
        Raise::kind(kind)
    }
}

impl From<RequestError> for Raise {
    fn from(error: RequestError) -> Self {
        Raise::Instance(error)
    }
}

impl fmt::Debug for Raise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raise::Never => f.write_str("Never"),
            Raise::Default => f.write_str("Default"),
            Raise::Factory(_) => f.write_str("Factory(..)"),
            Raise::Instance(error) => f.debug_tuple("Instance").field(error).finish(),
        }
    }
}

/// Overrides an error hook may return; `None` keeps the caller's value
pub struct ErrorOverride<T> {
    pub title: Option<String>,
    pub info: Option<String>,
    /// Values available to `{name}` placeholders in the info template
    pub detail: Option<BTreeMap<String, String>>,
    /// Fallback response returned when nothing is raised
    pub response: Option<T>,
    /// Replaces the captured stack trace in the failure log
    pub trace: Option<String>,
    pub raise: Option<Raise>,
}

impl<T> Default for ErrorOverride<T> {
    fn default() -> Self {
        Self {
            title: None,
            info: None,
            detail: None,
            response: None,
            trace: None,
            raise: None,
        }
    }
}

impl<T> ErrorOverride<T> {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.detail
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_response(mut self, response: T) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    pub fn with_raise(mut self, raise: impl Into<Raise>) -> Self {
        self.raise = Some(raise.into());
        self
    }
}

/// Inspects a failure and decides how it is logged and surfaced
pub trait ErrorHook<T>: Send + Sync {
    fn on_error(
        &self,
        error: &RequestError,
        response_body: Option<&str>,
        ctx: &HookContext<'_>,
    ) -> ErrorOverride<T>;
}

impl<T, F> ErrorHook<T> for F
where
    F: Fn(&RequestError, Option<&str>, &HookContext<'_>) -> ErrorOverride<T> + Send + Sync,
{
    fn on_error(
        &self,
        error: &RequestError,
        response_body: Option<&str>,
        ctx: &HookContext<'_>,
    ) -> ErrorOverride<T> {
        self(error, response_body, ctx)
    }
}
