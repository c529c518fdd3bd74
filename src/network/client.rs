use bytes::Bytes;
use reqwest::header::COOKIE;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::backtrace::Backtrace;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use tracing::debug;

use super::error::{ErrorKind, RequestError, Result};
use super::hooks::{
    ErrorHook, ErrorOverride, HookArgs, HookContext, Raise, RaiseForStatus, ResponseHook,
};
use super::report::{self, DEFAULT_ERROR_TITLE, FailureReport};
use super::session::Session;
use crate::config::Settings;
use crate::observability::{LogSink, TracingSink};

/// Request body sent as form fields or raw bytes
#[derive(Debug, Clone)]
pub enum RequestBody {
    Form(Vec<(String, String)>),
    Raw(Bytes),
}

#[derive(Debug, Clone)]
pub enum Auth {
    Basic {
        username: String,
        password: Option<String>,
    },
    Bearer(String),
}

/// Everything a single call may override
#[derive(Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub params: Vec<(String, String)>,
    pub data: Option<RequestBody>,
    /// Ignored when `data` is set
    pub json: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub cookies: Vec<(String, String)>,
    pub auth: Option<Auth>,
    pub timeout: Option<Duration>,
    pub verify: Option<bool>,
    pub allow_redirects: Option<bool>,
    pub response_hook_kwargs: HookArgs,
    pub error_hook_kwargs: HookArgs,
    pub error_title: Option<String>,
    pub error_info: Option<String>,
    pub raise_exc: Raise,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            params: Vec::new(),
            data: None,
            json: None,
            headers: Vec::new(),
            cookies: Vec::new(),
            auth: None,
            timeout: None,
            verify: None,
            allow_redirects: None,
            response_hook_kwargs: HookArgs::new(),
            error_hook_kwargs: HookArgs::new(),
            error_title: None,
            error_info: None,
            raise_exc: Raise::Never,
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    pub fn with_form(mut self, fields: Vec<(String, String)>) -> Self {
        self.data = Some(RequestBody::Form(fields));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.data = Some(RequestBody::Raw(body.into()));
        self
    }

    pub fn with_json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.auth = Some(Auth::Basic {
            username: username.into(),
            password,
        });
        self
    }

    pub fn with_bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(Auth::Bearer(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = Some(verify);
        self
    }

    pub fn with_allow_redirects(mut self, allow: bool) -> Self {
        self.allow_redirects = Some(allow);
        self
    }

    pub fn with_response_hook_kwarg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.response_hook_kwargs.insert(key.into(), value);
        self
    }

    pub fn with_error_hook_kwarg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.error_hook_kwargs.insert(key.into(), value);
        self
    }

    pub fn with_error_title(mut self, title: impl Into<String>) -> Self {
        self.error_title = Some(title.into());
        self
    }

    /// Info line of the failure log; `{name}` placeholders are filled from
    /// the error hook's detail map plus `exc`
    pub fn with_error_info(mut self, info: impl Into<String>) -> Self {
        self.error_info = Some(info.into());
        self
    }

    pub fn with_raise_exc(mut self, raise: impl Into<Raise>) -> Self {
        self.raise_exc = raise.into();
        self
    }
}

/// HTTP client sharing the process-wide [`Session`]
///
/// Every failure is logged once as a single multi-part record, then either
/// swallowed or surfaced according to the call's raise directive.
pub struct RequestClient {
    session: Arc<Session>,
    verify: bool,
    timeout: Duration,
    default_error_kind: ErrorKind,
    log: Arc<dyn LogSink>,
}

impl RequestClient {
    pub fn new(settings: &dyn Settings) -> Self {
        Self::with_session(Session::global(), settings)
    }

    pub fn with_session(session: Arc<Session>, settings: &dyn Settings) -> Self {
        Self {
            session,
            verify: settings.verify_tls(),
            timeout: settings.timeout(),
            default_error_kind: ErrorKind::REQUEST,
            log: Arc::new(TracingSink),
        }
    }

    pub fn with_error_kind(mut self, kind: ErrorKind) -> Self {
        self.default_error_kind = kind;
        self
    }

    pub fn with_log_sink(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = log;
        self
    }

    pub fn default_error_kind(&self) -> ErrorKind {
        self.default_error_kind
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Release this client; the shared session stays open for other clients
    pub fn close(self) {
        debug!("Request client closed");
    }

    /// Perform a request with the default status-checking hook
    ///
    /// Returns `Ok(None)` when the request failed and nothing was raised.
    pub async fn request(&self, url: &str, options: RequestOptions) -> Result<Option<Response>> {
        self.request_with(url, options, &RaiseForStatus, None).await
    }

    /// Perform a request, post-processing the response with `response_hook`
    pub async fn request_with<H>(
        &self,
        url: &str,
        options: RequestOptions,
        response_hook: &H,
        error_hook: Option<&dyn ErrorHook<H::Output>>,
    ) -> Result<Option<H::Output>>
    where
        H: ResponseHook,
        H::Output: Debug,
    {
        let RequestOptions {
            method,
            params,
            data,
            json,
            headers,
            cookies,
            auth,
            timeout,
            verify,
            allow_redirects,
            response_hook_kwargs,
            error_hook_kwargs,
            error_title,
            error_info,
            raise_exc,
        } = options;

        let parts = RequestParts {
            params,
            data,
            json,
            headers,
            cookies,
            auth,
            timeout: timeout.unwrap_or(self.timeout),
        };
        let verify = verify.unwrap_or(self.verify);
        let allow_redirects = allow_redirects.unwrap_or(true);

        let outcome = async {
            let response = self
                .execute(url, method.clone(), parts, verify, allow_redirects)
                .await?;
            let ctx = HookContext {
                url,
                method: &method,
                kwargs: &response_hook_kwargs,
            };
            response_hook.on_response(response, &ctx).await
        }
        .await;

        match outcome {
            Ok(output) => Ok(Some(output)),
            Err(error) => {
                let ctx = HookContext {
                    url,
                    method: &method,
                    kwargs: &error_hook_kwargs,
                };
                self.handle_failure(error, &ctx, error_hook, error_title, error_info, raise_exc)
            }
        }
    }

    async fn execute(
        &self,
        url: &str,
        method: Method,
        parts: RequestParts,
        verify: bool,
        allow_redirects: bool,
    ) -> Result<Response> {
        let adapter = self.session.adapter(url, verify, allow_redirects)?;
        let request = parts.build(&adapter.client, method, url)?;
        Ok(adapter.service.oneshot(request).await?)
    }

    fn handle_failure<T: Debug>(
        &self,
        error: RequestError,
        ctx: &HookContext<'_>,
        error_hook: Option<&dyn ErrorHook<T>>,
        error_title: Option<String>,
        error_info: Option<String>,
        raise_exc: Raise,
    ) -> Result<Option<T>> {
        self.session.metrics().request_failed();

        let mut title = error_title;
        let mut info = error_info;
        let mut raise = raise_exc;
        let mut response: Option<T> = None;
        let mut response_text = error.response_body().map(str::to_owned);
        let mut stack_trace = report::format_stack(&Backtrace::force_capture());
        let mut details = BTreeMap::from([("exc".to_string(), error.to_string())]);

        if let Some(hook) = error_hook {
            let ErrorOverride {
                title: hook_title,
                info: hook_info,
                detail,
                response: hook_response,
                trace,
                raise: hook_raise,
            } = hook.on_error(&error, response_text.as_deref(), ctx);

            title = hook_title.or(title);
            info = hook_info.or(info);
            if let Some(detail) = detail {
                details.extend(detail);
            }
            if let Some(fallback) = hook_response {
                response_text = Some(format!("{fallback:?}"));
                response = Some(fallback);
            }
            if let Some(trace) = trace {
                stack_trace = trace;
            }
            if let Some(hook_raise) = hook_raise {
                raise = hook_raise;
            }
        }

        let title = title.unwrap_or_else(|| DEFAULT_ERROR_TITLE.to_string());
        let info = match info {
            None => error.to_string(),
            Some(template) => {
                report::format_template(&template, &details).unwrap_or_else(|| error.to_string())
            }
        };

        let record = FailureReport {
            title: title.clone(),
            info,
            response_text,
            stack_trace: Some(stack_trace),
            traceback: report::format_chain(&error),
        };
        self.log.error(&record.render());

        match self.resolve_raise(raise, &title, error) {
            Some(raised) => Err(raised),
            None => Ok(response),
        }
    }

    fn resolve_raise(&self, raise: Raise, title: &str, original: RequestError) -> Option<RequestError> {
        match raise {
            Raise::Never => None,
            Raise::Default => {
                Some(RequestError::raised(self.default_error_kind, title).caused_by(original))
            }
            Raise::Factory(factory) => Some(factory(title).caused_by(original)),
            Raise::Instance(error) => Some(error.caused_by(original)),
        }
    }
}

struct RequestParts {
    params: Vec<(String, String)>,
    data: Option<RequestBody>,
    json: Option<Value>,
    headers: Vec<(String, String)>,
    cookies: Vec<(String, String)>,
    auth: Option<Auth>,
    timeout: Duration,
}

impl RequestParts {
    fn build(self, client: &Client, method: Method, url: &str) -> Result<reqwest::Request> {
        let mut builder = client.request(method, url).timeout(self.timeout);

        if !self.params.is_empty() {
            builder = builder.query(&self.params);
        }

        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(COOKIE, cookie);
        }

        builder = match self.auth {
            Some(Auth::Basic { username, password }) => builder.basic_auth(username, password),
            Some(Auth::Bearer(token)) => builder.bearer_auth(token),
            None => builder,
        };

        builder = match (self.data, self.json) {
            (Some(RequestBody::Form(fields)), _) => builder.form(&fields),
            (Some(RequestBody::Raw(body)), _) => builder.body(body),
            (None, Some(json)) => builder.json(&json),
            (None, None) => builder,
        };

        Ok(builder.build()?)
    }
}
