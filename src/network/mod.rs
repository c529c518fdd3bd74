//! HTTP access shared by every provider
//!
//! [`RequestClient`] wraps a process-wide [`Session`]: pooled, retrying
//! adapters for mounted URL prefixes, response hooks to post-process results
//! and error hooks to shape the failure log and what gets raised.

mod client;
mod error;
mod hooks;
mod report;
mod retry;
mod session;

pub use client::{Auth, RequestBody, RequestClient, RequestOptions};
pub use error::{ErrorKind, RequestError, Result};
pub use hooks::{
    ErrorFactory, ErrorHook, ErrorOverride, HookArgs, HookContext, JsonHook, Raise,
    RaiseForStatus, ResponseHook, check_status,
};
pub use report::DEFAULT_ERROR_TITLE;
pub use retry::RetryPolicy;
pub use session::Session;
