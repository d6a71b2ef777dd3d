//! HTTP transport for commerce API communication.
//!
//! This module provides the transport layer every SDK module sends its
//! requests through. It handles URL construction, header composition,
//! credential attachment, response parsing and optional retries.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`RequestAuth`]: Which credential a request carries
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods
//!
//! # Credential Attachment
//!
//! Requests default to [`RequestAuth::Ambient`]. In bearer mode the client
//! reads the shared [`CredentialStore`](crate::auth::CredentialStore) on every
//! request and sends `Authorization: Bearer <token>` when a token is present.
//! In session mode the reqwest cookie store replays the session cookie set by
//! the server instead.
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **500 (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Configure via
//! [`HttpRequest::builder`] with `.tries(n)` to enable retries.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, PUBLISHABLE_KEY_HEADER, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, RequestAuth};
pub use http_response::HttpResponse;
