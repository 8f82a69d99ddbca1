//! HTTP Client Layer
//!
//! Typed REST calls against the portfolio backend. The wire transport is
//! a trait so hosts and tests can swap it; header assembly, status mapping
//! and response decoding live in `ApiClient`.

mod transport;
mod error;
mod client;
mod credentials;
mod envelope;
mod contact;
mod http;

pub use transport::{FormValue, HttpRequest, HttpResponse, Method, MultipartForm, RequestBody, Transport, TransportError};
pub use error::ApiError;
pub use client::{ApiCall, ApiClient};
pub use credentials::{CredentialStore, MemoryCredentials};
#[cfg(not(target_arch = "wasm32"))]
pub use credentials::FileCredentials;
pub use envelope::{decode_list, decode_one, unwrap_envelope, ListPage};
pub use contact::ContactMessage;
pub use http::ReqwestTransport;
