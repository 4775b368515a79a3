//! HTTP primitives used by the request engine.
//!
//! [`HttpTransport`] is the seam: the engine only needs "send one request,
//! get a response or a transport fault". [`CurlTransport`] is the default
//! libcurl-backed implementation.

mod curl_transport;
mod headers;
mod message;
mod transport;

pub use curl_transport::CurlTransport;
pub use headers::{Headers, InvalidHeader};
pub use message::{HttpRequest, HttpResponse};
pub use transport::{HttpTransport, TransportError, TransportErrorKind};
