//! libcurl-backed transport.
//!
//! Each request runs on a blocking thread (`spawn_blocking`) with its own
//! `Easy` handle. Dropping the `send` future raises an abort flag that the
//! progress callback checks, so libcurl stops the transfer within about a
//! second instead of running to its timeout.

use async_trait::async_trait;
use curl::easy::{Easy, List};
use std::str;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::headers::Headers;
use super::message::{HttpRequest, HttpResponse};
use super::transport::{HttpTransport, TransportError, TransportErrorKind};

/// Default [`HttpTransport`]: follows redirects, applies connect/overall timeouts.
#[derive(Debug, Clone, Copy)]
pub struct CurlTransport {
    pub connect_timeout: Duration,
    /// Used when the request carries no timeout of its own.
    pub default_timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            default_timeout: Duration::from_secs(30),
        }
    }
}

impl CurlTransport {
    pub fn new(connect_timeout: Duration, default_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            default_timeout,
        }
    }
}

#[async_trait]
impl HttpTransport for CurlTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let transport = *self;
        let abort = Arc::new(AtomicBool::new(false));
        let _guard = AbortOnDrop(Arc::clone(&abort));
        tokio::task::spawn_blocking(move || transport.perform(&request, &abort))
            .await
            .map_err(|e| {
                TransportError::new(TransportErrorKind::Other, format!("transfer task failed: {e}"))
            })?
    }
}

/// Raises the flag when dropped, i.e. when `send` completes or its future is
/// dropped mid-transfer.
struct AbortOnDrop(Arc<AtomicBool>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl CurlTransport {
    fn perform(
        &self,
        request: &HttpRequest,
        abort: &AtomicBool,
    ) -> Result<HttpResponse, TransportError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = Easy::new();
        easy.url(&request.url).map_err(to_transport_error)?;
        if let Some(data) = &request.body {
            // Sets POST; the method below overrides it for PUT/PATCH/...
            easy.post_fields_copy(data).map_err(to_transport_error)?;
        }
        match request.method.as_str() {
            "GET" if request.body.is_none() => easy.get(true),
            "HEAD" => easy.nobody(true),
            "POST" => easy.post(true),
            other => easy.custom_request(other),
        }
        .map_err(to_transport_error)?;
        easy.follow_location(true).map_err(to_transport_error)?;
        easy.max_redirections(10).map_err(to_transport_error)?;
        easy.connect_timeout(self.connect_timeout)
            .map_err(to_transport_error)?;
        easy.timeout(request.timeout.unwrap_or(self.default_timeout))
            .map_err(to_transport_error)?;
        easy.progress(true).map_err(to_transport_error)?;

        let mut list = List::new();
        for (name, value) in request.headers.iter() {
            list.append(&format!("{}: {}", name.trim(), value.trim()))
                .map_err(to_transport_error)?;
        }
        if !request.headers.is_empty() {
            easy.http_headers(list).map_err(to_transport_error)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        header_lines.push(s.trim_end().to_string());
                    }
                    true
                })
                .map_err(to_transport_error)?;
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(to_transport_error)?;
            // Returning false aborts with CURLE_ABORTED_BY_CALLBACK.
            transfer
                .progress_function(|_, _, _, _| !abort.load(Ordering::Relaxed))
                .map_err(to_transport_error)?;
            transfer.perform().map_err(|e| {
                if e.is_aborted_by_callback() {
                    TransportError::new(TransportErrorKind::Other, "transfer abandoned by caller")
                } else {
                    to_transport_error(e)
                }
            })?;
        }

        let code = easy.response_code().map_err(to_transport_error)?;
        let status = u16::try_from(code).map_err(|_| {
            TransportError::new(TransportErrorKind::Other, format!("invalid status code {code}"))
        })?;
        Ok(HttpResponse {
            status,
            headers: parse_header_lines(&header_lines),
            body,
        })
    }
}

/// Headers of the final response. Redirects produce several header blocks;
/// each status line starts a new one.
fn parse_header_lines(lines: &[String]) -> Headers {
    let mut headers = Headers::new();
    for line in lines {
        if line.starts_with("HTTP/") {
            headers = Headers::new();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.append(name.trim(), value.trim());
        }
    }
    headers
}

fn to_transport_error(e: curl::Error) -> TransportError {
    TransportError::new(classify_curl_error(&e), e.to_string())
}

/// Map a curl error onto a transport fault kind.
pub(crate) fn classify_curl_error(e: &curl::Error) -> TransportErrorKind {
    if e.is_operation_timedout() {
        return TransportErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportErrorKind::Connection;
    }
    TransportErrorKind::Other
}
