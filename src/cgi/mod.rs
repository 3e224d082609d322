//! CGI transport.
//!
//! # Data Flow
//! ```text
//! web server spawns the process
//!     → CgiRequest::from_env (REQUEST_METHOD, CONTENT_LENGTH, QUERY_STRING)
//!     → stdin (POST body, exactly CONTENT_LENGTH bytes)
//!     → CheckService (one request)
//!     → stdout (framed per `service.framing`)
//! ```
//!
//! # Design Decisions
//! - One request per process; the web server owns the accept loop
//! - stdout carries only the response; logs go to stderr
//! - A missing or unparsable `CONTENT_LENGTH` means no body, not an error
//! - A `CONTENT_LENGTH` above `security.max_body_size` is not read at all;
//!   the request fails as if no body had been sent

use std::env;
use std::io::{self, Read, Write};
use std::time::Instant;

use crate::check::{CheckService, InputSource};

/// Request metadata a CGI host passes through the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CgiRequest {
    pub method: String,
    pub content_length: usize,
    pub query_string: Option<String>,
}

impl CgiRequest {
    /// Read the request from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a request from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let method = lookup("REQUEST_METHOD")
            .map(|m| m.trim().to_ascii_uppercase())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "POST".to_string());
        let content_length = lookup("CONTENT_LENGTH")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let query_string = lookup("QUERY_STRING").filter(|q| !q.is_empty());

        Self {
            method,
            content_length,
            query_string,
        }
    }

    /// Where this request's parameters come from.
    pub fn origin(&self) -> InputSource {
        if self.method == "GET" || self.method == "HEAD" {
            InputSource::Query
        } else {
            InputSource::Body
        }
    }
}

/// Serve one CGI request: read parameters, evaluate, write the framed response.
///
/// Only I/O failures on stdin/stdout are errors; every input problem becomes
/// a failure response. At most `max_body_size` bytes are read from stdin.
pub fn serve_one<R, W>(
    service: &CheckService,
    request: &CgiRequest,
    max_body_size: usize,
    stdin: R,
    mut stdout: W,
) -> io::Result<()>
where
    R: Read,
    W: Write,
{
    let started = Instant::now();
    let origin = request.origin();

    let body;
    let raw = match origin {
        InputSource::Query => request.query_string.as_deref().map(str::as_bytes),
        InputSource::Body if request.content_length > max_body_size => {
            tracing::warn!(
                content_length = request.content_length,
                limit = max_body_size,
                "CONTENT_LENGTH exceeds body limit, body not read"
            );
            None
        }
        InputSource::Body => {
            body = read_body(stdin, request.content_length)?;
            Some(body.as_slice())
        }
    };

    let response = service.handle_framed(raw, origin, started);
    stdout.write_all(&response)?;
    stdout.flush()?;

    tracing::info!(
        method = %request.method,
        origin = %origin,
        bytes = response.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "CGI request served"
    );
    Ok(())
}

/// Read up to `content_length` bytes; a short body is used as-is.
fn read_body<R: Read>(stdin: R, content_length: usize) -> io::Result<Vec<u8>> {
    let mut body = Vec::new();
    stdin.take(content_length as u64).read_to_end(&mut body)?;
    if body.len() < content_length {
        tracing::warn!(
            expected = content_length,
            received = body.len(),
            "Body shorter than CONTENT_LENGTH"
        );
    }
    Ok(body)
}
