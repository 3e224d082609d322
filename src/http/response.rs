//! Conversion of check payloads into HTTP responses.
//!
//! The HTTP server frames responses itself, so the configured framing mode
//! only applies to raw-byte transports; here the payload's status and body
//! map directly onto an axum response.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::check::{ResponsePayload, Status};

impl From<Status> for StatusCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Ok => StatusCode::OK,
            Status::BadRequest => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ResponsePayload {
    fn into_response(self) -> Response {
        let status = StatusCode::from(self.status);
        let content_type = HeaderValue::from_static(self.content_type());
        (status, [(header::CONTENT_TYPE, content_type)], self.body).into_response()
    }
}
