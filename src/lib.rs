//! Region check service library.
//!
//! Evaluates whether a point `(x, y)` lies inside a region built from a
//! radius `r` (or whether `x`, `y`, `r` form a triangle) and reports the
//! verdict as JSON with a timestamp and execution time.

pub mod cgi;
pub mod check;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use check::CheckService;
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
