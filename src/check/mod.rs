//! Region check core.
//!
//! # Data Flow
//! ```text
//! raw parameter bytes (query string or POST body)
//!     → decoder.rs   (percent-decoding into a ParameterMap)
//!     → validator.rs (x, y, r as finite f64)
//!     → predicate.rs (quadrant hit or triangle existence)
//!     → formatter.rs (envelope → JSON → framing)
//!     → response bytes
//! ```
//!
//! # Design Decisions
//! - Every request yields exactly one envelope; errors become failure
//!   envelopes with a 400 status, never panics or 5xx
//! - Strategies (predicate, labels, framing, timing) are plain enums chosen
//!   by configuration; the pipeline itself exists once
//! - Nothing here keeps state between requests

pub mod decoder;
pub mod error;
pub mod formatter;
pub mod predicate;
pub mod service;
pub mod validator;

pub use decoder::{decode_params, ParameterMap};
pub use error::{CheckError, ErrorVerbosity, InputSource, ParameterError, GENERIC_REASON};
pub use formatter::{Envelope, FramingMode, LabelSet, ResponseFormatter, ResponsePayload, Status, TimingUnit};
pub use predicate::{quadrant_hit, triangle_exists, PredicateKind, Verdict};
pub use service::CheckService;
pub use validator::{validate, ValidatedInput};
