//! Region predicates.
//!
//! # Quadrant hit
//! ```text
//!              y
//!              │
//!     empty    │ quarter disk, radius r/2
//!              │
//!   ───────────┼───────────── x
//!              │
//!   square     │ triangle under the line
//!   [-r,0]²    │ through (r/2, 0) and (0, -r)
//! ```
//!
//! # Design Decisions
//! - Total over all inputs, including negative `r`; boundaries are members
//! - Quadrants are tested in a fixed order so the axes belong to exactly one
//!   branch
//! - The empty quadrant is an explicit branch

use serde::{Deserialize, Serialize};

use crate::check::formatter::LabelSet;
use crate::check::validator::ValidatedInput;

/// Outcome of a predicate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Point inside the region, or sides forming a triangle.
    pub member: bool,
}

/// Which predicate a deployment answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    #[default]
    QuadrantHit,
    TriangleExistence,
}

impl PredicateKind {
    pub fn evaluate(self, input: &ValidatedInput) -> Verdict {
        let member = match self {
            PredicateKind::QuadrantHit => quadrant_hit(input.x, input.y, input.r),
            PredicateKind::TriangleExistence => triangle_exists(input.x, input.y, input.r),
        };
        Verdict { member }
    }

    /// Vocabulary a deployment of this predicate answers with by default.
    pub fn default_labels(self) -> LabelSet {
        match self {
            PredicateKind::QuadrantHit => LabelSet::Hit,
            PredicateKind::TriangleExistence => LabelSet::Result,
        }
    }

    /// Stable name used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            PredicateKind::QuadrantHit => "quadrant_hit",
            PredicateKind::TriangleExistence => "triangle_existence",
        }
    }
}

/// Point `(x, y)` inside the shaded area for radius `r`.
pub fn quadrant_hit(x: f64, y: f64, r: f64) -> bool {
    let half = r / 2.0;

    if x >= 0.0 && y >= 0.0 {
        return x * x + y * y <= half * half;
    }
    if x < 0.0 && y > 0.0 {
        return false;
    }
    if x <= 0.0 && y <= 0.0 {
        return x >= -r && y >= -r;
    }
    if x > 0.0 && y < 0.0 {
        return y >= 2.0 * x - r;
    }
    // Only NaN reaches here.
    false
}

/// Strictly positive `x`, `y`, `r` satisfying the triangle inequality.
pub fn triangle_exists(x: f64, y: f64, r: f64) -> bool {
    x > 0.0 && y > 0.0 && r > 0.0 && x + y > r && x + r > y && y + r > x
}
