//! Error handling for SketchKit geometry
//!
//! The kernel never panics on degenerate input. Operations with no real
//! solution report it through [`GeometryError`] so callers can keep their
//! previous valid state.

use thiserror::Error;

/// Geometry error type
///
/// Raised by kernel functions whose construction has no solution for the
/// given input. Shape editing absorbs these locally and never surfaces them.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// The two constraint circles do not intersect.
    #[error("No arc center for radius {radius:.3}: half chord is {half_chord:.3}")]
    NoArcCenter {
        /// The requested radius.
        radius: f64,
        /// Half the distance between the two endpoints.
        half_chord: f64,
    },

    /// A segment whose direction is needed has coincident endpoints.
    #[error("Degenerate segment: endpoints coincide")]
    DegenerateSegment,
}

/// Result type for geometry constructions.
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
