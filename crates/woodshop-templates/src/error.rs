//! Error types for the templates crate.
//!
//! Three outcomes are kept apart: construction errors ([`TemplateError`]),
//! designs that fail their structural minimums ([`DimensionError`], reported
//! as a failed `TemplateResult`), and geometry faults propagated from the
//! core crate.

use thiserror::Error;
use woodshop_core::{GeometryError, LumberError};

/// Errors raised while resolving a request into a template instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// No template is registered under the requested name.
    #[error("Unknown template type: '{name}'. Available: {available}")]
    UnknownTemplate { name: String, available: String },

    /// The per-template option set could not be parsed or is out of range.
    #[error("Invalid options for {template}: {reason}")]
    InvalidOptions { template: String, reason: String },

    /// A top-level dimension is zero, negative or not finite.
    #[error("Invalid {name}: {value}mm (must be a positive number of millimeters)")]
    InvalidDimension { name: &'static str, value: f64 },

    /// The lumber descriptor did not parse.
    #[error(transparent)]
    Lumber(#[from] LumberError),

    /// A geometry fault surfaced while planning.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// A design that cannot be built with the given dimensions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensionError {
    /// A single dimension is below its structural minimum.
    #[error("{dimension} {value}mm is too small. Minimum: {minimum}mm")]
    TooSmall {
        dimension: &'static str,
        value: f64,
        minimum: f64,
    },

    /// A rule involving several dimensions failed.
    #[error("{0}")]
    Constraint(String),
}

/// Result type alias for template construction.
pub type Result<T> = std::result::Result<T, TemplateError>;
