//! Error types for the core crate.
//!
//! Two families live here: stock-descriptor errors, which are caller
//! configuration mistakes, and geometry faults, which indicate a bug in the
//! code deriving a plan rather than bad input.

use thiserror::Error;

/// Errors raised while parsing a lumber stock descriptor such as `"90x19"`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LumberError {
    /// The descriptor is not two numbers separated by `x`.
    #[error("Invalid lumber size '{input}': expected WIDTHxTHICKNESS in millimeters (e.g. \"90x19\")")]
    InvalidFormat { input: String },

    /// Both parts parsed but at least one is zero, negative or not finite.
    #[error("Invalid lumber size '{input}': width and thickness must be positive (got {width}x{thickness})")]
    NonPositive {
        input: String,
        width: f64,
        thickness: f64,
    },
}

/// Faults detected while laying out parts or assembling a cut list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A coordinate or extent is NaN or infinite.
    #[error("Non-finite geometry for '{part}': {field} = {value}")]
    NonFinite {
        part: String,
        field: &'static str,
        value: f64,
    },

    /// A box was requested with a zero or negative extent.
    #[error("Non-positive extents for '{part}': {dx} x {dy} x {dz}")]
    NonPositiveExtent {
        part: String,
        dx: f64,
        dy: f64,
        dz: f64,
    },

    /// A cut-list entry failed its own invariants.
    #[error("Invalid cut-list piece '{name}': {reason}")]
    InvalidPiece { name: String, reason: String },

    /// Placements and cut list disagree about a part.
    #[error("Cut list does not match placements for '{part}': {reason}")]
    CutListMismatch { part: String, reason: String },
}

/// Result type alias for stock parsing.
pub type LumberResult<T> = Result<T, LumberError>;

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
