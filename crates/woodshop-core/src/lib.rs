//! # Woodshop Core
//!
//! Building blocks shared by every project template:
//!
//! - **Lumber**: parsing `WIDTHxTHICKNESS` stock descriptors
//! - **Geometry**: points, extents and validated board placements
//! - **Joints**: joint-type palette and marker placement
//! - **Cut lists**: ordered, quantified lumber pieces, checked against the
//!   placements they were derived for

pub mod cut_list;
pub mod error;
pub mod geometry;
pub mod joints;
pub mod lumber;
pub mod plan;

pub use cut_list::{glue_up_note, CutList, LumberPiece};
pub use error::{GeometryError, GeometryResult, LumberError, LumberResult};
pub use geometry::{BoardPlacement, Extents3, PartPlacer, Point3};
pub use joints::{plan_markers, JointMarker, JointType, MarkerPlacement, MARKER_THICKNESS};
pub use lumber::{format_mm, LumberSpec};
pub use plan::verify_cut_list;
