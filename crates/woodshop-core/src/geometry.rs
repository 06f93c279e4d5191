//! Axis-aligned part placement.
//!
//! x runs along the width (left to right), y along the depth (front y = 0
//! to back) and z up from the floor. All values are millimeters.

use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};

/// A point in model space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Size of an axis-aligned box along x, y and z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extents3 {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Extents3 {
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    /// Extents in ascending order, for orientation-free comparisons.
    pub fn sorted(&self) -> [f64; 3] {
        let mut dims = [self.dx, self.dy, self.dz];
        dims.sort_by(f64::total_cmp);
        dims
    }

    pub fn volume(&self) -> f64 {
        self.dx * self.dy * self.dz
    }
}

/// One board in a construction plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardPlacement {
    /// Instance name shown in the model, e.g. "Shelf 2"
    pub name: String,
    /// Name of the cut-list entry this board is cut from
    pub part: String,
    /// Minimum corner of the box before any tilt
    pub origin: Point3,
    /// Box size along x, y and z
    pub size: Extents3,
    /// Tilt about the x axis through `origin`, in degrees
    #[serde(default)]
    pub rotation_x_deg: f64,
}

impl BoardPlacement {
    /// Far corner of the untilted box.
    pub fn max_corner(&self) -> Point3 {
        Point3::new(
            self.origin.x + self.size.dx,
            self.origin.y + self.size.dy,
            self.origin.z + self.size.dz,
        )
    }

    /// Whether the interiors of two untilted boxes intersect.
    ///
    /// Touching faces do not count; `tolerance` absorbs rounding.
    pub fn overlaps(&self, other: &BoardPlacement, tolerance: f64) -> bool {
        let a_max = self.max_corner();
        let b_max = other.max_corner();
        self.origin.x < b_max.x - tolerance
            && other.origin.x < a_max.x - tolerance
            && self.origin.y < b_max.y - tolerance
            && other.origin.y < a_max.y - tolerance
            && self.origin.z < b_max.z - tolerance
            && other.origin.z < a_max.z - tolerance
    }
}

/// Collects board placements in emission order.
///
/// Every box is checked before it is accepted; a rejected box is a fault in
/// the calling derivation, not a user error.
#[derive(Debug, Default)]
pub struct PartPlacer {
    boards: Vec<BoardPlacement>,
}

impl PartPlacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an untilted board.
    pub fn place(
        &mut self,
        name: impl Into<String>,
        part: impl Into<String>,
        origin: Point3,
        size: Extents3,
    ) -> GeometryResult<()> {
        self.place_tilted(name, part, origin, size, 0.0)
    }

    /// Place a board tilted about the x axis through its origin.
    pub fn place_tilted(
        &mut self,
        name: impl Into<String>,
        part: impl Into<String>,
        origin: Point3,
        size: Extents3,
        rotation_x_deg: f64,
    ) -> GeometryResult<()> {
        let name = name.into();
        let board = BoardPlacement {
            part: part.into(),
            origin,
            size,
            rotation_x_deg,
            name,
        };
        check_box(&board.name, &board.origin, &board.size)?;
        if !rotation_x_deg.is_finite() {
            return Err(GeometryError::NonFinite {
                part: board.name,
                field: "rotation_x_deg",
                value: rotation_x_deg,
            });
        }
        self.boards.push(board);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn finish(self) -> Vec<BoardPlacement> {
        self.boards
    }
}

/// Reject NaN/infinite coordinates and non-positive extents.
pub(crate) fn check_box(name: &str, origin: &Point3, size: &Extents3) -> GeometryResult<()> {
    let fields = [
        ("x", origin.x),
        ("y", origin.y),
        ("z", origin.z),
        ("dx", size.dx),
        ("dy", size.dy),
        ("dz", size.dz),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(GeometryError::NonFinite {
                part: name.to_string(),
                field,
                value,
            });
        }
    }
    if size.dx <= 0.0 || size.dy <= 0.0 || size.dz <= 0.0 {
        return Err(GeometryError::NonPositiveExtent {
            part: name.to_string(),
            dx: size.dx,
            dy: size.dy,
            dz: size.dz,
        });
    }
    Ok(())
}
