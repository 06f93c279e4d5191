//! Joint markers.
//!
//! Markers are thin coloured boxes drawn where two parts meet, so the joint
//! locations are visible in the model. They never appear in the cut list.

use crate::error::GeometryResult;
use crate::geometry::{check_box, Extents3, Point3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Thickness of every marker box (mm).
pub const MARKER_THICKNESS: f64 = 0.5;

/// Joint kinds with a dedicated marker colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointType {
    Dado,
    Rabbet,
    FingerJoint,
    Miter,
    MortiseTenon,
    Butt,
    Bracket,
}

impl JointType {
    pub const ALL: [JointType; 7] = [
        JointType::Dado,
        JointType::Rabbet,
        JointType::FingerJoint,
        JointType::Miter,
        JointType::MortiseTenon,
        JointType::Butt,
        JointType::Bracket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JointType::Dado => "dado",
            JointType::Rabbet => "rabbet",
            JointType::FingerJoint => "finger_joint",
            JointType::Miter => "miter",
            JointType::MortiseTenon => "mortise_tenon",
            JointType::Butt => "butt",
            JointType::Bracket => "bracket",
        }
    }

    /// Map a joinery tag to a joint type; unknown tags draw as butt joints.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|j| j.as_str() == tag)
            .unwrap_or(JointType::Butt)
    }

    /// Marker colour as `#RRGGBB`.
    pub fn color(&self) -> &'static str {
        match self {
            JointType::Dado => "#D9534F",
            JointType::Rabbet => "#337AB7",
            JointType::FingerJoint => "#F0AD4E",
            JointType::Miter => "#8E44AD",
            JointType::MortiseTenon => "#5CB85C",
            JointType::Butt => "#95A5A6",
            JointType::Bracket => "#F1C40F",
        }
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named marker box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointMarker {
    pub name: String,
    /// Joinery tag as requested; may be a tag with no palette entry
    pub joint_type: String,
    pub position: Point3,
    pub size: Extents3,
}

impl JointMarker {
    pub fn new(
        name: impl Into<String>,
        joint_type: impl Into<String>,
        position: Point3,
        size: Extents3,
    ) -> Self {
        Self {
            name: name.into(),
            joint_type: joint_type.into(),
            position,
            size,
        }
    }

    pub fn kind(&self) -> JointType {
        JointType::from_tag(&self.joint_type)
    }

    pub fn color(&self) -> &'static str {
        self.kind().color()
    }
}

/// A marker ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPlacement {
    pub name: String,
    pub joint: JointType,
    pub color: String,
    pub origin: Point3,
    pub size: Extents3,
}

/// Translate markers into placements.
///
/// Returns nothing when `enabled` is false.
pub fn plan_markers(markers: &[JointMarker], enabled: bool) -> GeometryResult<Vec<MarkerPlacement>> {
    if !enabled {
        return Ok(Vec::new());
    }
    markers
        .iter()
        .map(|m| {
            check_box(&m.name, &m.position, &m.size)?;
            let joint = m.kind();
            Ok(MarkerPlacement {
                name: m.name.clone(),
                joint,
                color: joint.color().to_string(),
                origin: m.position,
                size: m.size,
            })
        })
        .collect()
}
