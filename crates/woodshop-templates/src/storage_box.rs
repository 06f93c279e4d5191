//! Storage box: four walls on a captured bottom, with an optional lid.
//!
//! The front and back run the full width; the sides sit between them. The lid
//! overhangs by [`LID_OVERHANG`] on every side and is drawn floating above the
//! walls by the `lid_display_gap` option so the open box stays visible. Set the
//! gap to 0 to seat the lid.

use crate::error::{DimensionError, Result};
use crate::registry::TemplateKind;
use crate::request::{require_length, TemplateBase, TemplateDefaults, TemplateRequest};
use crate::template::{piece, ProjectTemplate};
use serde::{Deserialize, Serialize};
use woodshop_core::{
    format_mm, CutList, Extents3, GeometryResult, JointMarker, PartPlacer, Point3,
    MARKER_THICKNESS,
};

/// Default visual gap between the walls and the lid (mm).
pub const BOX_LID_DISPLAY_GAP: f64 = 20.0;

/// Lid overhang past each wall (mm).
pub const LID_OVERHANG: f64 = 5.0;

/// Smallest interior width, depth and height (mm).
pub const MIN_INTERIOR: f64 = 10.0;

const DEFAULTS: TemplateDefaults = TemplateDefaults {
    width: 200.0,
    height: 100.0,
    depth: 150.0,
    lumber: "90x12",
    joinery: "finger_joint",
    material: "pine",
};

/// Box options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageBoxOptions {
    /// Include a lid
    pub has_lid: bool,
    /// Height the lid is drawn above the walls (mm, display only)
    pub lid_display_gap: f64,
}

impl Default for StorageBoxOptions {
    fn default() -> Self {
        Self {
            has_lid: true,
            lid_display_gap: BOX_LID_DISPLAY_GAP,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageBoxTemplate {
    base: TemplateBase,
    options: StorageBoxOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageBoxGeometry {
    pub wall_height: f64,
    pub interior_width: f64,
    pub interior_depth: f64,
}

impl StorageBoxTemplate {
    pub fn new(base: TemplateBase, options: StorageBoxOptions) -> Result<Self> {
        require_length("box", "lid_display_gap", options.lid_display_gap, 0.0)?;
        Ok(Self { base, options })
    }

    pub fn from_request(request: &TemplateRequest) -> Result<Self> {
        let options = request.parse_options("box")?;
        Self::new(TemplateBase::from_request(request, &DEFAULTS)?, options)
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            TemplateBase::from_defaults(&DEFAULTS)?,
            StorageBoxOptions::default(),
        )
    }

    pub fn options(&self) -> &StorageBoxOptions {
        &self.options
    }
}

impl ProjectTemplate for StorageBoxTemplate {
    type Geometry = StorageBoxGeometry;

    fn kind(&self) -> TemplateKind {
        TemplateKind::StorageBox
    }

    fn base(&self) -> &TemplateBase {
        &self.base
    }

    fn derive_geometry(&self) -> std::result::Result<StorageBoxGeometry, DimensionError> {
        let b = &self.base;
        let t = b.t();
        let lid = if self.options.has_lid { t } else { 0.0 };

        let wall_height = b.height - lid;
        if wall_height - t < MIN_INTERIOR {
            return Err(DimensionError::Constraint(format!(
                "Height {}mm is too small for a box with {}mm lumber{}. \
                 Minimum height required: {}mm",
                format_mm(b.height),
                format_mm(t),
                if self.options.has_lid { " and lid" } else { "" },
                format_mm(MIN_INTERIOR + t + lid)
            )));
        }

        let interior_width = b.width - 2.0 * t;
        let interior_depth = b.depth - 2.0 * t;
        if interior_width < MIN_INTERIOR || interior_depth < MIN_INTERIOR {
            return Err(DimensionError::Constraint(format!(
                "Width ({}mm) or depth ({}mm) is too small for {}mm lumber. \
                 Minimum required: {}mm",
                format_mm(b.width),
                format_mm(b.depth),
                format_mm(t),
                format_mm(2.0 * t + MIN_INTERIOR)
            )));
        }

        Ok(StorageBoxGeometry {
            wall_height,
            interior_width,
            interior_depth,
        })
    }

    fn emit_placements(&self, g: &StorageBoxGeometry, placer: &mut PartPlacer) -> GeometryResult<()> {
        let b = &self.base;
        let t = b.t();
        let front = Extents3::new(b.width, t, g.wall_height);
        let side = Extents3::new(t, g.interior_depth, g.wall_height);

        placer.place("Front", "Front/Back Panel", Point3::ORIGIN, front)?;
        placer.place("Back", "Front/Back Panel", Point3::new(0.0, b.depth - t, 0.0), front)?;
        placer.place("Left Side", "Side Panel", Point3::new(0.0, t, 0.0), side)?;
        placer.place("Right Side", "Side Panel", Point3::new(b.width - t, t, 0.0), side)?;
        placer.place(
            "Bottom",
            "Bottom",
            Point3::new(t, t, 0.0),
            Extents3::new(g.interior_width, g.interior_depth, t),
        )?;

        if self.options.has_lid {
            placer.place(
                "Lid",
                "Lid",
                Point3::new(
                    -LID_OVERHANG,
                    -LID_OVERHANG,
                    g.wall_height + self.options.lid_display_gap,
                ),
                Extents3::new(
                    b.width + 2.0 * LID_OVERHANG,
                    b.depth + 2.0 * LID_OVERHANG,
                    t,
                ),
            )?;
        }
        Ok(())
    }

    fn emit_markers(&self, g: &StorageBoxGeometry) -> Vec<JointMarker> {
        let b = &self.base;
        let t = b.t();
        let m = MARKER_THICKNESS;
        let corner = Extents3::new(t, m, g.wall_height);
        let joint = b.joinery.as_str();

        // Corners on the outer faces of the front and back.
        let mut markers = vec![
            JointMarker::new("Corner Front-Left", joint, Point3::new(0.0, -m, 0.0), corner),
            JointMarker::new(
                "Corner Front-Right",
                joint,
                Point3::new(b.width - t, -m, 0.0),
                corner,
            ),
            JointMarker::new("Corner Back-Left", joint, Point3::new(0.0, b.depth, 0.0), corner),
            JointMarker::new(
                "Corner Back-Right",
                joint,
                Point3::new(b.width - t, b.depth, 0.0),
                corner,
            ),
        ];

        // Bottom rabbets along the inner faces of the walls.
        let along_x = Extents3::new(g.interior_width, m, t);
        let along_y = Extents3::new(m, g.interior_depth, t);
        markers.extend([
            JointMarker::new("Bottom Front", "rabbet", Point3::new(t, t, 0.0), along_x),
            JointMarker::new(
                "Bottom Back",
                "rabbet",
                Point3::new(t, b.depth - t - m, 0.0),
                along_x,
            ),
            JointMarker::new("Bottom Left", "rabbet", Point3::new(t, t, 0.0), along_y),
            JointMarker::new(
                "Bottom Right",
                "rabbet",
                Point3::new(b.width - t - m, t, 0.0),
                along_y,
            ),
        ]);
        markers
    }

    fn build_cut_list(&self, g: &StorageBoxGeometry) -> GeometryResult<CutList> {
        let b = &self.base;
        let t = b.t();
        let mut list = CutList::new();
        list.add(
            piece(b, "Front/Back Panel", g.wall_height, t, b.width, 2)
                .with_notes(format!("Front and back, {} corners", b.joinery)),
        )?;
        list.add(
            piece(b, "Side Panel", g.wall_height, t, g.interior_depth, 2)
                .with_notes(format!("Left and right sides, {} corners", b.joinery)),
        )?;
        list.add(
            piece(b, "Bottom", g.interior_depth, t, g.interior_width, 1)
                .with_notes("Bottom panel, rabbeted into the walls"),
        )?;
        if self.options.has_lid {
            list.add(
                piece(
                    b,
                    "Lid",
                    b.depth + 2.0 * LID_OVERHANG,
                    t,
                    b.width + 2.0 * LID_OVERHANG,
                    1,
                )
                .with_notes(format!("Lid with {}mm overhang", format_mm(LID_OVERHANG))),
            )?;
        }
        Ok(list)
    }

    fn operation_name(&self, _g: &StorageBoxGeometry) -> String {
        format!(
            "Box {}x{}x{}",
            format_mm(self.base.width),
            format_mm(self.base.height),
            format_mm(self.base.depth)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::PlanOutcome;

    fn lid_z(template: &StorageBoxTemplate) -> f64 {
        let PlanOutcome::Built { plan, .. } = template.plan().unwrap() else {
            panic!("expected a plan");
        };
        plan.boards
            .iter()
            .find(|b| b.name == "Lid")
            .map(|b| b.origin.z)
            .unwrap()
    }

    #[test]
    fn test_wall_height_leaves_room_for_lid() {
        let g = StorageBoxTemplate::with_defaults()
            .unwrap()
            .derive_geometry()
            .unwrap();
        assert_eq!(g.wall_height, 88.0);
        assert_eq!(g.interior_width, 176.0);
        assert_eq!(g.interior_depth, 126.0);
    }

    #[test]
    fn test_lid_display_gap_is_overridable() {
        let floating = StorageBoxTemplate::with_defaults().unwrap();
        assert_eq!(lid_z(&floating), 88.0 + BOX_LID_DISPLAY_GAP);

        let request = TemplateRequest::new("box")
            .with_lumber("90x12")
            .with_option("lid_display_gap", 0.0);
        let seated = StorageBoxTemplate::from_request(&request).unwrap();
        assert_eq!(lid_z(&seated), 88.0);
    }

    #[test]
    fn test_negative_gap_rejected() {
        let request = TemplateRequest::new("box").with_option("lid_display_gap", -1.0);
        assert!(StorageBoxTemplate::from_request(&request).is_err());
    }

    #[test]
    fn test_shallow_box_rejected() {
        let request = TemplateRequest::new("box")
            .with_lumber("90x12")
            .with_dimensions(200.0, 30.0, 150.0);
        let template = StorageBoxTemplate::from_request(&request).unwrap();
        let err = template.validate().unwrap_err();
        assert!(err.to_string().contains("Minimum height required: 34mm"));
    }
}
