//! Picture frame: four mitered rails standing upright, with glass, an
//! optional mat and a backing board seated in the rear rabbet.
//!
//! The frame lies in the x/z plane; depth is the rail thickness front to back.
//! Glass, mat and backing extend [`RABBET_OVERLAP`] under the rails on every
//! side and so intersect the rail boxes. Rails are modeled at their long-point
//! length, so neighbouring rails share the square at each mitered corner.

use crate::error::{DimensionError, Result};
use crate::registry::TemplateKind;
use crate::request::{require_length, TemplateBase, TemplateDefaults, TemplateRequest};
use crate::template::{piece, ProjectTemplate};
use serde::{Deserialize, Serialize};
use woodshop_core::{
    format_mm, CutList, Extents3, GeometryResult, JointMarker, LumberPiece, PartPlacer, Point3,
    MARKER_THICKNESS,
};

/// Face thickness always left in front of the rabbet (mm).
pub const MIN_FACE_THICKNESS: f64 = 5.0;

/// How far the glazing stack reaches under the rails on each side (mm).
pub const RABBET_OVERLAP: f64 = 2.0;

pub const GLASS_THICKNESS: f64 = 3.0;
pub const MAT_THICKNESS: f64 = 2.0;
pub const BACKING_THICKNESS: f64 = 3.0;

const DEFAULTS: TemplateDefaults = TemplateDefaults {
    width: 300.0,
    height: 400.0,
    depth: 20.0,
    lumber: "50x20",
    joinery: "miter",
    material: "oak",
};

/// Picture frame options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PictureFrameOptions {
    /// Rail face width (mm)
    pub frame_width: f64,
    /// Requested rabbet depth; capped to keep the face thickness (mm)
    pub rabbet_depth: f64,
    /// Mat border inside the opening; 0 for no mat (mm)
    pub mat_width: f64,
}

impl Default for PictureFrameOptions {
    fn default() -> Self {
        Self {
            frame_width: 50.0,
            rabbet_depth: 10.0,
            mat_width: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PictureFrameTemplate {
    base: TemplateBase,
    options: PictureFrameOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PictureFrameGeometry {
    pub rabbet: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub picture_width: f64,
    pub picture_height: f64,
}

impl PictureFrameTemplate {
    pub fn new(base: TemplateBase, options: PictureFrameOptions) -> Result<Self> {
        require_length("picture_frame", "frame_width", options.frame_width, 1.0)?;
        require_length("picture_frame", "rabbet_depth", options.rabbet_depth, 0.0)?;
        require_length("picture_frame", "mat_width", options.mat_width, 0.0)?;
        Ok(Self { base, options })
    }

    pub fn from_request(request: &TemplateRequest) -> Result<Self> {
        let options = request.parse_options("picture_frame")?;
        Self::new(TemplateBase::from_request(request, &DEFAULTS)?, options)
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            TemplateBase::from_defaults(&DEFAULTS)?,
            PictureFrameOptions::default(),
        )
    }

    pub fn options(&self) -> &PictureFrameOptions {
        &self.options
    }

    fn has_mat(&self) -> bool {
        self.options.mat_width > 0.0
    }

    /// Glazing layers front to back: (name, thickness, material).
    fn layers(&self) -> Vec<(&'static str, f64, &'static str)> {
        let mut layers = vec![("Glass", GLASS_THICKNESS, "glass")];
        if self.has_mat() {
            layers.push(("Mat", MAT_THICKNESS, "mat_board"));
        }
        layers.push(("Backing Board", BACKING_THICKNESS, "mdf"));
        layers
    }
}

impl ProjectTemplate for PictureFrameTemplate {
    type Geometry = PictureFrameGeometry;

    fn kind(&self) -> TemplateKind {
        TemplateKind::PictureFrame
    }

    fn base(&self) -> &TemplateBase {
        &self.base
    }

    fn derive_geometry(&self) -> std::result::Result<PictureFrameGeometry, DimensionError> {
        let b = &self.base;
        let fw = self.options.frame_width;

        let rabbet = self.options.rabbet_depth.min(b.depth - MIN_FACE_THICKNESS);
        if rabbet <= 0.0 {
            return Err(DimensionError::TooSmall {
                dimension: "Depth",
                value: b.depth,
                minimum: MIN_FACE_THICKNESS + GLASS_THICKNESS + BACKING_THICKNESS,
            });
        }

        let inner_width = b.width - 2.0 * fw;
        let inner_height = b.height - 2.0 * fw;
        if inner_width <= 0.0 || inner_height <= 0.0 {
            return Err(DimensionError::Constraint(format!(
                "Frame {}x{}mm has no opening with {}mm rails. Minimum: {}x{}mm",
                format_mm(b.width),
                format_mm(b.height),
                format_mm(fw),
                format_mm(2.0 * fw + 1.0),
                format_mm(2.0 * fw + 1.0)
            )));
        }

        let mat = self.options.mat_width;
        let picture_width = inner_width - 2.0 * mat;
        let picture_height = inner_height - 2.0 * mat;
        if picture_width <= 0.0 || picture_height <= 0.0 {
            return Err(DimensionError::Constraint(format!(
                "A {}mm mat closes the {}x{}mm opening",
                format_mm(mat),
                format_mm(inner_width),
                format_mm(inner_height)
            )));
        }

        let stack: f64 = self.layers().iter().map(|(_, thickness, _)| thickness).sum();
        if rabbet < stack {
            return Err(DimensionError::Constraint(format!(
                "Rabbet depth {}mm is too shallow for {}mm of glass, mat and backing",
                format_mm(rabbet),
                format_mm(stack)
            )));
        }

        Ok(PictureFrameGeometry {
            rabbet,
            inner_width,
            inner_height,
            picture_width,
            picture_height,
        })
    }

    fn emit_placements(
        &self,
        g: &PictureFrameGeometry,
        placer: &mut PartPlacer,
    ) -> GeometryResult<()> {
        let b = &self.base;
        let fw = self.options.frame_width;

        let rail = Extents3::new(b.width, b.depth, fw);
        placer.place("Top Rail", "Top/Bottom Rail", Point3::new(0.0, 0.0, b.height - fw), rail)?;
        placer.place("Bottom Rail", "Top/Bottom Rail", Point3::ORIGIN, rail)?;
        let side = Extents3::new(fw, b.depth, b.height);
        placer.place("Left Rail", "Side Rail", Point3::ORIGIN, side)?;
        placer.place("Right Rail", "Side Rail", Point3::new(b.width - fw, 0.0, 0.0), side)?;

        let mut y = b.depth - g.rabbet;
        for (name, thickness, _) in self.layers() {
            placer.place(
                name,
                name,
                Point3::new(fw - RABBET_OVERLAP, y, fw - RABBET_OVERLAP),
                Extents3::new(
                    g.inner_width + 2.0 * RABBET_OVERLAP,
                    thickness,
                    g.inner_height + 2.0 * RABBET_OVERLAP,
                ),
            )?;
            y += thickness;
        }
        Ok(())
    }

    fn emit_markers(&self, g: &PictureFrameGeometry) -> Vec<JointMarker> {
        let b = &self.base;
        let fw = self.options.frame_width;
        let m = MARKER_THICKNESS;
        let joint = b.joinery.as_str();
        let corner = Extents3::new(fw, m, fw);
        let front = -m;

        let mut markers = vec![
            JointMarker::new("Miter Bottom-Left", joint, Point3::new(0.0, front, 0.0), corner),
            JointMarker::new(
                "Miter Bottom-Right",
                joint,
                Point3::new(b.width - fw, front, 0.0),
                corner,
            ),
            JointMarker::new(
                "Miter Top-Left",
                joint,
                Point3::new(0.0, front, b.height - fw),
                corner,
            ),
            JointMarker::new(
                "Miter Top-Right",
                joint,
                Point3::new(b.width - fw, front, b.height - fw),
                corner,
            ),
        ];

        // Rabbet ledges on the inner edges at the back of the rails.
        let y = b.depth - g.rabbet;
        let along_x = Extents3::new(g.inner_width, g.rabbet, m);
        let along_z = Extents3::new(m, g.rabbet, g.inner_height);
        markers.extend([
            JointMarker::new("Rabbet Bottom", "rabbet", Point3::new(fw, y, fw), along_x),
            JointMarker::new(
                "Rabbet Top",
                "rabbet",
                Point3::new(fw, y, b.height - fw - m),
                along_x,
            ),
            JointMarker::new("Rabbet Left", "rabbet", Point3::new(fw, y, fw), along_z),
            JointMarker::new(
                "Rabbet Right",
                "rabbet",
                Point3::new(b.width - fw - m, y, fw),
                along_z,
            ),
        ]);
        markers
    }

    fn build_cut_list(&self, g: &PictureFrameGeometry) -> GeometryResult<CutList> {
        let b = &self.base;
        let fw = self.options.frame_width;
        let rabbet_note = format!("{}mm deep rabbet at the back", format_mm(g.rabbet));
        let mut list = CutList::new();
        list.add(
            piece(b, "Top/Bottom Rail", fw, b.depth, b.width, 2).with_notes(format!(
                "45 degree {}, {}mm long point to long point; {}",
                b.joinery,
                format_mm(b.width),
                rabbet_note
            )),
        )?;
        list.add(
            piece(b, "Side Rail", fw, b.depth, b.height, 2).with_notes(format!(
                "45 degree {}, {}mm long point to long point; {}",
                b.joinery,
                format_mm(b.height),
                rabbet_note
            )),
        )?;

        for (name, thickness, material) in self.layers() {
            let notes = if name == "Mat" {
                format!(
                    "{}mm border, {}x{}mm window",
                    format_mm(self.options.mat_width),
                    format_mm(g.picture_width),
                    format_mm(g.picture_height)
                )
            } else {
                "Seated in the rabbet".to_string()
            };
            list.add(
                LumberPiece::new(
                    name,
                    g.inner_width + 2.0 * RABBET_OVERLAP,
                    thickness,
                    g.inner_height + 2.0 * RABBET_OVERLAP,
                    1,
                    material,
                )
                .with_notes(notes),
            )?;
        }
        Ok(list)
    }

    fn operation_name(&self, _g: &PictureFrameGeometry) -> String {
        format!(
            "Picture Frame {}x{}",
            format_mm(self.base.width),
            format_mm(self.base.height)
        )
    }
}
