//! Wall shelf: evenly spaced brackets under an optional shelf board.
//!
//! Each bracket stands in the y/z plane with the wall at `y = depth`.
//! Triangle brackets add a diagonal brace from the front of the support down
//! to the foot of the wall member; the brace is the only tilted board any
//! template emits.

use crate::error::{DimensionError, Result};
use crate::registry::TemplateKind;
use crate::request::{require_at_least, TemplateBase, TemplateDefaults, TemplateRequest};
use crate::template::{panel_notes, piece, ProjectTemplate};
use serde::{Deserialize, Serialize};
use woodshop_core::{
    format_mm, CutList, Extents3, GeometryResult, JointMarker, PartPlacer, Point3,
    MARKER_THICKNESS,
};

/// Shortest bracket height or depth (mm).
pub const MIN_BRACKET_SIZE: f64 = 100.0;

const DEFAULTS: TemplateDefaults = TemplateDefaults {
    width: 600.0,
    height: 200.0,
    depth: 200.0,
    lumber: "90x19",
    joinery: "bracket",
    material: "pine",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BracketStyle {
    #[default]
    #[serde(rename = "triangle")]
    Triangle,
    #[serde(rename = "l_bracket", alias = "L_bracket")]
    LBracket,
    #[serde(rename = "corbel")]
    Corbel,
}

impl BracketStyle {
    fn title(&self) -> &'static str {
        match self {
            BracketStyle::Triangle => "Triangle",
            BracketStyle::LBracket => "L Bracket",
            BracketStyle::Corbel => "Corbel",
        }
    }
}

/// Shelf bracket options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShelfBracketOptions {
    pub bracket_style: BracketStyle,
    /// Brackets along the shelf, at least 2
    pub bracket_count: u32,
    pub has_shelf: bool,
}

impl Default for ShelfBracketOptions {
    fn default() -> Self {
        Self {
            bracket_style: BracketStyle::Triangle,
            bracket_count: 2,
            has_shelf: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShelfBracketTemplate {
    base: TemplateBase,
    options: ShelfBracketOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShelfBracketGeometry {
    /// Left face of each bracket
    pub bracket_x: Vec<f64>,
    /// Horizontal run of the support in front of the wall member
    pub support_length: f64,
    pub brace_length: f64,
    /// Brace tilt below horizontal (degrees)
    pub brace_angle: f64,
}

impl ShelfBracketTemplate {
    pub fn new(base: TemplateBase, options: ShelfBracketOptions) -> Result<Self> {
        require_at_least("shelf_bracket", "bracket_count", options.bracket_count, 2)?;
        Ok(Self { base, options })
    }

    pub fn from_request(request: &TemplateRequest) -> Result<Self> {
        let options = request.parse_options("shelf_bracket")?;
        Self::new(TemplateBase::from_request(request, &DEFAULTS)?, options)
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            TemplateBase::from_defaults(&DEFAULTS)?,
            ShelfBracketOptions::default(),
        )
    }

    pub fn options(&self) -> &ShelfBracketOptions {
        &self.options
    }
}

impl ProjectTemplate for ShelfBracketTemplate {
    type Geometry = ShelfBracketGeometry;

    fn kind(&self) -> TemplateKind {
        TemplateKind::ShelfBracket
    }

    fn base(&self) -> &TemplateBase {
        &self.base
    }

    fn derive_geometry(&self) -> std::result::Result<ShelfBracketGeometry, DimensionError> {
        let b = &self.base;
        let (t, w) = (b.t(), b.w());
        let n = self.options.bracket_count;

        if b.height < MIN_BRACKET_SIZE {
            return Err(DimensionError::TooSmall {
                dimension: "Bracket height",
                value: b.height,
                minimum: MIN_BRACKET_SIZE,
            });
        }
        if b.depth < MIN_BRACKET_SIZE {
            return Err(DimensionError::TooSmall {
                dimension: "Bracket depth",
                value: b.depth,
                minimum: MIN_BRACKET_SIZE,
            });
        }
        if w >= b.height || w >= b.depth {
            return Err(DimensionError::Constraint(format!(
                "{}mm wide stock does not fit a {}x{}mm bracket",
                format_mm(w),
                format_mm(b.height),
                format_mm(b.depth)
            )));
        }

        let spacing = (b.width - t) / f64::from(n - 1);
        if spacing < t {
            return Err(DimensionError::Constraint(format!(
                "Shelf length {}mm is too short for {} brackets. Minimum length: {}mm",
                format_mm(b.width),
                n,
                format_mm(f64::from(n) * t)
            )));
        }

        let rise = b.height - w;
        let run = b.depth - w;
        Ok(ShelfBracketGeometry {
            bracket_x: (0..n).map(|i| f64::from(i) * spacing).collect(),
            support_length: run,
            brace_length: rise.hypot(run),
            brace_angle: rise.atan2(run).to_degrees(),
        })
    }

    fn emit_placements(
        &self,
        g: &ShelfBracketGeometry,
        placer: &mut PartPlacer,
    ) -> GeometryResult<()> {
        let b = &self.base;
        let (t, w) = (b.t(), b.w());

        for (i, x) in g.bracket_x.iter().enumerate() {
            let label = format!("Bracket {}", i + 1);
            if self.options.bracket_style == BracketStyle::Corbel {
                placer.place(
                    label,
                    "Corbel Bracket",
                    Point3::new(*x, 0.0, 0.0),
                    Extents3::new(t, b.depth, b.height),
                )?;
                continue;
            }

            placer.place(
                format!("{} Vertical", label),
                "Vertical (Wall Mount)",
                Point3::new(*x, b.depth - w, 0.0),
                Extents3::new(t, w, b.height),
            )?;
            placer.place(
                format!("{} Horizontal", label),
                "Horizontal (Support)",
                Point3::new(*x, 0.0, b.height - w),
                Extents3::new(t, g.support_length, w),
            )?;
            if self.options.bracket_style == BracketStyle::Triangle {
                placer.place_tilted(
                    format!("{} Brace", label),
                    "Diagonal (Brace)",
                    Point3::new(*x, 0.0, b.height - w),
                    Extents3::new(t, g.brace_length, w),
                    -g.brace_angle,
                )?;
            }
        }

        if self.options.has_shelf {
            placer.place(
                "Shelf Board",
                "Shelf Board",
                Point3::new(0.0, 0.0, b.height),
                Extents3::new(b.width, b.depth, t),
            )?;
        }
        Ok(())
    }

    fn emit_markers(&self, g: &ShelfBracketGeometry) -> Vec<JointMarker> {
        if !self.options.has_shelf {
            return Vec::new();
        }
        let b = &self.base;
        g.bracket_x
            .iter()
            .enumerate()
            .map(|(i, x)| {
                JointMarker::new(
                    format!("Bracket {} Shelf", i + 1),
                    b.joinery.as_str(),
                    Point3::new(*x, 0.0, b.height - MARKER_THICKNESS),
                    Extents3::new(b.t(), b.depth, MARKER_THICKNESS),
                )
            })
            .collect()
    }

    fn build_cut_list(&self, g: &ShelfBracketGeometry) -> GeometryResult<CutList> {
        let b = &self.base;
        let (t, w) = (b.t(), b.w());
        let n = self.options.bracket_count;
        let mut list = CutList::new();

        match self.options.bracket_style {
            BracketStyle::Corbel => {
                list.add(
                    piece(b, "Corbel Bracket", b.depth, t, b.height, n)
                        .with_notes(panel_notes(b, "Cut the corbel profile", b.depth)),
                )?;
            }
            style => {
                list.add(
                    piece(b, "Vertical (Wall Mount)", w, t, b.height, n)
                        .with_notes("Screw to the wall studs"),
                )?;
                list.add(
                    piece(b, "Horizontal (Support)", w, t, g.support_length, n)
                        .with_notes("Glue and screw into the wall member"),
                )?;
                if style == BracketStyle::Triangle {
                    list.add(
                        piece(b, "Diagonal (Brace)", w, t, g.brace_length, n).with_notes(format!(
                            "Cut both ends at {:.1} degrees",
                            g.brace_angle
                        )),
                    )?;
                }
            }
        }

        if self.options.has_shelf {
            list.add(
                piece(b, "Shelf Board", b.depth, t, b.width, 1)
                    .with_notes(panel_notes(b, "Rests on the brackets", b.depth)),
            )?;
        }
        Ok(list)
    }

    fn operation_name(&self, _g: &ShelfBracketGeometry) -> String {
        format!(
            "{} Shelf {}mm",
            self.options.bracket_style.title(),
            format_mm(self.base.width)
        )
    }
}
