//! Cutting board glued up from parallel strips.
//!
//! The request height is the board thickness. Edge-grain strips run the full
//! depth; end-grain boards are drawn as the same strips with a note to
//! crosscut and rotate them before the second glue-up.

use crate::error::{DimensionError, Result};
use crate::registry::TemplateKind;
use crate::request::{require_at_least, TemplateBase, TemplateDefaults, TemplateRequest};
use crate::template::{piece, ProjectTemplate};
use serde::{Deserialize, Serialize};
use woodshop_core::{format_mm, CutList, Extents3, GeometryResult, PartPlacer, Point3};

/// Thinnest board accepted (mm).
pub const MIN_THICKNESS: f64 = 15.0;

/// Smallest board face in either direction (mm).
pub const MIN_FACE: f64 = 100.0;

const DEFAULTS: TemplateDefaults = TemplateDefaults {
    width: 400.0,
    height: 25.0,
    depth: 300.0,
    lumber: "90x25",
    joinery: "butt",
    material: "maple",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrainPattern {
    #[default]
    EdgeGrain,
    EndGrain,
}

impl GrainPattern {
    fn title(&self) -> &'static str {
        match self {
            GrainPattern::EdgeGrain => "Edge Grain",
            GrainPattern::EndGrain => "End Grain",
        }
    }
}

/// Cutting board options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CuttingBoardOptions {
    pub pattern: GrainPattern,
    /// Number of strips across the width
    pub stripe_count: u32,
}

impl Default for CuttingBoardOptions {
    fn default() -> Self {
        Self {
            pattern: GrainPattern::EdgeGrain,
            stripe_count: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CuttingBoardTemplate {
    base: TemplateBase,
    options: CuttingBoardOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CuttingBoardGeometry {
    pub strip_width: f64,
}

impl CuttingBoardTemplate {
    pub fn new(base: TemplateBase, options: CuttingBoardOptions) -> Result<Self> {
        require_at_least("cutting_board", "stripe_count", options.stripe_count, 1)?;
        Ok(Self { base, options })
    }

    pub fn from_request(request: &TemplateRequest) -> Result<Self> {
        let options = request.parse_options("cutting_board")?;
        Self::new(TemplateBase::from_request(request, &DEFAULTS)?, options)
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            TemplateBase::from_defaults(&DEFAULTS)?,
            CuttingBoardOptions::default(),
        )
    }

    pub fn options(&self) -> &CuttingBoardOptions {
        &self.options
    }

    fn strip_part(&self) -> String {
        format!("{} Strip", self.options.pattern.title())
    }
}

impl ProjectTemplate for CuttingBoardTemplate {
    type Geometry = CuttingBoardGeometry;

    fn kind(&self) -> TemplateKind {
        TemplateKind::CuttingBoard
    }

    fn base(&self) -> &TemplateBase {
        &self.base
    }

    fn derive_geometry(&self) -> std::result::Result<CuttingBoardGeometry, DimensionError> {
        let b = &self.base;
        if b.height < MIN_THICKNESS {
            return Err(DimensionError::TooSmall {
                dimension: "Thickness",
                value: b.height,
                minimum: MIN_THICKNESS,
            });
        }
        if b.width < MIN_FACE || b.depth < MIN_FACE {
            return Err(DimensionError::Constraint(format!(
                "Cutting board dimensions ({}x{}mm) too small. Minimum: {}x{}mm",
                format_mm(b.width),
                format_mm(b.depth),
                format_mm(MIN_FACE),
                format_mm(MIN_FACE)
            )));
        }
        Ok(CuttingBoardGeometry {
            strip_width: b.width / f64::from(self.options.stripe_count),
        })
    }

    fn emit_placements(
        &self,
        g: &CuttingBoardGeometry,
        placer: &mut PartPlacer,
    ) -> GeometryResult<()> {
        let b = &self.base;
        let part = self.strip_part();
        let strip = Extents3::new(g.strip_width, b.depth, b.height);
        for i in 0..self.options.stripe_count {
            placer.place(
                format!("Strip {}", i + 1),
                part.as_str(),
                Point3::new(f64::from(i) * g.strip_width, 0.0, 0.0),
                strip,
            )?;
        }
        Ok(())
    }

    fn build_cut_list(&self, g: &CuttingBoardGeometry) -> GeometryResult<CutList> {
        let b = &self.base;
        let notes = match self.options.pattern {
            GrainPattern::EdgeGrain => "Edge-glue strips face to face, then flatten".to_string(),
            GrainPattern::EndGrain => format!(
                "Glue {}x{}mm stock face to face, cut {}mm slices, turn end grain up",
                format_mm(b.w()),
                format_mm(b.t()),
                format_mm(b.height)
            ),
        };
        // End grain blocks stand with their grain through the board thickness.
        let (width, height, length) = match self.options.pattern {
            GrainPattern::EdgeGrain => (g.strip_width, b.height, b.depth),
            GrainPattern::EndGrain => (b.depth, g.strip_width, b.height),
        };
        let mut list = CutList::new();
        list.add(
            piece(
                b,
                &self.strip_part(),
                width,
                height,
                length,
                self.options.stripe_count,
            )
            .with_notes(notes),
        )?;
        Ok(list)
    }

    fn operation_name(&self, _g: &CuttingBoardGeometry) -> String {
        format!(
            "{} Cutting Board {}x{}",
            self.options.pattern.title(),
            format_mm(self.base.width),
            format_mm(self.base.depth)
        )
    }
}
