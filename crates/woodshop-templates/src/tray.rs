//! Serving tray: low walls around a captured bottom, with optional handle
//! cutouts in the end walls and evenly spaced dividers.

use crate::error::{DimensionError, Result};
use crate::registry::TemplateKind;
use crate::request::{
    require_at_least, require_length, TemplateBase, TemplateDefaults, TemplateRequest,
};
use crate::template::{panel_notes, piece, ProjectTemplate};
use serde::{Deserialize, Serialize};
use woodshop_core::{format_mm, CutList, Extents3, GeometryResult, PartPlacer, Point3};

/// Smallest interior width or depth (mm).
pub const MIN_INTERIOR: f64 = 50.0;

/// Lowest wall accepted (mm).
pub const MIN_WALL_HEIGHT: f64 = 20.0;

/// Dividers stop short of the walls and wall tops by this much (mm).
pub const DIVIDER_CLEARANCE: f64 = 5.0;

/// Walls stay this far below the overall height (mm).
pub const WALL_HEADROOM: f64 = 5.0;

const DEFAULTS: TemplateDefaults = TemplateDefaults {
    width: 400.0,
    height: 50.0,
    depth: 300.0,
    lumber: "90x12",
    joinery: "rabbet",
    material: "walnut",
};

/// Tray options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrayOptions {
    /// Handle cutouts in the end walls
    pub has_handles: bool,
    /// Wall height, capped at [`WALL_HEADROOM`] below the overall height (mm)
    pub wall_height: f64,
    pub has_dividers: bool,
    pub divider_count: u32,
}

impl Default for TrayOptions {
    fn default() -> Self {
        Self {
            has_handles: true,
            wall_height: 40.0,
            has_dividers: false,
            divider_count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrayTemplate {
    base: TemplateBase,
    options: TrayOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrayGeometry {
    pub wall_height: f64,
    pub interior_width: f64,
    pub interior_depth: f64,
    /// Width of each compartment between dividers
    pub section: f64,
    pub divider_height: f64,
}

impl TrayTemplate {
    pub fn new(base: TemplateBase, options: TrayOptions) -> Result<Self> {
        require_length("tray", "wall_height", options.wall_height, 0.0)?;
        require_at_least("tray", "divider_count", options.divider_count, 1)?;
        Ok(Self { base, options })
    }

    pub fn from_request(request: &TemplateRequest) -> Result<Self> {
        let options = request.parse_options("tray")?;
        Self::new(TemplateBase::from_request(request, &DEFAULTS)?, options)
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(TemplateBase::from_defaults(&DEFAULTS)?, TrayOptions::default())
    }

    pub fn options(&self) -> &TrayOptions {
        &self.options
    }

    fn dividers(&self) -> u32 {
        if self.options.has_dividers {
            self.options.divider_count
        } else {
            0
        }
    }
}

impl ProjectTemplate for TrayTemplate {
    type Geometry = TrayGeometry;

    fn kind(&self) -> TemplateKind {
        TemplateKind::Tray
    }

    fn base(&self) -> &TemplateBase {
        &self.base
    }

    fn derive_geometry(&self) -> std::result::Result<TrayGeometry, DimensionError> {
        let b = &self.base;
        let t = b.t();

        let interior_width = b.width - 2.0 * t;
        let interior_depth = b.depth - 2.0 * t;
        if interior_width < MIN_INTERIOR || interior_depth < MIN_INTERIOR {
            return Err(DimensionError::Constraint(format!(
                "Tray {}x{}mm is too small for {}mm lumber. Minimum: {}x{}mm",
                format_mm(b.width),
                format_mm(b.depth),
                format_mm(t),
                format_mm(2.0 * t + MIN_INTERIOR),
                format_mm(2.0 * t + MIN_INTERIOR)
            )));
        }

        let wall_height = self.options.wall_height.min(b.height - WALL_HEADROOM);
        if wall_height < MIN_WALL_HEIGHT {
            return Err(DimensionError::TooSmall {
                dimension: "Wall height",
                value: wall_height,
                minimum: MIN_WALL_HEIGHT,
            });
        }
        if wall_height <= t {
            return Err(DimensionError::Constraint(format!(
                "Wall height {}mm must exceed the {}mm bottom",
                format_mm(wall_height),
                format_mm(t)
            )));
        }

        let n = self.dividers();
        let section = interior_width / f64::from(n + 1);
        let divider_height = wall_height - t - DIVIDER_CLEARANCE;
        if n > 0 && (section <= t || divider_height <= 0.0) {
            return Err(DimensionError::Constraint(format!(
                "{} dividers do not fit a {}x{}mm interior with {}mm walls",
                n,
                format_mm(interior_width),
                format_mm(interior_depth),
                format_mm(wall_height)
            )));
        }

        Ok(TrayGeometry {
            wall_height,
            interior_width,
            interior_depth,
            section,
            divider_height,
        })
    }

    fn emit_placements(&self, g: &TrayGeometry, placer: &mut PartPlacer) -> GeometryResult<()> {
        let b = &self.base;
        let t = b.t();

        placer.place(
            "Bottom",
            "Bottom",
            Point3::new(t, t, 0.0),
            Extents3::new(g.interior_width, g.interior_depth, t),
        )?;
        let long = Extents3::new(b.width, t, g.wall_height);
        placer.place("Front Wall", "Long Wall", Point3::ORIGIN, long)?;
        placer.place("Back Wall", "Long Wall", Point3::new(0.0, b.depth - t, 0.0), long)?;
        let end = Extents3::new(t, g.interior_depth, g.wall_height);
        placer.place("Left End Wall", "End Wall", Point3::new(0.0, t, 0.0), end)?;
        placer.place("Right End Wall", "End Wall", Point3::new(b.width - t, t, 0.0), end)?;

        let divider = Extents3::new(
            t,
            g.interior_depth - 2.0 * DIVIDER_CLEARANCE,
            g.divider_height,
        );
        for i in 0..self.dividers() {
            let centre = t + f64::from(i + 1) * g.section;
            placer.place(
                format!("Divider {}", i + 1),
                "Divider",
                Point3::new(centre - t / 2.0, t + DIVIDER_CLEARANCE, t),
                divider,
            )?;
        }
        Ok(())
    }

    fn build_cut_list(&self, g: &TrayGeometry) -> GeometryResult<CutList> {
        let b = &self.base;
        let t = b.t();
        let mut list = CutList::new();
        list.add(
            piece(b, "Long Wall", g.wall_height, t, b.width, 2)
                .with_notes(format!("Front and back, {} corners", b.joinery)),
        )?;
        let end_notes = if self.options.has_handles {
            "End walls with handle cutouts"
        } else {
            "End walls"
        };
        list.add(piece(b, "End Wall", g.wall_height, t, g.interior_depth, 2).with_notes(end_notes))?;
        list.add(
            piece(b, "Bottom", g.interior_depth, t, g.interior_width, 1)
                .with_notes(panel_notes(b, "Captured by the walls", g.interior_depth)),
        )?;
        let n = self.dividers();
        if n > 0 {
            list.add(
                piece(
                    b,
                    "Divider",
                    g.divider_height,
                    t,
                    g.interior_depth - 2.0 * DIVIDER_CLEARANCE,
                    n,
                )
                .with_notes(format!(
                    "Evenly spaced, {}mm compartments",
                    format_mm(g.section)
                )),
            )?;
        }
        Ok(list)
    }

    fn operation_name(&self, _g: &TrayGeometry) -> String {
        format!(
            "Serving Tray{} {}x{}",
            if self.options.has_handles { " with Handles" } else { "" },
            format_mm(self.base.width),
            format_mm(self.base.depth)
        )
    }
}
