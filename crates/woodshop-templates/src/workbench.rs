//! Workbench: a thick benchtop on four or six legs, framed by aprons or
//! narrow rails, with an optional lower shelf carried on stretchers.

use crate::error::{DimensionError, Result, TemplateError};
use crate::registry::TemplateKind;
use crate::request::{require_length, TemplateBase, TemplateDefaults, TemplateRequest};
use crate::template::{panel_notes, piece, ProjectTemplate};
use serde::{Deserialize, Serialize};
use woodshop_core::{format_mm, CutList, Extents3, GeometryResult, PartPlacer, Point3};

/// Benches wider than this get a middle pair of legs by default (mm).
pub const SIX_LEG_THRESHOLD: f64 = 2000.0;

/// Thinnest benchtop accepted (mm).
pub const MIN_TOP_THICKNESS: f64 = 45.0;

/// Shortest rail span between legs (mm).
pub const MIN_SPAN: f64 = 100.0;

const DEFAULTS: TemplateDefaults = TemplateDefaults {
    width: 1800.0,
    height: 900.0,
    depth: 600.0,
    lumber: "90x45",
    joinery: "mortise_tenon",
    material: "pine",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApronStyle {
    /// Full stock width aprons
    #[default]
    Full,
    /// Rails only as tall as the stock is thick
    RailsOnly,
}

impl ApronStyle {
    fn part(&self) -> &'static str {
        match self {
            ApronStyle::Full => "Apron",
            ApronStyle::RailsOnly => "Rail",
        }
    }
}

/// Workbench options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkbenchOptions {
    /// Lower shelf on stretchers
    pub has_shelf: bool,
    /// 4 or 6; benches wider than the six-leg threshold always get 6
    pub leg_count: Option<u32>,
    pub apron_style: ApronStyle,
    /// Benchtop thickness (mm)
    pub top_thickness: f64,
    /// Distance from the benchtop edges to the legs (mm)
    pub leg_inset: f64,
}

impl Default for WorkbenchOptions {
    fn default() -> Self {
        Self {
            has_shelf: true,
            leg_count: None,
            apron_style: ApronStyle::Full,
            top_thickness: MIN_TOP_THICKNESS,
            leg_inset: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkbenchTemplate {
    base: TemplateBase,
    options: WorkbenchOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkbenchGeometry {
    pub leg_count: u32,
    pub leg_size: f64,
    pub leg_height: f64,
    /// Left edge of each leg column, left to right
    pub columns: Vec<f64>,
    /// Clear length between adjacent columns
    pub span: f64,
    pub short_rail: f64,
    pub apron_height: f64,
    pub apron_z: f64,
    pub shelf_z: f64,
    pub stretcher_z: f64,
}

impl WorkbenchTemplate {
    pub fn new(base: TemplateBase, options: WorkbenchOptions) -> Result<Self> {
        if let Some(count) = options.leg_count {
            if count != 4 && count != 6 {
                return Err(TemplateError::InvalidOptions {
                    template: "workbench".to_string(),
                    reason: format!("leg_count must be 4 or 6 (got {})", count),
                });
            }
        }
        require_length("workbench", "top_thickness", options.top_thickness, MIN_TOP_THICKNESS)?;
        require_length("workbench", "leg_inset", options.leg_inset, 0.0)?;
        Ok(Self { base, options })
    }

    pub fn from_request(request: &TemplateRequest) -> Result<Self> {
        let options = request.parse_options("workbench")?;
        Self::new(TemplateBase::from_request(request, &DEFAULTS)?, options)
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            TemplateBase::from_defaults(&DEFAULTS)?,
            WorkbenchOptions::default(),
        )
    }

    pub fn options(&self) -> &WorkbenchOptions {
        &self.options
    }

    pub fn leg_count(&self) -> u32 {
        if self.base.width > SIX_LEG_THRESHOLD || self.options.leg_count == Some(6) {
            6
        } else {
            4
        }
    }

    /// Left end of each rail span between adjacent leg columns.
    fn span_starts(&self, g: &WorkbenchGeometry) -> Vec<f64> {
        g.columns
            .iter()
            .take(g.columns.len().saturating_sub(1))
            .map(|x| x + g.leg_size)
            .collect()
    }

    fn place_frame(
        &self,
        g: &WorkbenchGeometry,
        placer: &mut PartPlacer,
        kind: &str,
        z: f64,
        height: f64,
    ) -> GeometryResult<()> {
        let b = &self.base;
        let t = b.t();
        let inset = self.options.leg_inset;
        let back_y = b.depth - inset - t;
        let long = Extents3::new(g.span, t, height);
        let long_part = format!("Long {}", kind);
        for (i, x) in self.span_starts(g).into_iter().enumerate() {
            placer.place(
                format!("Front {} {}", kind, i + 1),
                long_part.as_str(),
                Point3::new(x, inset, z),
                long,
            )?;
            placer.place(
                format!("Back {} {}", kind, i + 1),
                long_part.as_str(),
                Point3::new(x, back_y, z),
                long,
            )?;
        }

        let short = Extents3::new(t, g.short_rail, height);
        let short_part = format!("Short {}", kind);
        placer.place(
            format!("Left {}", kind),
            short_part.as_str(),
            Point3::new(inset, inset + g.leg_size, z),
            short,
        )?;
        placer.place(
            format!("Right {}", kind),
            short_part.as_str(),
            Point3::new(b.width - inset - t, inset + g.leg_size, z),
            short,
        )?;
        Ok(())
    }
}

impl ProjectTemplate for WorkbenchTemplate {
    type Geometry = WorkbenchGeometry;

    fn kind(&self) -> TemplateKind {
        TemplateKind::Workbench
    }

    fn base(&self) -> &TemplateBase {
        &self.base
    }

    fn derive_geometry(&self) -> std::result::Result<WorkbenchGeometry, DimensionError> {
        let b = &self.base;
        let t = b.t();
        let leg = t;
        let inset = self.options.leg_inset;
        let top = self.options.top_thickness;
        let leg_count = self.leg_count();

        let apron_height = match self.options.apron_style {
            ApronStyle::Full => b.w(),
            ApronStyle::RailsOnly => t,
        };

        let leg_height = b.height - top;
        if leg_height < apron_height + MIN_SPAN {
            return Err(DimensionError::TooSmall {
                dimension: "Height",
                value: b.height,
                minimum: top + apron_height + MIN_SPAN,
            });
        }

        let mut columns = vec![inset];
        if leg_count == 6 {
            columns.push((b.width - leg) / 2.0);
        }
        columns.push(b.width - inset - leg);
        let pairs = f64::from(leg_count / 2);
        let span = (b.width - 2.0 * inset - pairs * leg) / (pairs - 1.0);
        if span < MIN_SPAN {
            return Err(DimensionError::TooSmall {
                dimension: "Width",
                value: b.width,
                minimum: 2.0 * inset + pairs * leg + (pairs - 1.0) * MIN_SPAN,
            });
        }

        let short_rail = b.depth - 2.0 * inset - 2.0 * leg;
        if short_rail < MIN_SPAN {
            return Err(DimensionError::TooSmall {
                dimension: "Depth",
                value: b.depth,
                minimum: 2.0 * inset + 2.0 * leg + MIN_SPAN,
            });
        }

        let apron_z = leg_height - apron_height;
        let shelf_z = leg_height / 3.0;
        let stretcher_z = shelf_z - b.w();
        if self.options.has_shelf && (stretcher_z < 0.0 || shelf_z + t > apron_z) {
            return Err(DimensionError::Constraint(format!(
                "Height {}mm leaves no room for a lower shelf on {}mm stretchers \
                 below the {}. Increase the height or remove the shelf",
                format_mm(b.height),
                format_mm(b.w()),
                self.options.apron_style.part().to_ascii_lowercase()
            )));
        }

        Ok(WorkbenchGeometry {
            leg_count,
            leg_size: leg,
            leg_height,
            columns,
            span,
            short_rail,
            apron_height,
            apron_z,
            shelf_z,
            stretcher_z,
        })
    }

    fn emit_placements(&self, g: &WorkbenchGeometry, placer: &mut PartPlacer) -> GeometryResult<()> {
        let b = &self.base;
        let t = b.t();
        let inset = self.options.leg_inset;

        placer.place(
            "Benchtop",
            "Benchtop",
            Point3::new(0.0, 0.0, g.leg_height),
            Extents3::new(b.width, b.depth, self.options.top_thickness),
        )?;

        let leg = Extents3::new(g.leg_size, g.leg_size, g.leg_height);
        for (i, x) in g.columns.iter().enumerate() {
            placer.place(
                format!("Leg Front {}", i + 1),
                "Leg",
                Point3::new(*x, inset, 0.0),
                leg,
            )?;
            placer.place(
                format!("Leg Back {}", i + 1),
                "Leg",
                Point3::new(*x, b.depth - inset - g.leg_size, 0.0),
                leg,
            )?;
        }

        let kind = self.options.apron_style.part();
        self.place_frame(g, placer, kind, g.apron_z, g.apron_height)?;

        if self.options.has_shelf {
            self.place_frame(g, placer, "Stretcher", g.stretcher_z, b.w())?;
            placer.place(
                "Lower Shelf",
                "Lower Shelf",
                Point3::new(inset + g.leg_size, inset + g.leg_size, g.shelf_z),
                Extents3::new(b.width - 2.0 * inset - 2.0 * g.leg_size, g.short_rail, t),
            )?;
        }
        Ok(())
    }

    fn build_cut_list(&self, g: &WorkbenchGeometry) -> GeometryResult<CutList> {
        let b = &self.base;
        let t = b.t();
        let spans = g.leg_count / 2 - 1;
        let mut list = CutList::new();

        list.add(
            piece(b, "Benchtop", b.depth, self.options.top_thickness, b.width, 1).with_notes(
                panel_notes(
                    b,
                    &format!(
                        "Laminated benchtop, {}mm thick",
                        format_mm(self.options.top_thickness)
                    ),
                    b.depth,
                ),
            ),
        )?;
        list.add(
            piece(b, "Leg", g.leg_size, g.leg_size, g.leg_height, g.leg_count)
                .with_notes(format!("Square legs, {} joints", b.joinery)),
        )?;

        let kind = self.options.apron_style.part();
        let notes = format!("{} joints into the legs", b.joinery);
        list.add(
            piece(b, &format!("Long {}", kind), g.apron_height, t, g.span, 2 * spans)
                .with_notes(notes.clone()),
        )?;
        list.add(
            piece(b, &format!("Short {}", kind), g.apron_height, t, g.short_rail, 2)
                .with_notes(notes.clone()),
        )?;

        if self.options.has_shelf {
            list.add(
                piece(b, "Long Stretcher", b.w(), t, g.span, 2 * spans).with_notes(notes.clone()),
            )?;
            list.add(piece(b, "Short Stretcher", b.w(), t, g.short_rail, 2).with_notes(notes))?;
            list.add(
                piece(
                    b,
                    "Lower Shelf",
                    g.short_rail,
                    t,
                    b.width - 2.0 * self.options.leg_inset - 2.0 * g.leg_size,
                    1,
                )
                .with_notes(panel_notes(b, "Rests on the stretchers", g.short_rail)),
            )?;
        }
        Ok(list)
    }

    fn operation_name(&self, _g: &WorkbenchGeometry) -> String {
        format!(
            "Workbench {}x{}x{}",
            format_mm(self.base.width),
            format_mm(self.base.height),
            format_mm(self.base.depth)
        )
    }
}
