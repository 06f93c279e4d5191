//! Table: four square legs inset from the corners, aprons framing the legs
//! under the top, and optional lower stretchers.
//!
//! Legs are cut from the stock thickness square; aprons and stretchers are
//! full stock width tall and sit flush with the outer leg faces.

use crate::error::{DimensionError, Result};
use crate::registry::TemplateKind;
use crate::request::{require_length, TemplateBase, TemplateDefaults, TemplateRequest};
use crate::template::{panel_notes, piece, ProjectTemplate};
use serde::{Deserialize, Serialize};
use woodshop_core::{
    format_mm, CutList, Extents3, GeometryResult, JointMarker, PartPlacer, Point3,
    MARKER_THICKNESS,
};

/// Shortest apron or stretcher between two legs (mm).
pub const MIN_RAIL_LENGTH: f64 = 50.0;

/// Clearance kept below the aprons (mm).
pub const APRON_CLEARANCE: f64 = 50.0;

/// Size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableVariant {
    #[default]
    Dining,
    Coffee,
    End,
}

impl TableVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableVariant::Dining => "dining",
            TableVariant::Coffee => "coffee",
            TableVariant::End => "end",
        }
    }

    /// Default (width, height, depth) for the preset.
    pub fn envelope(&self) -> (f64, f64, f64) {
        match self {
            TableVariant::Dining => (1800.0, 750.0, 900.0),
            TableVariant::Coffee => (1200.0, 450.0, 600.0),
            TableVariant::End => (500.0, 500.0, 500.0),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            TableVariant::Dining => "Dining",
            TableVariant::Coffee => "Coffee",
            TableVariant::End => "End",
        }
    }

    fn defaults(&self) -> TemplateDefaults {
        let (width, height, depth) = self.envelope();
        TemplateDefaults {
            width,
            height,
            depth,
            lumber: "90x45",
            joinery: "mortise_tenon",
            material: "pine",
        }
    }
}

/// Table options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableOptions {
    /// Size preset supplying default dimensions
    pub variant: TableVariant,
    /// Aprons under the top
    pub has_aprons: bool,
    /// Lower stretchers at a third of the leg height
    pub has_stretchers: bool,
    /// Distance from the top's edges to the legs (mm)
    pub leg_inset: f64,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            variant: TableVariant::Dining,
            has_aprons: true,
            has_stretchers: false,
            leg_inset: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableTemplate {
    base: TemplateBase,
    options: TableOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableGeometry {
    pub leg_size: f64,
    pub leg_height: f64,
    pub rail_height: f64,
    pub long_rail: f64,
    pub short_rail: f64,
    pub apron_z: f64,
    pub stretcher_z: f64,
    /// Leg origins: front-left, front-right, back-left, back-right
    pub legs: [(&'static str, f64, f64); 4],
}

impl TableTemplate {
    pub fn new(base: TemplateBase, options: TableOptions) -> Result<Self> {
        require_length("table", "leg_inset", options.leg_inset, 0.0)?;
        Ok(Self { base, options })
    }

    pub fn from_request(request: &TemplateRequest) -> Result<Self> {
        let options: TableOptions = request.parse_options("table")?;
        let base = TemplateBase::from_request(request, &options.variant.defaults())?;
        Self::new(base, options)
    }

    pub fn with_variant(variant: TableVariant) -> Result<Self> {
        let options = TableOptions {
            variant,
            ..TableOptions::default()
        };
        Self::new(TemplateBase::from_defaults(&variant.defaults())?, options)
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Rail kinds present, top to bottom.
    fn rails(&self) -> Vec<&'static str> {
        let mut rails = Vec::new();
        if self.options.has_aprons {
            rails.push("Apron");
        }
        if self.options.has_stretchers {
            rails.push("Stretcher");
        }
        rails
    }

    fn rail_z(&self, g: &TableGeometry, kind: &str) -> f64 {
        if kind == "Apron" {
            g.apron_z
        } else {
            g.stretcher_z
        }
    }
}

impl ProjectTemplate for TableTemplate {
    type Geometry = TableGeometry;

    fn kind(&self) -> TemplateKind {
        TemplateKind::Table
    }

    fn base(&self) -> &TemplateBase {
        &self.base
    }

    fn derive_geometry(&self) -> std::result::Result<TableGeometry, DimensionError> {
        let b = &self.base;
        let leg = b.t();
        let rail_height = b.w();
        let inset = self.options.leg_inset;
        let leg_height = b.height - b.t();

        let long_rail = b.width - 2.0 * inset - 2.0 * leg;
        if long_rail < MIN_RAIL_LENGTH {
            return Err(DimensionError::TooSmall {
                dimension: "Width",
                value: b.width,
                minimum: 2.0 * inset + 2.0 * leg + MIN_RAIL_LENGTH,
            });
        }
        let short_rail = b.depth - 2.0 * inset - 2.0 * leg;
        if short_rail < MIN_RAIL_LENGTH {
            return Err(DimensionError::TooSmall {
                dimension: "Depth",
                value: b.depth,
                minimum: 2.0 * inset + 2.0 * leg + MIN_RAIL_LENGTH,
            });
        }

        let min_leg = if self.options.has_aprons {
            rail_height + APRON_CLEARANCE
        } else {
            APRON_CLEARANCE
        };
        if leg_height < min_leg {
            return Err(DimensionError::TooSmall {
                dimension: "Height",
                value: b.height,
                minimum: b.t() + min_leg,
            });
        }

        let apron_z = leg_height - rail_height;
        let stretcher_z = leg_height / 3.0 - rail_height / 2.0;
        if self.options.has_stretchers {
            let ceiling = if self.options.has_aprons {
                apron_z
            } else {
                leg_height
            };
            if stretcher_z < 0.0 || stretcher_z + rail_height > ceiling {
                return Err(DimensionError::Constraint(format!(
                    "Height {}mm leaves no room for {}mm stretchers at a third of the \
                     {}mm legs. Increase the height or remove the stretchers",
                    format_mm(b.height),
                    format_mm(rail_height),
                    format_mm(leg_height)
                )));
            }
        }

        let (left, right) = (inset, b.width - inset - leg);
        let (front, back) = (inset, b.depth - inset - leg);
        Ok(TableGeometry {
            leg_size: leg,
            leg_height,
            rail_height,
            long_rail,
            short_rail,
            apron_z,
            stretcher_z,
            legs: [
                ("Front-Left", left, front),
                ("Front-Right", right, front),
                ("Back-Left", left, back),
                ("Back-Right", right, back),
            ],
        })
    }

    fn emit_placements(&self, g: &TableGeometry, placer: &mut PartPlacer) -> GeometryResult<()> {
        let b = &self.base;
        let leg = g.leg_size;
        let t = b.t();

        placer.place(
            "Tabletop",
            "Tabletop",
            Point3::new(0.0, 0.0, g.leg_height),
            Extents3::new(b.width, b.depth, t),
        )?;
        for (label, x, y) in g.legs {
            placer.place(
                format!("Leg {}", label),
                "Leg",
                Point3::new(x, y, 0.0),
                Extents3::new(leg, leg, g.leg_height),
            )?;
        }

        let (_, left, front) = g.legs[0];
        let (_, right, back) = g.legs[3];
        for kind in self.rails() {
            let z = self.rail_z(g, kind);
            let long = Extents3::new(g.long_rail, t, g.rail_height);
            let short = Extents3::new(t, g.short_rail, g.rail_height);
            let long_part = format!("Long {}", kind);
            let short_part = format!("Short {}", kind);
            placer.place(
                format!("Front {}", kind),
                long_part.as_str(),
                Point3::new(left + leg, front, z),
                long,
            )?;
            placer.place(
                format!("Back {}", kind),
                long_part.as_str(),
                Point3::new(left + leg, back + leg - t, z),
                long,
            )?;
            placer.place(
                format!("Left {}", kind),
                short_part.as_str(),
                Point3::new(left, front + leg, z),
                short,
            )?;
            placer.place(
                format!("Right {}", kind),
                short_part.as_str(),
                Point3::new(right + leg - t, front + leg, z),
                short,
            )?;
        }
        Ok(())
    }

    fn emit_markers(&self, g: &TableGeometry) -> Vec<JointMarker> {
        let joint = self.base.joinery.as_str();
        let leg = g.leg_size;
        let m = MARKER_THICKNESS;
        let mut markers = Vec::new();

        for (i, (label, x, y)) in g.legs.iter().enumerate() {
            let on_left = i % 2 == 0;
            let at_front = i < 2;
            // Drawn on the outer faces so the rails do not hide them.
            let long_face_x = if on_left { x - m } else { x + leg };
            let short_face_y = if at_front { y - m } else { y + leg };
            for kind in self.rails() {
                let z = self.rail_z(g, kind);
                markers.push(JointMarker::new(
                    format!("Leg {} Long {}", label, kind),
                    joint,
                    Point3::new(long_face_x, *y, z),
                    Extents3::new(m, leg, g.rail_height),
                ));
                markers.push(JointMarker::new(
                    format!("Leg {} Short {}", label, kind),
                    joint,
                    Point3::new(*x, short_face_y, z),
                    Extents3::new(leg, m, g.rail_height),
                ));
            }
        }
        markers
    }

    fn build_cut_list(&self, g: &TableGeometry) -> GeometryResult<CutList> {
        let b = &self.base;
        let t = b.t();
        let mut list = CutList::new();
        list.add(
            piece(b, "Tabletop", b.depth, t, b.width, 1)
                .with_notes(panel_notes(b, "Top panel", b.depth)),
        )?;
        list.add(
            piece(b, "Leg", g.leg_size, g.leg_size, g.leg_height, 4)
                .with_notes(format!("Square legs, {} joints", b.joinery)),
        )?;
        for kind in self.rails() {
            let notes = format!("{} joints into the legs", b.joinery);
            list.add(
                piece(b, &format!("Long {}", kind), g.rail_height, t, g.long_rail, 2)
                    .with_notes(notes.clone()),
            )?;
            list.add(
                piece(b, &format!("Short {}", kind), g.rail_height, t, g.short_rail, 2)
                    .with_notes(notes),
            )?;
        }
        Ok(list)
    }

    fn operation_name(&self, _g: &TableGeometry) -> String {
        format!(
            "{} Table {}x{}x{}",
            self.options.variant.title(),
            format_mm(self.base.width),
            format_mm(self.base.height),
            format_mm(self.base.depth)
        )
    }
}
