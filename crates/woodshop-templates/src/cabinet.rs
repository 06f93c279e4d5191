//! Cabinet: a carcass on an optional toe-kick base, with a captured back,
//! fixed shelves and overlay doors.

use crate::bookshelf::MIN_SHELF_CLEARANCE;
use crate::error::{DimensionError, Result, TemplateError};
use crate::registry::TemplateKind;
use crate::request::{require_length, TemplateBase, TemplateDefaults, TemplateRequest};
use crate::template::{panel_notes, piece, ProjectTemplate};
use serde::{Deserialize, Serialize};
use woodshop_core::{
    format_mm, CutList, Extents3, GeometryResult, JointMarker, PartPlacer, Point3,
    MARKER_THICKNESS,
};

/// Gap between doors and around them (mm).
pub const DOOR_GAP: f64 = 3.0;

/// Shelves stop this far behind the carcass front (mm).
pub const SHELF_SETBACK: f64 = 10.0;

/// Toe kick recess from the front (mm).
pub const TOE_KICK_RECESS: f64 = 50.0;

const DEFAULTS: TemplateDefaults = TemplateDefaults {
    width: 600.0,
    height: 800.0,
    depth: 400.0,
    lumber: "90x19",
    joinery: "dado",
    material: "pine",
};

/// Cabinet options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CabinetOptions {
    pub has_doors: bool,
    /// Number of doors, 1 to 4
    pub door_count: u32,
    /// Fixed shelves inside the carcass
    pub shelf_count: u32,
    /// Raise the carcass on a recessed toe kick
    pub has_base: bool,
    /// Toe kick height (mm)
    pub base_height: f64,
}

impl Default for CabinetOptions {
    fn default() -> Self {
        Self {
            has_doors: true,
            door_count: 2,
            shelf_count: 2,
            has_base: true,
            base_height: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CabinetTemplate {
    base: TemplateBase,
    options: CabinetOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CabinetGeometry {
    pub base_height: f64,
    pub carcass_height: f64,
    pub interior_width: f64,
    pub shelf_depth: f64,
    pub shelf_z: Vec<f64>,
    pub door_width: f64,
    pub door_height: f64,
}

impl CabinetTemplate {
    pub fn new(base: TemplateBase, options: CabinetOptions) -> Result<Self> {
        if options.has_doors && !(1..=4).contains(&options.door_count) {
            return Err(TemplateError::InvalidOptions {
                template: "cabinet".to_string(),
                reason: format!("door_count must be 1 to 4 (got {})", options.door_count),
            });
        }
        if options.has_base {
            require_length("cabinet", "base_height", options.base_height, 1.0)?;
        }
        Ok(Self { base, options })
    }

    pub fn from_request(request: &TemplateRequest) -> Result<Self> {
        let options = request.parse_options("cabinet")?;
        Self::new(TemplateBase::from_request(request, &DEFAULTS)?, options)
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            TemplateBase::from_defaults(&DEFAULTS)?,
            CabinetOptions::default(),
        )
    }

    pub fn options(&self) -> &CabinetOptions {
        &self.options
    }

    fn door_count(&self) -> u32 {
        if self.options.has_doors {
            self.options.door_count
        } else {
            0
        }
    }
}

impl ProjectTemplate for CabinetTemplate {
    type Geometry = CabinetGeometry;

    fn kind(&self) -> TemplateKind {
        TemplateKind::Cabinet
    }

    fn base(&self) -> &TemplateBase {
        &self.base
    }

    fn derive_geometry(&self) -> std::result::Result<CabinetGeometry, DimensionError> {
        let b = &self.base;
        let t = b.t();
        let n = self.options.shelf_count;
        let nf = f64::from(n);
        let base_height = if self.options.has_base {
            self.options.base_height
        } else {
            0.0
        };

        let interior_width = b.width - 2.0 * t;
        if interior_width < MIN_SHELF_CLEARANCE {
            return Err(DimensionError::TooSmall {
                dimension: "Width",
                value: b.width,
                minimum: 2.0 * t + MIN_SHELF_CLEARANCE,
            });
        }

        let shelf_depth = b.depth - t - SHELF_SETBACK;
        if shelf_depth < MIN_SHELF_CLEARANCE {
            return Err(DimensionError::TooSmall {
                dimension: "Depth",
                value: b.depth,
                minimum: t + SHELF_SETBACK + MIN_SHELF_CLEARANCE,
            });
        }

        let carcass_height = b.height - base_height;
        let spacing = (carcass_height - 2.0 * t - nf * t) / (nf + 1.0);
        if spacing < MIN_SHELF_CLEARANCE {
            let minimum = base_height + (nf + 2.0) * t + (nf + 1.0) * MIN_SHELF_CLEARANCE;
            return Err(DimensionError::Constraint(format!(
                "Height {}mm is too small for a cabinet with {} shelves, {}mm lumber \
                 and a {}mm base. Minimum height required: {}mm",
                format_mm(b.height),
                n,
                format_mm(t),
                format_mm(base_height),
                format_mm(minimum)
            )));
        }

        let shelf_z = (0..n)
            .map(|i| {
                let i = f64::from(i);
                base_height + t + (i + 1.0) * spacing + i * t
            })
            .collect();

        let doors = f64::from(self.door_count().max(1));
        Ok(CabinetGeometry {
            base_height,
            carcass_height,
            interior_width,
            shelf_depth,
            shelf_z,
            door_width: b.width / doors - DOOR_GAP,
            door_height: carcass_height - DOOR_GAP,
        })
    }

    fn emit_placements(&self, g: &CabinetGeometry, placer: &mut PartPlacer) -> GeometryResult<()> {
        let b = &self.base;
        let t = b.t();
        let z0 = g.base_height;
        let top_z = z0 + g.carcass_height - t;
        let side = Extents3::new(t, b.depth, g.carcass_height);
        let panel = Extents3::new(g.interior_width, b.depth, t);

        placer.place("Left Side", "Side Panel", Point3::new(0.0, 0.0, z0), side)?;
        placer.place("Right Side", "Side Panel", Point3::new(b.width - t, 0.0, z0), side)?;
        placer.place("Bottom", "Bottom Panel", Point3::new(t, 0.0, z0), panel)?;
        placer.place("Top", "Top Panel", Point3::new(t, 0.0, top_z), panel)?;
        placer.place(
            "Back",
            "Back Panel",
            Point3::new(t, b.depth - t, z0 + t),
            Extents3::new(g.interior_width, t, g.carcass_height - 2.0 * t),
        )?;

        let shelf = Extents3::new(g.interior_width, g.shelf_depth, t);
        for (i, z) in g.shelf_z.iter().enumerate() {
            placer.place(
                format!("Shelf {}", i + 1),
                "Shelf",
                Point3::new(t, SHELF_SETBACK, *z),
                shelf,
            )?;
        }

        if self.options.has_base {
            placer.place(
                "Toe Kick",
                "Toe Kick",
                Point3::new(t, TOE_KICK_RECESS, 0.0),
                Extents3::new(g.interior_width, t, g.base_height),
            )?;
        }

        let n = self.door_count();
        let pitch = b.width / f64::from(n.max(1));
        for i in 0..n {
            placer.place(
                format!("Door {}", i + 1),
                "Door",
                Point3::new(
                    f64::from(i) * pitch + DOOR_GAP / 2.0,
                    -t,
                    z0 + DOOR_GAP / 2.0,
                ),
                Extents3::new(g.door_width, t, g.door_height),
            )?;
        }
        Ok(())
    }

    fn emit_markers(&self, g: &CabinetGeometry) -> Vec<JointMarker> {
        let b = &self.base;
        let t = b.t();
        let joint = b.joinery.as_str();
        let full = Extents3::new(MARKER_THICKNESS, b.depth, t);
        let shelf = Extents3::new(MARKER_THICKNESS, g.shelf_depth, t);

        let mut levels = vec![("Bottom".to_string(), g.base_height, 0.0, full)];
        for (i, z) in g.shelf_z.iter().enumerate() {
            levels.push((format!("Shelf {}", i + 1), *z, SHELF_SETBACK, shelf));
        }
        levels.push((
            "Top".to_string(),
            g.base_height + g.carcass_height - t,
            0.0,
            full,
        ));

        let mut markers = Vec::new();
        for (label, z, y, size) in levels {
            markers.push(JointMarker::new(
                format!("Left Dado {}", label),
                joint,
                Point3::new(t - MARKER_THICKNESS, y, z),
                size,
            ));
            markers.push(JointMarker::new(
                format!("Right Dado {}", label),
                joint,
                Point3::new(b.width - t, y, z),
                size,
            ));
        }
        markers
    }

    fn build_cut_list(&self, g: &CabinetGeometry) -> GeometryResult<CutList> {
        let b = &self.base;
        let t = b.t();
        let mut list = CutList::new();
        list.add(
            piece(b, "Side Panel", b.depth, t, g.carcass_height, 2)
                .with_notes(panel_notes(b, "Carcass sides", b.depth)),
        )?;
        list.add(
            piece(b, "Top Panel", b.depth, t, g.interior_width, 1)
                .with_notes(panel_notes(b, &format!("{} into the sides", b.joinery), b.depth)),
        )?;
        list.add(
            piece(b, "Bottom Panel", b.depth, t, g.interior_width, 1)
                .with_notes(panel_notes(b, &format!("{} into the sides", b.joinery), b.depth)),
        )?;
        let back_height = g.carcass_height - 2.0 * t;
        list.add(
            piece(b, "Back Panel", back_height, t, g.interior_width, 1)
                .with_notes(panel_notes(b, "Captured between top and bottom", back_height)),
        )?;
        if !g.shelf_z.is_empty() {
            list.add(
                piece(
                    b,
                    "Shelf",
                    g.shelf_depth,
                    t,
                    g.interior_width,
                    self.options.shelf_count,
                )
                .with_notes(panel_notes(b, "Fixed shelves", g.shelf_depth)),
            )?;
        }
        if self.options.has_base {
            list.add(
                piece(b, "Toe Kick", g.base_height, t, g.interior_width, 1).with_notes(format!(
                    "Recessed {}mm from the front",
                    format_mm(TOE_KICK_RECESS)
                )),
            )?;
        }
        let doors = self.door_count();
        if doors > 0 {
            list.add(
                piece(b, "Door", g.door_width, t, g.door_height, doors).with_notes(panel_notes(
                    b,
                    &format!("Overlay doors, {}mm reveal", format_mm(DOOR_GAP)),
                    g.door_width,
                )),
            )?;
        }
        Ok(list)
    }

    fn operation_name(&self, _g: &CabinetGeometry) -> String {
        format!(
            "Cabinet {}x{}x{}",
            format_mm(self.base.width),
            format_mm(self.base.height),
            format_mm(self.base.depth)
        )
    }
}
