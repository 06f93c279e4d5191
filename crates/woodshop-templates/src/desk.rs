//! Desk: a top on two panel legs tied by a back rail, with drawer boxes
//! hung under the top and an optional keyboard tray and modesty panel.

use crate::error::{DimensionError, Result};
use crate::registry::TemplateKind;
use crate::request::{TemplateBase, TemplateDefaults, TemplateRequest};
use crate::template::{panel_notes, piece, ProjectTemplate};
use serde::{Deserialize, Serialize};
use woodshop_core::{format_mm, CutList, Extents3, GeometryResult, PartPlacer, Point3};

/// Width reserved under the top for each drawer unit (mm).
pub const DRAWER_UNIT_WIDTH: f64 = 400.0;
const DRAWER_BOX_WIDTH: f64 = 380.0;
const DRAWER_FRONT_HEIGHT: f64 = 140.0;
const DRAWER_SIDE_HEIGHT: f64 = 120.0;
const DRAWER_SETBACK: f64 = 75.0;
const DRAWER_DROP: f64 = 200.0;

/// Leg panels stop this far behind the front edge (mm).
pub const LEG_SETBACK: f64 = 50.0;

const KEYBOARD_TRAY_WIDTH: f64 = 600.0;
const KEYBOARD_TRAY_DEPTH: f64 = 300.0;

/// Clear width left between the drawers and the far leg (mm).
pub const MIN_KNEE_SPACE: f64 = 500.0;

const MIN_WIDTH: f64 = 600.0;
const MIN_LEG_HEIGHT: f64 = 400.0;

const DEFAULTS: TemplateDefaults = TemplateDefaults {
    width: 1400.0,
    height: 750.0,
    depth: 700.0,
    lumber: "90x19",
    joinery: "dado",
    material: "pine",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerSide {
    Left,
    #[default]
    Right,
    Both,
}

/// Desk options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeskOptions {
    pub has_drawer: bool,
    pub drawer_side: DrawerSide,
    pub has_keyboard_tray: bool,
    /// Modesty panel below the back rail
    pub has_back_panel: bool,
}

impl Default for DeskOptions {
    fn default() -> Self {
        Self {
            has_drawer: true,
            drawer_side: DrawerSide::Right,
            has_keyboard_tray: false,
            has_back_panel: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeskTemplate {
    base: TemplateBase,
    options: DeskOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeskGeometry {
    pub leg_height: f64,
    pub leg_depth: f64,
    pub rail_z: f64,
    pub drawer_depth: f64,
    /// Left edge of each drawer box
    pub drawer_x: Vec<(&'static str, f64)>,
    pub knee_space: f64,
}

impl DeskTemplate {
    pub fn new(base: TemplateBase, options: DeskOptions) -> Result<Self> {
        Ok(Self { base, options })
    }

    pub fn from_request(request: &TemplateRequest) -> Result<Self> {
        let options = request.parse_options("desk")?;
        Self::new(TemplateBase::from_request(request, &DEFAULTS)?, options)
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(TemplateBase::from_defaults(&DEFAULTS)?, DeskOptions::default())
    }

    pub fn options(&self) -> &DeskOptions {
        &self.options
    }

    fn drawer_units(&self) -> Vec<(&'static str, f64)> {
        if !self.options.has_drawer {
            return Vec::new();
        }
        let t = self.base.t();
        let inset = (DRAWER_UNIT_WIDTH - DRAWER_BOX_WIDTH) / 2.0;
        let left = ("Left", t + inset);
        let right = ("Right", self.base.width - t - DRAWER_UNIT_WIDTH + inset);
        match self.options.drawer_side {
            DrawerSide::Left => vec![left],
            DrawerSide::Right => vec![right],
            DrawerSide::Both => vec![left, right],
        }
    }
}

impl ProjectTemplate for DeskTemplate {
    type Geometry = DeskGeometry;

    fn kind(&self) -> TemplateKind {
        TemplateKind::Desk
    }

    fn base(&self) -> &TemplateBase {
        &self.base
    }

    fn derive_geometry(&self) -> std::result::Result<DeskGeometry, DimensionError> {
        let b = &self.base;
        let t = b.t();

        if b.width < MIN_WIDTH {
            return Err(DimensionError::TooSmall {
                dimension: "Width",
                value: b.width,
                minimum: MIN_WIDTH,
            });
        }
        let leg_height = b.height - t;
        if leg_height < MIN_LEG_HEIGHT {
            return Err(DimensionError::TooSmall {
                dimension: "Height",
                value: b.height,
                minimum: MIN_LEG_HEIGHT + t,
            });
        }

        let drawer_depth = b.depth - 100.0 - t;
        if drawer_depth < 100.0 {
            return Err(DimensionError::TooSmall {
                dimension: "Depth",
                value: b.depth,
                minimum: 200.0 + t,
            });
        }

        let rail_z = leg_height - b.w() - LEG_SETBACK;
        if rail_z < 0.0 {
            return Err(DimensionError::Constraint(format!(
                "Height {}mm is too small for a {}mm back rail. Minimum height required: {}mm",
                format_mm(b.height),
                format_mm(b.w()),
                format_mm(t + b.w() + LEG_SETBACK)
            )));
        }

        let drawer_x = self.drawer_units();
        let knee_space = b.width - 2.0 * t - drawer_x.len() as f64 * DRAWER_UNIT_WIDTH;
        if knee_space < MIN_KNEE_SPACE {
            return Err(DimensionError::Constraint(format!(
                "Width {}mm leaves {}mm of knee space with {} drawer unit(s). \
                 Minimum knee space: {}mm",
                format_mm(b.width),
                format_mm(knee_space),
                drawer_x.len(),
                format_mm(MIN_KNEE_SPACE)
            )));
        }

        if self.options.has_keyboard_tray
            && (t >= LEG_SETBACK || b.width - 2.0 * t < KEYBOARD_TRAY_WIDTH)
        {
            return Err(DimensionError::Constraint(format!(
                "A {}mm keyboard tray does not fit under a {}mm desk with {}mm lumber",
                format_mm(KEYBOARD_TRAY_WIDTH),
                format_mm(b.width),
                format_mm(t)
            )));
        }
        if self.options.has_back_panel && rail_z <= 150.0 {
            return Err(DimensionError::Constraint(format!(
                "Height {}mm leaves no room for a back panel below the rail",
                format_mm(b.height)
            )));
        }

        Ok(DeskGeometry {
            leg_height,
            leg_depth: b.depth - LEG_SETBACK,
            rail_z,
            drawer_depth,
            drawer_x,
            knee_space,
        })
    }

    fn emit_placements(&self, g: &DeskGeometry, placer: &mut PartPlacer) -> GeometryResult<()> {
        let b = &self.base;
        let t = b.t();

        let leg = Extents3::new(t, g.leg_depth, g.leg_height);
        placer.place("Left Leg", "Leg Panel", Point3::new(0.0, LEG_SETBACK, 0.0), leg)?;
        placer.place(
            "Right Leg",
            "Leg Panel",
            Point3::new(b.width - t, LEG_SETBACK, 0.0),
            leg,
        )?;
        placer.place(
            "Desktop",
            "Desktop",
            Point3::new(0.0, 0.0, g.leg_height),
            Extents3::new(b.width, b.depth, t),
        )?;
        placer.place(
            "Back Rail",
            "Back Rail",
            Point3::new(t, b.depth - t, g.rail_z),
            Extents3::new(b.width - 2.0 * t, t, b.w()),
        )?;

        let y0 = DRAWER_SETBACK;
        let z0 = g.leg_height - DRAWER_DROP;
        let dd = g.drawer_depth;
        let inner = DRAWER_BOX_WIDTH - 2.0 * t;
        for (label, bx) in &g.drawer_x {
            placer.place(
                format!("{} Drawer Front", label),
                "Drawer Front",
                Point3::new(*bx, y0, z0),
                Extents3::new(DRAWER_BOX_WIDTH, t, DRAWER_FRONT_HEIGHT),
            )?;
            let side = Extents3::new(t, dd - t, DRAWER_SIDE_HEIGHT);
            placer.place(
                format!("{} Drawer Left Side", label),
                "Drawer Side",
                Point3::new(*bx, y0 + t, z0),
                side,
            )?;
            placer.place(
                format!("{} Drawer Right Side", label),
                "Drawer Side",
                Point3::new(bx + DRAWER_BOX_WIDTH - t, y0 + t, z0),
                side,
            )?;
            placer.place(
                format!("{} Drawer Back", label),
                "Drawer Back",
                Point3::new(bx + t, y0 + dd - t, z0),
                Extents3::new(inner, t, DRAWER_SIDE_HEIGHT),
            )?;
            placer.place(
                format!("{} Drawer Bottom", label),
                "Drawer Bottom",
                Point3::new(bx + t, y0 + t, z0),
                Extents3::new(inner, dd - 2.0 * t, t),
            )?;
        }

        if self.options.has_keyboard_tray {
            placer.place(
                "Keyboard Tray",
                "Keyboard Tray",
                Point3::new(
                    (b.width - KEYBOARD_TRAY_WIDTH) / 2.0,
                    LEG_SETBACK,
                    g.leg_height - LEG_SETBACK,
                ),
                Extents3::new(KEYBOARD_TRAY_WIDTH, KEYBOARD_TRAY_DEPTH, t),
            )?;
        }
        if self.options.has_back_panel {
            placer.place(
                "Back Panel",
                "Back Panel",
                Point3::new(t, b.depth - t, 100.0),
                Extents3::new(b.width - 2.0 * t, t, g.rail_z - 100.0),
            )?;
        }
        Ok(())
    }

    fn build_cut_list(&self, g: &DeskGeometry) -> GeometryResult<CutList> {
        let b = &self.base;
        let t = b.t();
        let mut list = CutList::new();
        list.add(
            piece(b, "Desktop", b.depth, t, b.width, 1)
                .with_notes(panel_notes(b, "Desk top", b.depth)),
        )?;
        list.add(
            piece(b, "Leg Panel", g.leg_depth, t, g.leg_height, 2)
                .with_notes(panel_notes(b, "Left and right leg panels", g.leg_depth)),
        )?;
        list.add(
            piece(b, "Back Rail", b.w(), t, b.width - 2.0 * t, 1)
                .with_notes("Ties the leg panels together"),
        )?;

        let drawers = g.drawer_x.len() as u32;
        if drawers > 0 {
            let inner = DRAWER_BOX_WIDTH - 2.0 * t;
            list.add(
                piece(b, "Drawer Front", DRAWER_FRONT_HEIGHT, t, DRAWER_BOX_WIDTH, drawers)
                    .with_notes(format!("{} drawer fronts", b.joinery)),
            )?;
            list.add(piece(
                b,
                "Drawer Side",
                DRAWER_SIDE_HEIGHT,
                t,
                g.drawer_depth - t,
                2 * drawers,
            ))?;
            list.add(piece(b, "Drawer Back", DRAWER_SIDE_HEIGHT, t, inner, drawers))?;
            list.add(
                piece(b, "Drawer Bottom", g.drawer_depth - 2.0 * t, t, inner, drawers)
                    .with_notes(panel_notes(b, "Drawer bottoms", g.drawer_depth - 2.0 * t)),
            )?;
        }
        if self.options.has_keyboard_tray {
            list.add(
                piece(
                    b,
                    "Keyboard Tray",
                    KEYBOARD_TRAY_DEPTH,
                    t,
                    KEYBOARD_TRAY_WIDTH,
                    1,
                )
                .with_notes(panel_notes(b, "Mount on slides", KEYBOARD_TRAY_DEPTH)),
            )?;
        }
        if self.options.has_back_panel {
            list.add(
                piece(b, "Back Panel", g.rail_z - 100.0, t, b.width - 2.0 * t, 1)
                    .with_notes(panel_notes(b, "Modesty panel", g.rail_z - 100.0)),
            )?;
        }
        Ok(list)
    }

    fn operation_name(&self, _g: &DeskGeometry) -> String {
        format!(
            "Desk {}x{}x{}",
            format_mm(self.base.width),
            format_mm(self.base.height),
            format_mm(self.base.depth)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_desk_has_one_drawer() {
        let desk = DeskTemplate::with_defaults().unwrap();
        let g = desk.derive_geometry().unwrap();
        assert_eq!(g.leg_height, 731.0);
        assert_eq!(g.drawer_x.len(), 1);
        assert_eq!(g.drawer_x[0].0, "Right");
        assert_eq!(g.knee_space, 1400.0 - 38.0 - 400.0);
        let list = desk.build_cut_list(&g).unwrap();
        assert_eq!(list.get("Drawer Side").map(|p| p.quantity), Some(2));
    }

    #[test]
    fn test_both_drawers_need_knee_space() {
        let request = TemplateRequest::new("desk")
            .with_dimensions(1200.0, 750.0, 700.0)
            .with_option("drawer_side", "both");
        let desk = DeskTemplate::from_request(&request).unwrap();
        let err = desk.validate().unwrap_err();
        assert!(err.to_string().contains("knee space"));
    }

    #[test]
    fn test_low_desk_rejected() {
        let request = TemplateRequest::new("desk").with_dimensions(1400.0, 300.0, 700.0);
        let err = DeskTemplate::from_request(&request)
            .unwrap()
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            DimensionError::TooSmall {
                dimension: "Height",
                value: 300.0,
                minimum: 419.0,
            }
        );
    }

    #[test]
    fn test_optional_parts() {
        let request = TemplateRequest::new("desk")
            .with_option("has_keyboard_tray", true)
            .with_option("has_back_panel", true)
            .with_option("has_drawer", false);
        let desk = DeskTemplate::from_request(&request).unwrap();
        let g = desk.derive_geometry().unwrap();
        let list = desk.build_cut_list(&g).unwrap();
        assert!(list.get("Keyboard Tray").is_some());
        assert!(list.get("Back Panel").is_some());
        assert!(list.get("Drawer Front").is_none());
    }
}
