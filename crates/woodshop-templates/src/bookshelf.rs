//! Bookshelf: two full-height sides with a top, a bottom and evenly spaced
//! fixed shelves set between them.

use crate::error::{DimensionError, Result};
use crate::registry::TemplateKind;
use crate::request::{require_at_least, TemplateBase, TemplateDefaults, TemplateRequest};
use crate::template::{panel_notes, piece, ProjectTemplate};
use serde::{Deserialize, Serialize};
use woodshop_core::{
    format_mm, CutList, Extents3, GeometryResult, JointMarker, PartPlacer, Point3,
    MARKER_THICKNESS,
};

/// Smallest gap allowed between consecutive horizontal panels (mm).
pub const MIN_SHELF_CLEARANCE: f64 = 50.0;

const DEFAULTS: TemplateDefaults = TemplateDefaults {
    width: 600.0,
    height: 1000.0,
    depth: 300.0,
    lumber: "90x19",
    joinery: "dado",
    material: "pine",
};

/// Bookshelf options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookshelfOptions {
    /// Number of shelves between the top and bottom panels
    pub shelves: u32,
}

impl Default for BookshelfOptions {
    fn default() -> Self {
        Self { shelves: 3 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookshelfTemplate {
    base: TemplateBase,
    options: BookshelfOptions,
}

/// Derived bookshelf layout.
#[derive(Debug, Clone, PartialEq)]
pub struct BookshelfGeometry {
    pub interior_width: f64,
    pub spacing: f64,
    /// Bottom face of each shelf, lowest first
    pub shelf_z: Vec<f64>,
}

impl BookshelfTemplate {
    pub fn new(base: TemplateBase, options: BookshelfOptions) -> Result<Self> {
        require_at_least("bookshelf", "shelves", options.shelves, 1)?;
        Ok(Self { base, options })
    }

    pub fn from_request(request: &TemplateRequest) -> Result<Self> {
        let options = request.parse_options("bookshelf")?;
        Self::new(TemplateBase::from_request(request, &DEFAULTS)?, options)
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            TemplateBase::from_defaults(&DEFAULTS)?,
            BookshelfOptions::default(),
        )
    }

    pub fn options(&self) -> &BookshelfOptions {
        &self.options
    }

    /// Heights of the horizontal panels carried in dados: bottom, shelves, top.
    fn panel_levels(&self, geometry: &BookshelfGeometry) -> Vec<(String, f64)> {
        let mut levels = vec![("Bottom".to_string(), 0.0)];
        for (i, z) in geometry.shelf_z.iter().enumerate() {
            levels.push((format!("Shelf {}", i + 1), *z));
        }
        levels.push(("Top".to_string(), self.base.height - self.base.t()));
        levels
    }
}

impl ProjectTemplate for BookshelfTemplate {
    type Geometry = BookshelfGeometry;

    fn kind(&self) -> TemplateKind {
        TemplateKind::Bookshelf
    }

    fn base(&self) -> &TemplateBase {
        &self.base
    }

    fn derive_geometry(&self) -> std::result::Result<BookshelfGeometry, DimensionError> {
        let b = &self.base;
        let t = b.t();
        let n = self.options.shelves;
        let nf = f64::from(n);

        let interior_width = b.width - 2.0 * t;
        if interior_width < MIN_SHELF_CLEARANCE {
            return Err(DimensionError::TooSmall {
                dimension: "Width",
                value: b.width,
                minimum: 2.0 * t + MIN_SHELF_CLEARANCE,
            });
        }

        let available = b.height - (nf + 2.0) * t;
        let spacing = available / (nf + 1.0);
        if spacing < MIN_SHELF_CLEARANCE {
            let min_height = (nf + 2.0) * t + (nf + 1.0) * MIN_SHELF_CLEARANCE;
            return Err(DimensionError::Constraint(format!(
                "Height {}mm is too small for {} shelves with {}mm lumber \
                 (available height {}mm). Minimum height required: {}mm",
                format_mm(b.height),
                n,
                format_mm(t),
                format_mm(available),
                format_mm(min_height)
            )));
        }

        let shelf_z = (0..n)
            .map(|i| {
                let i = f64::from(i);
                t + (i + 1.0) * spacing + i * t
            })
            .collect();

        Ok(BookshelfGeometry {
            interior_width,
            spacing,
            shelf_z,
        })
    }

    fn emit_placements(&self, g: &BookshelfGeometry, placer: &mut PartPlacer) -> GeometryResult<()> {
        let b = &self.base;
        let t = b.t();
        let side = Extents3::new(t, b.depth, b.height);
        let panel = Extents3::new(g.interior_width, b.depth, t);

        placer.place("Left Side", "Side Panel", Point3::ORIGIN, side)?;
        placer.place("Right Side", "Side Panel", Point3::new(b.width - t, 0.0, 0.0), side)?;
        placer.place("Bottom", "Bottom Panel", Point3::new(t, 0.0, 0.0), panel)?;
        placer.place("Top", "Top Panel", Point3::new(t, 0.0, b.height - t), panel)?;
        for (i, z) in g.shelf_z.iter().enumerate() {
            placer.place(format!("Shelf {}", i + 1), "Shelf", Point3::new(t, 0.0, *z), panel)?;
        }
        Ok(())
    }

    fn emit_markers(&self, g: &BookshelfGeometry) -> Vec<JointMarker> {
        let b = &self.base;
        let t = b.t();
        let size = Extents3::new(MARKER_THICKNESS, b.depth, t);
        let mut markers = Vec::new();
        for (label, z) in self.panel_levels(g) {
            markers.push(JointMarker::new(
                format!("Left Dado {}", label),
                b.joinery.as_str(),
                Point3::new(t - MARKER_THICKNESS, 0.0, z),
                size,
            ));
            markers.push(JointMarker::new(
                format!("Right Dado {}", label),
                b.joinery.as_str(),
                Point3::new(b.width - t, 0.0, z),
                size,
            ));
        }
        markers
    }

    fn build_cut_list(&self, g: &BookshelfGeometry) -> GeometryResult<CutList> {
        let b = &self.base;
        let t = b.t();
        let mut list = CutList::new();
        list.add(
            piece(b, "Side Panel", b.depth, t, b.height, 2)
                .with_notes(panel_notes(b, "Left and right sides", b.depth)),
        )?;
        list.add(
            piece(b, "Shelf", b.depth, t, g.interior_width, self.options.shelves).with_notes(
                panel_notes(b, &format!("Fixed shelves, {} joints", b.joinery), b.depth),
            ),
        )?;
        list.add(
            piece(b, "Top Panel", b.depth, t, g.interior_width, 1)
                .with_notes(panel_notes(b, "Top of bookshelf", b.depth)),
        )?;
        list.add(
            piece(b, "Bottom Panel", b.depth, t, g.interior_width, 1)
                .with_notes(panel_notes(b, "Bottom of bookshelf", b.depth)),
        )?;
        Ok(list)
    }

    fn operation_name(&self, _g: &BookshelfGeometry) -> String {
        format!(
            "Bookshelf {}x{}x{}",
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

    #[test]
    fn test_shelf_spacing() {
        let shelf = BookshelfTemplate::with_defaults().unwrap();
        let g = shelf.derive_geometry().unwrap();
        // (1000 - 5 * 19) / 4
        assert!((g.spacing - 226.25).abs() < 1e-9);
        assert_eq!(g.shelf_z.len(), 3);
        assert!((g.shelf_z[0] - (19.0 + 226.25)).abs() < 1e-9);
        assert_eq!(g.interior_width, 562.0);
    }

    #[test]
    fn test_top_shelf_leaves_clearance_under_top() {
        let shelf = BookshelfTemplate::with_defaults().unwrap();
        let g = shelf.derive_geometry().unwrap();
        let last_top = g.shelf_z[2] + 19.0;
        assert!((1000.0 - 19.0 - last_top - g.spacing).abs() < 1e-9);
    }

    #[test]
    fn test_zero_shelves_rejected_at_construction() {
        let request = TemplateRequest::new("bookshelf").with_option("shelves", 0);
        assert!(BookshelfTemplate::from_request(&request).is_err());
    }

    #[test]
    fn test_markers_per_panel_level() {
        let request = TemplateRequest::new("bookshelf").with_option("shelves", 4);
        let shelf = BookshelfTemplate::from_request(&request).unwrap();
        let PlanOutcome::Built { plan, .. } = shelf.plan().unwrap() else {
            panic!("expected a plan");
        };
        assert_eq!(plan.markers.len(), 2 * (4 + 2));
    }
}
