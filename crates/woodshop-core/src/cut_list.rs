//! Cut lists.
//!
//! A cut list is the shopping/bill-of-materials view of a project: one entry
//! per distinct piece with a quantity. Entries keep insertion order and are
//! never merged here; templates group identical pieces themselves.

use crate::error::{GeometryError, GeometryResult};
use crate::lumber::{format_mm, LumberSpec};
use serde::{Deserialize, Serialize};

/// One line of a cut list.
///
/// `width` is the face width, `height` the thickness and `length` the
/// grain-direction length, all in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumberPiece {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub quantity: u32,
    pub material: String,
    #[serde(default)]
    pub notes: String,
}

impl LumberPiece {
    pub fn new(
        name: impl Into<String>,
        width: f64,
        height: f64,
        length: f64,
        quantity: u32,
        material: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            length,
            quantity,
            material: material.into(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Dimensions in ascending order.
    pub fn sorted_dims(&self) -> [f64; 3] {
        let mut dims = [self.width, self.height, self.length];
        dims.sort_by(f64::total_cmp);
        dims
    }

    /// `W x T x L` summary, e.g. `300 x 19 x 562`.
    pub fn dimension_label(&self) -> String {
        format!(
            "{} x {} x {}",
            format_mm(self.width),
            format_mm(self.height),
            format_mm(self.length)
        )
    }

    fn validate(&self) -> GeometryResult<()> {
        let dims = [self.width, self.height, self.length];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(GeometryError::InvalidPiece {
                name: self.name.clone(),
                reason: format!("dimensions must be positive (got {})", self.dimension_label()),
            });
        }
        if self.quantity == 0 {
            return Err(GeometryError::InvalidPiece {
                name: self.name.clone(),
                reason: "quantity must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Ordered collection of cut-list entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CutList {
    pieces: Vec<LumberPiece>,
}

impl CutList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry after checking its dimensions and quantity.
    pub fn add(&mut self, piece: LumberPiece) -> GeometryResult<()> {
        piece.validate()?;
        self.pieces.push(piece);
        Ok(())
    }

    pub fn pieces(&self) -> &[LumberPiece] {
        &self.pieces
    }

    pub fn get(&self, name: &str) -> Option<&LumberPiece> {
        self.pieces.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Sum of quantities over all entries.
    pub fn total_pieces(&self) -> u32 {
        self.pieces.iter().map(|p| p.quantity).sum()
    }

    pub fn into_pieces(self) -> Vec<LumberPiece> {
        self.pieces
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LumberPiece> {
        self.pieces.iter()
    }
}

impl<'a> IntoIterator for &'a CutList {
    type Item = &'a LumberPiece;
    type IntoIter = std::slice::Iter<'a, LumberPiece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}

/// Glue-up note for a panel wider than the stock face, if one is needed.
pub fn glue_up_note(face_width: f64, stock: &LumberSpec) -> Option<String> {
    stock.needs_glue_up(face_width).then(|| {
        format!(
            "glue up {} boards of {}mm stock to reach {}mm",
            stock.boards_for_width(face_width),
            format_mm(stock.width),
            format_mm(face_width)
        )
    })
}
