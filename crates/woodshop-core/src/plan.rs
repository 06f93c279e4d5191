//! Cross-checks between a set of placements and the cut list built for it.

use crate::cut_list::CutList;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::BoardPlacement;

const DIM_TOLERANCE: f64 = 1e-6;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= DIM_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Check that every board names a cut-list entry, that each entry's quantity
/// equals the number of boards naming it, and that sizes agree up to
/// orientation.
pub fn verify_cut_list(boards: &[BoardPlacement], cut_list: &CutList) -> GeometryResult<()> {
    for board in boards {
        if cut_list.get(&board.part).is_none() {
            return Err(GeometryError::CutListMismatch {
                part: board.part.clone(),
                reason: format!("board '{}' has no cut-list entry", board.name),
            });
        }
    }

    for piece in cut_list {
        let matching: Vec<&BoardPlacement> =
            boards.iter().filter(|b| b.part == piece.name).collect();
        if matching.len() != piece.quantity as usize {
            return Err(GeometryError::CutListMismatch {
                part: piece.name.clone(),
                reason: format!(
                    "quantity {} but {} boards placed",
                    piece.quantity,
                    matching.len()
                ),
            });
        }
        let expected = piece.sorted_dims();
        for board in matching {
            let actual = board.size.sorted();
            if !expected.iter().zip(actual.iter()).all(|(a, b)| close(*a, *b)) {
                return Err(GeometryError::CutListMismatch {
                    part: piece.name.clone(),
                    reason: format!(
                        "board '{}' is {:?} but the cut list says {:?}",
                        board.name, actual, expected
                    ),
                });
            }
        }
    }
    Ok(())
}
