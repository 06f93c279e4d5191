//! Placement and cut-list interplay

use woodshop_core::{
    plan_markers, CutList, Extents3, JointMarker, LumberPiece, PartPlacer, Point3,
    MARKER_THICKNESS,
};

#[test]
fn test_placements_match_cut_list_entry() {
    let mut placer = PartPlacer::new();
    for (i, z) in [0.0, 300.0, 600.0].into_iter().enumerate() {
        placer
            .place(
                format!("Shelf {}", i + 1),
                "Shelf",
                Point3::new(19.0, 0.0, z),
                Extents3::new(562.0, 300.0, 19.0),
            )
            .unwrap();
    }
    let boards = placer.finish();

    let mut list = CutList::new();
    list.add(LumberPiece::new("Shelf", 300.0, 19.0, 562.0, 3, "pine"))
        .unwrap();

    let entry = list.get("Shelf").unwrap();
    assert_eq!(boards.len() as u32, entry.quantity);
    for board in &boards {
        assert_eq!(board.size.sorted(), entry.sorted_dims());
    }
}

#[test]
fn test_markers_carry_palette_colour() {
    let markers = vec![
        JointMarker::new(
            "Left Dado",
            "dado",
            Point3::new(18.5, 0.0, 0.0),
            Extents3::new(MARKER_THICKNESS, 300.0, 19.0),
        ),
        JointMarker::new(
            "Corner",
            "unknown_joint",
            Point3::ORIGIN,
            Extents3::new(12.0, 12.0, 100.0),
        ),
    ];
    let placed = plan_markers(&markers, true).unwrap();
    assert_eq!(placed[0].color, "#D9534F");
    assert_eq!(placed[1].color, "#95A5A6");
}
