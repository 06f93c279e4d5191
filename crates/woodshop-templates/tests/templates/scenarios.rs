//! End-to-end requests with known outcomes

use crate::common::{assert_consistent, build};
use woodshop_templates::{create, TemplateError, TemplateRequest};

#[test]
fn test_bookshelf_cut_list() {
    let request = TemplateRequest::new("bookshelf").with_dimensions(600.0, 1000.0, 300.0);
    let result = create(&request).unwrap().generate().unwrap();
    assert!(result.success);

    let summary: Vec<(&str, u32)> = result
        .cut_list
        .iter()
        .map(|p| (p.name.as_str(), p.quantity))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Side Panel", 2),
            ("Shelf", 3),
            ("Top Panel", 1),
            ("Bottom Panel", 1)
        ]
    );
    let shelf = &result.cut_list[1];
    assert_eq!((shelf.width, shelf.height, shelf.length), (300.0, 19.0, 562.0));
    assert!(shelf.notes.contains("glue up 4 boards"));
}

#[test]
fn test_short_bookshelf_is_rejected_with_reason() {
    let request = TemplateRequest::new("bookshelf").with_dimensions(600.0, 100.0, 300.0);
    let result = create(&request).unwrap().generate().unwrap();
    assert!(!result.success);
    assert!(result.build_script.is_empty());
    assert!(result.cut_list.is_empty());
    assert!(result.error.contains("3 shelves"), "{}", result.error);
    assert!(result.error.contains("19mm"), "{}", result.error);
    assert!(result.error.contains("Minimum height required: 295mm"));
}

#[test]
fn test_box_with_lid() {
    let request = TemplateRequest::new("box")
        .with_dimensions(200.0, 100.0, 150.0)
        .with_lumber("90x12");
    let (plan, cut_list) = build(&request);
    assert_consistent(&plan, &cut_list);
    assert_eq!(plan.operation, "Box 200x100x150");
    let names: Vec<&str> = cut_list.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Front/Back Panel", "Side Panel", "Bottom", "Lid"]);

    let lid = plan.boards.iter().find(|b| b.name == "Lid").unwrap();
    assert_eq!(lid.origin.z, 88.0 + 20.0);
}

#[test]
fn test_box_without_lid_uses_full_height() {
    let request = TemplateRequest::new("box")
        .with_lumber("90x12")
        .with_option("has_lid", false);
    let (plan, cut_list) = build(&request);
    assert!(cut_list.get("Lid").is_none());
    let front = plan.boards.iter().find(|b| b.name == "Front").unwrap();
    assert_eq!(front.size.dz, 100.0);
}

#[test]
fn test_coffee_table_preset() {
    let request = TemplateRequest::new("table")
        .with_lumber("90x45")
        .with_option("variant", "coffee");
    let (plan, cut_list) = build(&request);
    assert_consistent(&plan, &cut_list);
    assert_eq!(plan.operation, "Coffee Table 1200x450x600");
    assert_eq!(cut_list.get("Leg").map(|p| p.length), Some(405.0));
}

#[test]
fn test_table_with_stretchers() {
    let request = TemplateRequest::new("table")
        .with_lumber("90x45")
        .with_option("has_stretchers", true);
    let (plan, cut_list) = build(&request);
    assert_consistent(&plan, &cut_list);
    assert_eq!(cut_list.get("Long Stretcher").map(|p| p.quantity), Some(2));
    assert_eq!(plan.markers.len(), 16);
}

#[test]
fn test_large_workbench_gets_six_legs() {
    let request = TemplateRequest::new("workbench")
        .with_lumber("90x45")
        .with_dimensions(2400.0, 900.0, 700.0);
    let (plan, cut_list) = build(&request);
    assert_consistent(&plan, &cut_list);
    assert_eq!(cut_list.get("Leg").map(|p| p.quantity), Some(6));
    assert_eq!(cut_list.get("Long Apron").map(|p| p.quantity), Some(4));
}

#[test]
fn test_desk_with_everything() {
    let request = TemplateRequest::new("desk")
        .with_dimensions(1800.0, 750.0, 700.0)
        .with_option("drawer_side", "both")
        .with_option("has_keyboard_tray", true)
        .with_option("has_back_panel", true);
    let (plan, cut_list) = build(&request);
    assert_consistent(&plan, &cut_list);
    assert_eq!(cut_list.get("Drawer Side").map(|p| p.quantity), Some(4));
    assert!(plan.boards.iter().any(|b| b.name == "Keyboard Tray"));
}

#[test]
fn test_cabinet_without_doors_or_base() {
    let request = TemplateRequest::new("cabinet")
        .with_option("has_doors", false)
        .with_option("has_base", false)
        .with_option("shelf_count", 0);
    let (plan, cut_list) = build(&request);
    assert_consistent(&plan, &cut_list);
    assert!(cut_list.get("Door").is_none());
    assert!(cut_list.get("Toe Kick").is_none());
    assert!(cut_list.get("Shelf").is_none());
    assert_eq!(plan.markers.len(), 4);
}

#[test]
fn test_picture_frame_with_mat() {
    let request = TemplateRequest::new("picture_frame").with_option("mat_width", 25.0);
    let (plan, cut_list) = build(&request);
    assert_consistent(&plan, &cut_list);
    let layers: Vec<&str> = plan
        .boards
        .iter()
        .skip(4)
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(layers, vec!["Glass", "Mat", "Backing Board"]);
    assert_eq!(cut_list.get("Backing Board").map(|p| p.material.as_str()), Some("mdf"));
}

#[test]
fn test_lumber_descriptor_errors() {
    let err = create(&TemplateRequest::new("bookshelf").with_lumber("abc")).unwrap_err();
    assert!(matches!(err, TemplateError::Lumber(_)));
    assert!(err.to_string().contains("'abc'"));

    let request = TemplateRequest::new("bookshelf").with_lumber(" 140 X 19 ");
    let template = create(&request).unwrap();
    assert_eq!(template.base().w(), 140.0);
}

#[test]
fn test_unknown_option_is_rejected() {
    let request = TemplateRequest::new("tray").with_option("has_handels", true);
    let err = create(&request).unwrap_err();
    assert!(matches!(err, TemplateError::InvalidOptions { .. }));
    assert!(err.to_string().contains("has_handels"));
}

#[test]
fn test_shelving_unit_alias() {
    let template = create(&TemplateRequest::new("Shelving_Unit")).unwrap();
    assert_eq!(template.kind().name(), "bookshelf");
}
