//! Every template at its default settings

use crate::common::{assert_consistent, build, built};
use woodshop_templates::{
    names, BookshelfTemplate, CabinetTemplate, CuttingBoardTemplate, DeskTemplate,
    PictureFrameTemplate, ProjectTemplate, ShelfBracketTemplate, StorageBoxTemplate,
    TableTemplate, TableVariant, Template, TemplateRequest, TrayTemplate, WorkbenchTemplate,
};

fn variant_defaults() -> Vec<Template> {
    vec![
        Template::Bookshelf(BookshelfTemplate::with_defaults().unwrap()),
        Template::StorageBox(StorageBoxTemplate::with_defaults().unwrap()),
        Template::Table(TableTemplate::with_variant(TableVariant::Dining).unwrap()),
        Template::Table(TableTemplate::with_variant(TableVariant::Coffee).unwrap()),
        Template::Table(TableTemplate::with_variant(TableVariant::End).unwrap()),
        Template::Cabinet(CabinetTemplate::with_defaults().unwrap()),
        Template::Workbench(WorkbenchTemplate::with_defaults().unwrap()),
        Template::Desk(DeskTemplate::with_defaults().unwrap()),
        Template::CuttingBoard(CuttingBoardTemplate::with_defaults().unwrap()),
        Template::PictureFrame(PictureFrameTemplate::with_defaults().unwrap()),
        Template::ShelfBracket(ShelfBracketTemplate::with_defaults().unwrap()),
        Template::Tray(TrayTemplate::with_defaults().unwrap()),
    ]
}

#[test]
fn test_every_variant_default_builds_consistently() {
    for template in variant_defaults() {
        let (plan, cut_list) = built(&template);
        assert!(!plan.boards.is_empty(), "{}", template.kind());
        assert_consistent(&plan, &cut_list);
    }
}

#[test]
fn test_every_registered_name_builds_from_a_bare_request() {
    for name in names() {
        let (plan, cut_list) = build(&TemplateRequest::new(name));
        assert_consistent(&plan, &cut_list);
    }
}

#[test]
fn test_generate_is_repeatable() {
    for template in variant_defaults() {
        let first = template.generate().unwrap();
        let second = template.generate().unwrap();
        assert!(first.success);
        assert!(first.error.is_empty());
        assert_eq!(first, second);
    }
}

#[test]
fn test_marker_flag_suppresses_markers() {
    for name in names() {
        let request = TemplateRequest::new(name).with_joint_markers(false);
        let (plan, _) = build(&request);
        assert!(plan.markers.is_empty(), "{}", name);

        let result = woodshop_templates::create(&request)
            .unwrap()
            .generate()
            .unwrap();
        assert!(!result.build_script.contains("# Marker:"), "{}", name);
    }
}

#[test]
fn test_markers_only_on_joined_templates() {
    for (name, expected) in [
        ("bookshelf", 10),
        ("box", 8),
        ("table", 8),
        ("cabinet", 8),
        ("picture_frame", 8),
        ("shelf_bracket", 2),
        ("workbench", 0),
        ("desk", 0),
        ("cutting_board", 0),
        ("tray", 0),
    ] {
        let (plan, _) = build(&TemplateRequest::new(name));
        assert_eq!(plan.markers.len(), expected, "{}", name);
    }
}

#[test]
fn test_script_names_operation_and_every_board() {
    let template = BookshelfTemplate::with_defaults().unwrap();
    let result = template.generate().unwrap();
    let script = &result.build_script;
    assert!(script.contains("model.start_operation(\"Bookshelf 600x1000x300\", true)"));
    assert!(script.contains("Created Bookshelf 600x1000x300 successfully"));
    for name in ["Left Side", "Right Side", "Bottom", "Top", "Shelf 1", "Shelf 2", "Shelf 3"] {
        assert!(
            script.contains(&format!("group.name = \"{}\"", name)),
            "missing {}",
            name
        );
    }
}
