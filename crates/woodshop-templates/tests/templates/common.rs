//! Shared helpers for template tests

use woodshop_core::{verify_cut_list, BoardPlacement, CutList};
use woodshop_templates::{create, BuildPlan, PlanOutcome, Template, TemplateRequest};

/// Glazing seated in a picture frame rabbet reaches under the rails.
const SEATED_PARTS: [&str; 3] = ["Glass", "Mat", "Backing Board"];

/// Mitered rails are modeled at full length and share their corner squares.
const MITERED_PARTS: [&str; 2] = ["Top/Bottom Rail", "Side Rail"];

pub fn built(template: &Template) -> (BuildPlan, CutList) {
    match template.plan().expect("no geometry fault") {
        PlanOutcome::Built { plan, cut_list } => (plan, cut_list),
        PlanOutcome::Rejected(reason) => panic!("{} rejected: {}", template.kind(), reason),
    }
}

pub fn build(request: &TemplateRequest) -> (BuildPlan, CutList) {
    built(&create(request).expect("valid request"))
}

fn checked_for_overlap(board: &BoardPlacement) -> bool {
    board.rotation_x_deg == 0.0 && !SEATED_PARTS.contains(&board.part.as_str())
}

/// Two different mitered rails meeting at a corner.
fn shares_miter(a: &BoardPlacement, b: &BoardPlacement) -> bool {
    a.part != b.part
        && MITERED_PARTS.contains(&a.part.as_str())
        && MITERED_PARTS.contains(&b.part.as_str())
}

/// Names of the first pair of solid boards whose interiors intersect.
pub fn first_overlap(boards: &[BoardPlacement]) -> Option<(String, String)> {
    let solid: Vec<&BoardPlacement> = boards.iter().filter(|b| checked_for_overlap(b)).collect();
    for (i, a) in solid.iter().enumerate() {
        for b in &solid[i + 1..] {
            if shares_miter(a, b) {
                continue;
            }
            if a.overlaps(b, 1e-6) {
                return Some((a.name.clone(), b.name.clone()));
            }
        }
    }
    None
}

pub fn assert_consistent(plan: &BuildPlan, cut_list: &CutList) {
    verify_cut_list(&plan.boards, cut_list).expect("cut list matches boards");
    assert_eq!(first_overlap(&plan.boards), None, "{}", plan.operation);
}
