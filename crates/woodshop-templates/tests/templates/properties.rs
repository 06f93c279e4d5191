//! Property tests: any positive envelope either builds a consistent plan or
//! is rejected with a reason, never a geometry fault

use crate::common::first_overlap;
use proptest::prelude::*;
use woodshop_core::verify_cut_list;
use woodshop_templates::{create, names, PlanOutcome, TemplateRequest};

fn request_strategy() -> impl Strategy<Value = TemplateRequest> {
    (
        prop::sample::select(names()),
        1.0f64..3000.0,
        1.0f64..2000.0,
        1.0f64..1500.0,
        prop::sample::select(vec!["90x19", "90x12", "90x45", "140x19", "42x19"]),
    )
        .prop_map(|(name, width, height, depth, lumber)| {
            TemplateRequest::new(name)
                .with_dimensions(width, height, depth)
                .with_lumber(lumber)
        })
}

proptest! {
    #[test]
    fn test_plan_is_consistent_or_rejected(request in request_strategy()) {
        let template = create(&request).unwrap();
        match template.plan() {
            Ok(PlanOutcome::Built { plan, cut_list }) => {
                prop_assert!(verify_cut_list(&plan.boards, &cut_list).is_ok());
                prop_assert_eq!(first_overlap(&plan.boards), None);
                prop_assert!(cut_list.total_pieces() > 0);
            }
            Ok(PlanOutcome::Rejected(reason)) => {
                prop_assert!(!reason.to_string().is_empty());
            }
            Err(fault) => prop_assert!(false, "geometry fault: {}", fault),
        }
    }

    #[test]
    fn test_result_populates_exactly_one_side(request in request_strategy()) {
        let result = create(&request).unwrap().generate().unwrap();
        if result.success {
            prop_assert!(result.error.is_empty());
            prop_assert!(!result.build_script.is_empty());
            prop_assert!(!result.cut_list.is_empty());
        } else {
            prop_assert!(!result.error.is_empty());
            prop_assert!(result.build_script.is_empty());
            prop_assert!(result.cut_list.is_empty());
        }
    }
}
