//! Stock descriptor parsing properties

use proptest::prelude::*;
use woodshop_core::{LumberError, LumberSpec};

proptest! {
    #[test]
    fn parses_any_positive_pair(w in 0.5f64..1000.0, t in 0.5f64..200.0) {
        let spec = LumberSpec::parse(&format!("{w}x{t}")).unwrap();
        prop_assert_eq!(spec.width, w);
        prop_assert_eq!(spec.thickness, t);
    }

    #[test]
    fn separator_case_and_padding_do_not_matter(w in 1u32..500, t in 1u32..100) {
        let lower = LumberSpec::parse(&format!("{w}x{t}")).unwrap();
        let upper = LumberSpec::parse(&format!("  {w} X {t}  ")).unwrap();
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn display_parses_back(w in 1u32..500, t in 1u32..100) {
        let spec = LumberSpec::parse(&format!("{w}x{t}")).unwrap();
        prop_assert_eq!(LumberSpec::parse(&spec.to_string()).unwrap(), spec);
    }

    #[test]
    fn alphabetic_descriptors_fail_naming_the_input(s in "[a-wyzA-WYZ]{1,12}") {
        match LumberSpec::parse(&s) {
            Err(err @ LumberError::InvalidFormat { .. }) => {
                let msg = err.to_string();
                prop_assert!(msg.contains(&s));
                prop_assert!(msg.contains("WIDTHxTHICKNESS"));
            }
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }
}

#[test]
fn test_abc_is_rejected() {
    let err = LumberSpec::parse("abc").unwrap_err();
    assert!(err.to_string().contains("'abc'"));
}

#[test]
fn test_from_str() {
    let spec: LumberSpec = "90x45".parse().unwrap();
    assert_eq!(spec.thickness, 45.0);
}
