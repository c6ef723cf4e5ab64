//! Property-based tests for `Classifier`.

use super::{Category, Classifier, EXTENSION_TABLE};
use proptest::prelude::*;
use proptest::sample::select;

fn known_extension() -> impl Strategy<Value = &'static str> {
    let all: Vec<&'static str> = EXTENSION_TABLE
        .iter()
        .flat_map(|(_, exts)| exts.iter().copied())
        .collect();
    select(all)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Classification ignores case
    #[test]
    fn category_is_case_insensitive(ext in "[A-Za-z0-9]{1,8}") {
        let classifier = Classifier::new();
        let category = classifier.category_of(&ext);
        prop_assert_eq!(category, classifier.category_of(&ext.to_uppercase()));
        prop_assert_eq!(category, classifier.category_of(&ext.to_lowercase()));
    }

    // Every table entry classifies to a real category
    #[test]
    fn known_extensions_are_never_undefined(ext in known_extension()) {
        let classifier = Classifier::new();
        let category = classifier.category_of(&ext.to_lowercase());
        prop_assert!(!category.is_reserved());
        prop_assert!(classifier.is_category_folder_name(ext));
    }

    // Anything outside the table is UNDEFINED
    #[test]
    fn unmapped_extensions_are_undefined(ext in "[a-z]{9,16}") {
        prop_assert_eq!(Classifier::new().category_of(&ext), Category::Undefined);
    }
}
