//! Property-based tests for `PathEntity`.

use std::path::PathBuf;

use super::PathEntity;
use proptest::prelude::*;

fn file_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _-]{1,16}(\\.[A-Za-z0-9]{1,5}){0,2}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Stem and extension always reassemble into the name
    #[test]
    fn stem_and_extension_reassemble(name in file_name()) {
        let entity = PathEntity::new(PathBuf::from("/data").join(&name)).unwrap();
        let original_ext = &name[entity.stem().len()..];
        if entity.extension().is_empty() {
            prop_assert_eq!(entity.stem(), name.as_str());
        } else {
            prop_assert_eq!(original_ext.to_lowercase(), format!(".{}", entity.extension()));
        }
    }

    // Extensions never contain dots or uppercase letters
    #[test]
    fn extension_is_lowercase_without_dot(name in file_name()) {
        let entity = PathEntity::new(PathBuf::from("/data").join(&name)).unwrap();
        prop_assert!(!entity.extension().contains('.'));
        prop_assert_eq!(entity.extension().to_lowercase(), entity.extension());
    }

    // A leading dot never starts an extension
    #[test]
    fn dotfile_has_no_extension(name in "[a-z]{1,12}") {
        let entity = PathEntity::new(PathBuf::from("/data").join(format!(".{name}"))).unwrap();
        prop_assert_eq!(entity.extension(), "");
        prop_assert_eq!(entity.stem(), format!(".{name}"));
    }

    // set_path gives the same snapshot as constructing fresh
    #[test]
    fn set_path_matches_new(first in file_name(), second in file_name()) {
        let mut entity = PathEntity::new(PathBuf::from("/a").join(&first)).unwrap();
        let target = PathBuf::from("/b/c").join(&second);
        entity.set_path(&target).unwrap();
        prop_assert_eq!(entity, PathEntity::new(target).unwrap());
    }
}
