//! Property-based tests for name resolution.

use std::fs;

use super::naming::strip_dup_tag;
use super::{NameResolver, ResolutionStrategy};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    // With N names taken the next free suffix is exactly N
    #[test]
    fn suffix_counts_existing_duplicates(
        stem in "[a-z]{1,8}",
        ext in prop::option::of("[a-z]{1,4}"),
        taken in 0u32..12
    ) {
        let dir = tempfile::tempdir().unwrap();
        let dot_ext = ext.map(|e| format!(".{e}")).unwrap_or_default();
        let original = format!("{stem}{dot_ext}");
        if taken > 0 {
            fs::write(dir.path().join(&original), b"").unwrap();
        }
        for n in 1..taken {
            fs::write(dir.path().join(format!("{stem} - dup ({n}){dot_ext}")), b"").unwrap();
        }

        let resolver = NameResolver::new();
        let first = resolver.resolve(&dir.path().join(&original)).unwrap();
        let second = resolver.resolve(&dir.path().join(&original)).unwrap();
        prop_assert_eq!(&first, &second);

        let expected = if taken == 0 {
            ResolutionStrategy::Original
        } else {
            ResolutionStrategy::Suffixed(taken)
        };
        prop_assert_eq!(first.strategy, expected);
        prop_assert!(!dir.path().join(&first.file_name).exists());
    }

    // Stripping a tag we generated gives back the base name
    #[test]
    fn strip_inverts_tagging(stem in "[a-z ]{1,12}", n in 1u32..100_000) {
        let tagged = format!("{stem} - dup ({n})");
        prop_assert_eq!(strip_dup_tag(&tagged), stem.as_str());
        prop_assert_eq!(strip_dup_tag(strip_dup_tag(&tagged)), strip_dup_tag(&stem));
    }
}
