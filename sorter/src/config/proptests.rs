//! Property-based tests for the configuration system.

use super::merger::ConfigMerger;
use super::schema::Config;
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn marker_strategy() -> impl Strategy<Value = String> {
    "\\.[a-z]{1,12}"
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(marker_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(prop::collection::vec("[a-z]{1,5}", 0..4)),
        prop::option::of(1u32..100_000),
    )
        .prop_map(|(ownership_marker, recursive, group, file_types, max_name_attempts)| {
            Config {
                ownership_marker,
                recursive,
                group,
                file_types,
                max_name_attempts,
                ..Default::default()
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        max_shrink_iters: 1000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.recursive, high.recursive.or(low.recursive));
        prop_assert_eq!(merged.group, high.group.or(low.group));
        let expected_types = if high.file_types.is_some() {
            high.file_types.clone()
        } else {
            low.file_types.clone()
        };
        prop_assert_eq!(&merged.file_types, &expected_types);
        prop_assert_eq!(
            merged.max_name_attempts,
            high.max_name_attempts.or(low.max_name_attempts)
        );
    }

    #[test]
    fn merge_with_self_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    #[test]
    fn generated_configs_are_valid(config in config_strategy()) {
        let mut config = config;
        if config.ownership_marker.as_deref() == Some(config.ignore_marker()) {
            config.ownership_marker = None;
        }
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn yaml_roundtrip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
