//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use sorter::config::{Config, ConfigMerger};
///
/// let low = Config { group: Some(false), recursive: Some(true), ..Default::default() };
/// let high = Config { group: Some(true), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.group, Some(true));
/// assert_eq!(result.recursive, Some(true));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources, given from lowest to highest precedence, onto `base`.
    #[must_use]
    pub fn merge(base: Config, sources: Vec<ConfigSource>) -> Config {
        let mut result = base;
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target: every field set in `source`
    /// replaces the target's value. File-type lists are replaced whole.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.ownership_marker.is_some() {
            target.ownership_marker.clone_from(&source.ownership_marker);
        }

        if source.ignore_marker.is_some() {
            target.ignore_marker.clone_from(&source.ignore_marker);
        }

        if source.recursive.is_some() {
            target.recursive = source.recursive;
        }

        if source.group.is_some() {
            target.group = source.group;
        }

        if source.by_extension.is_some() {
            target.by_extension = source.by_extension;
        }

        if source.file_types.is_some() {
            target.file_types.clone_from(&source.file_types);
        }

        if source.max_name_attempts.is_some() {
            target.max_name_attempts = source.max_name_attempts;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source(config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from("/data/config.yaml"),
            config,
        }
    }

    #[test]
    fn test_merge_onto_defaults() {
        let user = Config {
            file_types: Some(vec!["pdf".into()]),
            ..Default::default()
        };
        let merged = ConfigMerger::merge(Config::defaults(), vec![source(user)]);
        assert_eq!(merged.file_types(), ["pdf"]);
        assert_eq!(merged.ownership_marker(), ".sorter");
        assert_eq!(merged.group, Some(false));
    }

    #[test]
    fn test_none_does_not_clear() {
        let mut target = Config::defaults();
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target, Config::defaults());
    }

    #[test]
    fn test_later_source_wins() {
        let first = Config {
            max_name_attempts: Some(5),
            ignore_marker: Some(".a".into()),
            ..Default::default()
        };
        let second = Config {
            max_name_attempts: Some(7),
            ..Default::default()
        };
        let merged = ConfigMerger::merge(Config::default(), vec![source(first), source(second)]);
        assert_eq!(merged.max_name_attempts, Some(7));
        assert_eq!(merged.ignore_marker(), ".a");
    }
}
