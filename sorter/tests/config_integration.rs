//! Configuration assembled from files and the environment, applied to runs.

mod common;

use std::env;
use std::fs;

use common::{sort, Tree};
use serial_test::serial;
use sorter::config::ConfigBuilder;
use sorter::{MemoryHistory, NullSink, SortEngine, SortOptions};

#[test]
#[serial]
fn test_custom_markers_from_file() {
    let data = Tree::new();
    fs::write(
        data.path("config.yaml"),
        "ownership_marker: .owned\nignore_marker: .hands-off\n",
    )
    .unwrap();
    let config = ConfigBuilder::new()
        .with_data_dir(data.root())
        .skip_env()
        .build()
        .unwrap();

    let tree = Tree::new();
    tree.file("a.pdf").file("private/b.txt");
    fs::write(tree.path("private/.hands-off"), "").unwrap();

    let mut history = MemoryHistory::new();
    let mut sink = NullSink;
    SortEngine::with_relocator(&mut history, &mut sink, config.file_relocator())
        .run(&SortOptions::new(tree.root()).with_recursive(true))
        .unwrap();

    assert!(tree.path("PDF/.owned").is_file());
    assert!(!tree.path("PDF/.sorter").exists());
    assert!(tree.path("private/b.txt").is_file());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let data = Tree::new();
    fs::write(data.path("config.yaml"), "group: false\nfile_types: [pdf]\n").unwrap();
    env::set_var("SORTER_GROUP", "true");

    let result = ConfigBuilder::new().with_data_dir(data.root()).build();
    env::remove_var("SORTER_GROUP");
    let config = result.unwrap();

    assert_eq!(config.group, Some(true));
    assert_eq!(config.file_types(), ["pdf"]);

    let tree = Tree::new();
    tree.file("a.pdf").file("b.png");
    let options = SortOptions::new(tree.root())
        .with_group(config.group.unwrap_or_default())
        .with_file_types(config.file_types().to_vec());
    let (report, _, _) = sort(&options);
    report.unwrap();

    assert!(tree.path("document/a.pdf").is_file());
    assert!(tree.path("b.png").is_file());
}

#[test]
#[serial]
fn test_invalid_environment_value_fails() {
    env::set_var("SORTER_RECURSIVE", "sometimes");
    let result = ConfigBuilder::new().skip_files().build();
    env::remove_var("SORTER_RECURSIVE");
    assert!(result.is_err());
}
