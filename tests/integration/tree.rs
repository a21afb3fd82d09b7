//! Integration tests for the `proptree tree` command.

use predicates::prelude::*;

use crate::common::TestProject;

#[tokio::test]
async fn test_tree_reference_output() {
    let project = TestProject::new();
    let input = project.write_reference_paths().await;

    project
        .command()
        .arg("tree")
        .arg(&input)
        .args(["--ignore", "prop3,sub_prop3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Features (0)"))
        .stdout(predicate::str::contains("├── prop5 (0-0)"))
        .stdout(predicate::str::contains("│   │   └── sub_sub_prop2 (0-0-0-1)"))
        .stdout(predicate::str::contains("├── prop4 (0-1)"))
        .stdout(predicate::str::contains("└── prop2 (0-3)"))
        .stdout(predicate::str::contains("prop3").not())
        .stdout(predicate::str::contains("sub_prop3").not());
}

#[tokio::test]
async fn test_tree_json_format() {
    let project = TestProject::new();
    let input = project.write_reference_paths().await;

    let output = project
        .command()
        .arg("tree")
        .arg(&input)
        .args(["--ignore", "prop3", "--ignore", "sub_prop3", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tree"]["title"], "Features");
    assert_eq!(json["tree"]["key"], "0");
    assert_eq!(json["tree"]["children"].as_array().unwrap().len(), 4);
    assert_eq!(json["tree"]["children"][1]["title"], "prop4");
    assert_eq!(json["keys"]["0-1-1"], "prop4 --> sub_prop2");
    assert_eq!(json["keys"].as_object().unwrap().len(), 10);
}

#[tokio::test]
async fn test_tree_text_format_with_depth() {
    let project = TestProject::new();
    let input = project.write("paths.txt", "a --> b --> c\nd\n").await;

    project
        .command()
        .arg("tree")
        .arg(&input)
        .args(["--format", "text", "--depth", "1", "--title", "Cells"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cells (0)"))
        .stdout(predicate::str::contains("  a (0-0)"))
        .stdout(predicate::str::contains("  d (0-1)"))
        .stdout(predicate::str::contains("b (0-0-0)").not());
}

#[tokio::test]
async fn test_tree_lookup_and_key_for() {
    let project = TestProject::new();
    let input = project.write_reference_paths().await;

    project
        .command()
        .arg("tree")
        .arg(&input)
        .args(["--ignore", "prop3,sub_prop3", "--lookup", "0-0-0-1"])
        .assert()
        .success()
        .stdout("prop5 --> sub_prop1 --> sub_sub_prop2\n");

    project
        .command()
        .arg("tree")
        .arg(&input)
        .args(["--ignore", "prop3,sub_prop3", "--key-for", "prop4 --> sub_prop1"])
        .assert()
        .success()
        .stdout("0-1-0\n");
}

#[tokio::test]
async fn test_tree_unknown_key_fails() {
    let project = TestProject::new();
    let input = project.write_reference_paths().await;

    project
        .command()
        .arg("tree")
        .arg(&input)
        .args(["--lookup", "0-9-9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("0-9-9"));
}

#[tokio::test]
async fn test_tree_json_array_input() {
    let project = TestProject::new();
    let input = project
        .write("paths.json", r#"["prop4 --> sub_prop1", "prop4 --> sub_prop2"]"#)
        .await;

    project
        .command()
        .arg("tree")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("└── prop4 (0-0)"))
        .stdout(predicate::str::contains("    ├── sub_prop1 (0-0-0)"))
        .stdout(predicate::str::contains("    └── sub_prop2 (0-0-1)"));
}

#[tokio::test]
async fn test_tree_rejects_non_string_json_entries() {
    let project = TestProject::new();
    let input = project.write("paths.json", r#"["ok", 3]"#).await;

    project
        .command()
        .arg("tree")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a string"));
}

#[tokio::test]
async fn test_tree_from_geojson() {
    let project = TestProject::new();
    let input = project.write_annotation().await;

    project
        .command()
        .arg("tree")
        .arg(&input)
        .arg("--geojson")
        .assert()
        .success()
        .stdout(predicate::str::contains("cell_types (0-0)"))
        .stdout(predicate::str::contains("mesangial (0-0-0)"))
        .stdout(predicate::str::contains("podocyte (0-0-1)"))
        .stdout(predicate::str::contains("area (0-1)"))
        .stdout(predicate::str::contains("label (0-2)"));
}

#[tokio::test]
async fn test_tree_empty_input() {
    let project = TestProject::new();
    let input = project.write("paths.txt", "\n\n").await;

    project
        .command()
        .arg("tree")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("(no properties)"));
}

#[tokio::test]
async fn test_tree_missing_file() {
    let project = TestProject::new();

    project
        .command()
        .args(["tree", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"));
}

#[tokio::test]
async fn test_tree_invalid_format() {
    let project = TestProject::new();
    let input = project.write_reference_paths().await;

    project
        .command()
        .arg("tree")
        .arg(&input)
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[tokio::test]
async fn test_tree_key_for_node_reached_through_ignored_segment() {
    let project = TestProject::new();
    let input = project.write("paths.txt", "a\nx --> a\n").await;

    project
        .command()
        .arg("tree")
        .arg(&input)
        .args(["--ignore", "x", "--key-for", "a"])
        .assert()
        .success()
        .stdout("0-0\n");

    project
        .command()
        .arg("tree")
        .arg(&input)
        .args(["--ignore", "x", "--key-for", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no node was generated"));
}
