//! Integration tests for the `proptree properties` command.

use predicates::prelude::*;

use crate::common::TestProject;

#[tokio::test]
async fn test_properties_text_output() {
    let project = TestProject::new();
    let input = project.write_annotation().await;

    project
        .command()
        .arg("properties")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("glomeruli"))
        .stdout(predicate::str::contains("area (numeric, 80.5 to 120, 2 distinct)"))
        .stdout(predicate::str::contains("cell_types --> podocyte"))
        .stdout(predicate::str::contains("label (categorical: healthy, sclerotic)"));
}

#[tokio::test]
async fn test_properties_json_output() {
    let project = TestProject::new();
    let input = project.write_annotation().await;

    let output = project
        .command()
        .arg("properties")
        .arg(&input)
        .args(["--format", "json", "--ignore", "label"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        summary["paths"],
        serde_json::json!([
            "area",
            "cell_types --> mesangial",
            "cell_types --> podocyte"
        ])
    );
    assert_eq!(summary["stats"]["area"]["kind"], "numeric");
    assert_eq!(summary["annotation_names"], serde_json::json!(["glomeruli"]));
}

#[tokio::test]
async fn test_properties_nested_depth_flag() {
    let project = TestProject::new();
    let input = project.write_annotation().await;

    project
        .command()
        .arg("properties")
        .arg(&input)
        .args(["--nested-depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("area"))
        .stdout(predicate::str::contains("cell_types").not());
}

#[tokio::test]
async fn test_properties_array_of_annotations() {
    let project = TestProject::new();
    let input = project
        .write(
            "annotations.json",
            r#"[
                {"properties": {"name": "a"}, "features": [{"properties": {"x": 1}}]},
                {"properties": {"name": "b"}, "features": [{"properties": {"y": "z"}}]}
            ]"#,
        )
        .await;

    project
        .command()
        .arg("properties")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("a, b"))
        .stdout(predicate::str::contains("x (numeric"))
        .stdout(predicate::str::contains("y (categorical: z)"));
}

#[tokio::test]
async fn test_properties_missing_features() {
    let project = TestProject::new();
    let input = project.write("annotations.json", r#"{"type": "FeatureCollection"}"#).await;

    project
        .command()
        .arg("properties")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("features"));
}
