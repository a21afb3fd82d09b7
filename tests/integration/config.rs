//! Config file handling across commands.

use predicates::prelude::*;

use crate::common::TestProject;

#[tokio::test]
async fn test_config_flag_sets_title_and_ignore() {
    let project = TestProject::new();
    let input = project.write_reference_paths().await;
    let config = project
        .write(
            "proptree.toml",
            "root_title = \"Annotations\"\nignore = [\"prop3\", \"sub_prop3\"]\n",
        )
        .await;

    project
        .command()
        .arg("--config")
        .arg(&config)
        .arg("tree")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Annotations (0)"))
        .stdout(predicate::str::contains("prop3").not());
}

#[tokio::test]
async fn test_config_env_var_custom_delimiter() {
    let project = TestProject::new();
    let input = project.write("paths.txt", "a / b\na / c\n").await;
    let config = project.write("env.toml", "delimiter = \" / \"\n").await;

    project
        .command()
        .env("PROPTREE_CONFIG_PATH", &config)
        .arg("tree")
        .arg(&input)
        .args(["--lookup", "0-0-1"])
        .assert()
        .success()
        .stdout("a / c\n");
}

#[tokio::test]
async fn test_invalid_config_fails() {
    let project = TestProject::new();
    let input = project.write_reference_paths().await;
    let config = project.write("bad.toml", "delimiter = \"   \"\n").await;

    project
        .command()
        .arg("--config")
        .arg(&config)
        .arg("tree")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("delimiter"));
}

#[tokio::test]
async fn test_verbose_logs_to_stderr() {
    let project = TestProject::new();
    let input = project.write_annotation().await;

    project
        .command()
        .arg("--verbose")
        .arg("properties")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Summarised annotation properties"));
}
