//! Integration tests for the dbassess CLI.
//!
//! All tests run with `--skip-llm` or fail before any network access.

#![allow(deprecated)] // cargo_bin is deprecated but works fine for standard builds

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const USERS_TF: &str = r#"
resource "databricks_user" "ana" {
  user_name = "ana@contoso.com"
}

resource "databricks_user" "bo" {
  user_name = "bo@fabrikam.io"
}
"#;

const CLUSTER_TF: &str = r#"
resource "databricks_cluster" "etl" {
  cluster_name  = "prod-etl"
  spark_version = "14.3.x-scala2.12"
  node_type_id  = "i3.xlarge"
}
"#;

fn dbassess() -> Command {
    let mut cmd = Command::cargo_bin("dbassess").unwrap();
    cmd.env_remove("DATABRICKS_HOST")
        .env_remove("DATABRICKS_TOKEN")
        .env_remove("DATABRICKS_ENDPOINT")
        .env_remove("PROJECT_ROOT");
    cmd
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let tf_dir = temp_dir.path().join("databricks_tf_files");
    fs::create_dir(&tf_dir).unwrap();
    fs::write(tf_dir.join("users.tf"), USERS_TF).unwrap();
    fs::write(tf_dir.join("clusters.tf"), CLUSTER_TF).unwrap();
    temp_dir
}

// ============================================================================
// Help and Version tests
// ============================================================================

#[test]
fn test_help_shows_all_options() {
    dbassess()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-color"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--project-root"))
        .stdout(predicate::str::contains("--tf-dir"))
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--skip-llm"))
        .stdout(predicate::str::contains("--skip-pdf"));
}

#[test]
fn test_version() {
    dbassess()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Report generation
// ============================================================================

#[test]
fn test_skip_llm_writes_report_and_inventory() {
    let project = project();

    dbassess()
        .args(["--skip-llm", "--skip-pdf", "--no-color", "--project-root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Databricks_Assessment_Report.md"));

    let output_dir = project.path().join("output_summary_agent");
    let markdown = fs::read_to_string(output_dir.join("Databricks_Assessment_Report.md")).unwrap();
    assert!(markdown.contains("### Users: 2 users total"));
    assert!(markdown.contains("| i3.xlarge | 1 |"));
    assert!(markdown.contains("**Configuration files:** 2"));

    let html = fs::read_to_string(output_dir.join("Databricks_Assessment_Report.html")).unwrap();
    assert!(html.contains("<table>"));

    let inventory = fs::read_to_string(output_dir.join("inventory.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&inventory).unwrap();
    assert_eq!(parsed["stats"]["users"], 2);
    assert_eq!(parsed["stats"]["clusters"], 1);
    assert_eq!(parsed["inventory"]["samples"]["clusters"][0], "prod-etl");
}

#[test]
fn test_project_root_from_env() {
    let project = project();

    dbassess()
        .env("PROJECT_ROOT", project.path())
        .args(["--skip-llm", "--skip-pdf", "--no-color"])
        .assert()
        .success();

    assert!(
        project
            .path()
            .join("output_summary_agent")
            .join("Databricks_Assessment_Report.md")
            .exists()
    );
}

#[test]
fn test_missing_tf_dir_produces_empty_report() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");

    dbassess()
        .args(["--skip-llm", "--skip-pdf", "--no-color", "--tf-dir"])
        .arg(temp_dir.path().join("absent"))
        .arg("--output-dir")
        .arg(&output_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Terraform directory not found"));

    let markdown = fs::read_to_string(output_dir.join("Databricks_Assessment_Report.md")).unwrap();
    assert!(markdown.contains("**Total resources:** 0"));

    let inventory = fs::read_to_string(output_dir.join("inventory.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&inventory).unwrap();
    assert_eq!(parsed["stats"]["users"], 0);
    assert_eq!(parsed["stats"]["uc_catalogs"], 0);
}

#[test]
fn test_missing_llm_settings_fail_without_skip() {
    let project = project();

    dbassess()
        .args(["--skip-pdf", "--project-root"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABRICKS_HOST"));

    assert!(!project.path().join("output_summary_agent").exists());
}

#[test]
fn test_custom_title() {
    let project = project();

    dbassess()
        .args(["--skip-llm", "--skip-pdf", "--title", "Acme Workspace Review", "--project-root"])
        .arg(project.path())
        .assert()
        .success();

    let markdown = fs::read_to_string(
        project
            .path()
            .join("output_summary_agent")
            .join("Databricks_Assessment_Report.md"),
    )
    .unwrap();
    assert!(markdown.starts_with("# Acme Workspace Review"));
}
