use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use std::path::Path;

fn council(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("council").unwrap();
    cmd.env("COUNCIL_CONFIG_DIR", config_dir).env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_commands_require_an_operator() {
    let temp_dir = tempfile::tempdir().unwrap();

    council(temp_dir.path())
        .args(["list", "news"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please log in"));
}

#[test]
fn test_list_filters_by_status() {
    let temp_dir = tempfile::tempdir().unwrap();

    council(temp_dir.path())
        .args(["--operator", "admin", "list", "tenders", "--filter", "closed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solid Waste Management System"))
        .stdout(predicate::str::contains("Water Supply Pipeline Extension").not());
}

#[test]
fn test_list_rejects_unknown_filter_values() {
    let temp_dir = tempfile::tempdir().unwrap();

    council(temp_dir.path())
        .args(["--operator", "admin", "list", "forms", "--filter", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("filter: must be one of: all, certificates"));

    council(temp_dir.path())
        .args(["--operator", "admin", "list", "forms", "--filter", "ALL"])
        .assert()
        .failure();
}

#[test]
fn test_main_admin_cannot_be_deactivated_by_edit() {
    let temp_dir = tempfile::tempdir().unwrap();

    council(temp_dir.path())
        .args(["--operator", "admin", "edit", "users", "1", "status=inactive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot deactivate the main admin account"));
}

#[test]
fn test_list_as_json() {
    let temp_dir = tempfile::tempdir().unwrap();

    let output = council(temp_dir.path())
        .args(["--operator", "admin", "--output", "json", "list", "news"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["collection"], "news");
    assert!(!view["rows"].as_array().unwrap().is_empty());
}

#[test]
fn test_main_admin_cannot_be_deleted() {
    let temp_dir = tempfile::tempdir().unwrap();

    council(temp_dir.path())
        .args(["--operator", "admin", "delete", "users", "1", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot delete the main admin account"));
}

#[test]
fn test_delete_without_confirmation_is_cancelled() {
    let temp_dir = tempfile::tempdir().unwrap();

    // stdin is not a terminal, so nobody can confirm.
    council(temp_dir.path())
        .args(["--operator", "admin", "delete", "news", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion cancelled"));
}

#[test]
fn test_tender_status_change() {
    let temp_dir = tempfile::tempdir().unwrap();

    council(temp_dir.path())
        .args(["--operator", "admin", "status", "tenders", "4", "active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tender 4 is now Active"));

    council(temp_dir.path())
        .args(["--operator", "admin", "status", "tenders", "4", "closed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot change status"));
}

#[test]
fn test_add_reports_missing_fields() {
    let temp_dir = tempfile::tempdir().unwrap();

    council(temp_dir.path())
        .args(["--operator", "admin", "add", "news", "title=Road closure"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("content: is required"));

    council(temp_dir.path())
        .args([
            "--operator",
            "admin",
            "add",
            "news",
            "title=Road closure",
            "content=Main street is closed on Sunday.",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added news item"));
}

#[test]
fn test_config_text_limit_truncates_content() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("council.json"),
        r#"{ "text_limit": 10 }"#,
    )
    .unwrap();

    council(temp_dir.path())
        .args([
            "--operator",
            "admin",
            "--output",
            "json",
            "add",
            "news",
            "title=Short",
            "content=0123456789XYZ",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"0123456789\""))
        .stdout(predicate::str::contains("XYZ").not());
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("council.json"), r#"{ "text_limit": 0 }"#).unwrap();

    council(temp_dir.path())
        .args(["--operator", "admin", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("text_limit must be positive"));
}

#[test]
fn test_settings_get_and_set() {
    let temp_dir = tempfile::tempdir().unwrap();

    council(temp_dir.path())
        .args(["--operator", "admin", "settings", "general", "site_name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("City Municipal Corporation"));

    council(temp_dir.path())
        .args(["--operator", "admin", "settings", "appearance", "primary_color", "#123456"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved successfully!"));

    council(temp_dir.path())
        .args(["--operator", "admin", "settings", "appearance", "primary_color", "blue"])
        .assert()
        .failure();
}

#[test]
fn test_dashboard_shows_totals() {
    let temp_dir = tempfile::tempdir().unwrap();

    council(temp_dir.path())
        .args(["--operator", "admin", "dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tender Management"))
        .stdout(predicate::str::contains("Form downloads"));
}
