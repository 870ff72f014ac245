//! `pageparts validate` and `pageparts list` end to end.

use assert_cmd::Command;
use predicates::prelude::*;
use pageparts::test_utils::ConfigFixture;
use tempfile::TempDir;

const BROKEN: &str = r#"
components:
  - name: list
    templates: [{ name: list, source: "{{ item | safe }}" }]
  - name: item
    templates: [{ name: item, source: "I" }]
pages:
  - route: /
    parts:
      - name: list
        children: [{ name: itme }]
"#;

fn write(fixture: ConfigFixture) -> TempDir {
    let temp = TempDir::new().unwrap();
    fixture.write_to(temp.path()).unwrap();
    temp
}

fn pageparts(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pageparts").unwrap();
    cmd.current_dir(dir.path()).env_remove("PAGEPARTS_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_validate_clean_app() {
    let dir = write(ConfigFixture::shop());
    pageparts(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 components and 3 pages are valid"));
}

#[test]
fn test_validate_reports_unknown_component_with_suggestion() {
    let dir = write(ConfigFixture::shop().with_config(BROKEN));
    pageparts(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("/ [list > itme]: Unknown component 'itme' (did you mean item?)"))
        .stderr(predicate::str::contains("Validation found 1 issue(s)"));
}

#[test]
fn test_validate_json_output() {
    let dir = write(ConfigFixture::shop().with_config(BROKEN));
    let output = pageparts(&dir).args(["validate", "--format", "json"]).output().unwrap();
    assert!(!output.status.success());

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results["valid"], false);
    assert_eq!(results["components"], 2);
    assert_eq!(results["issues"][0]["issue"], "unknown_component");
    assert_eq!(results["issues"][0]["name"], "itme");
    assert_eq!(results["issues"][0]["parts"], serde_json::json!(["list", "itme"]));
}

#[test]
fn test_list_shows_components_pages_and_aliases() {
    let dir = write(ConfigFixture::shop());
    pageparts(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Components:"))
        .stdout(predicate::str::contains("[list, compact]"))
        .stdout(predicate::str::contains("data: static (2 rows, key 'id')"))
        .stdout(predicate::str::contains("Pages:"))
        .stdout(predicate::str::contains("(auth)"))
        .stdout(predicate::str::contains("/Products/ → /products/"));
}
