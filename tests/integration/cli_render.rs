//! `pageparts render` end to end.

use assert_cmd::Command;
use predicates::prelude::*;
use pageparts::test_utils::ConfigFixture;
use tempfile::TempDir;

fn shop_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    ConfigFixture::shop().write_to(temp.path()).unwrap();
    temp
}

fn pageparts(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pageparts").unwrap();
    cmd.current_dir(dir.path()).env_remove("PAGEPARTS_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_render_full_document_with_default_config() {
    let dir = shop_dir();
    pageparts(&dir)
        .args(["render", "/products/"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("<h1>Producten</h1>"))
        .stdout(predicate::str::contains(r#"<template id="item">"#));
}

#[test]
fn test_render_fragment_in_requested_locale() {
    let dir = shop_dir();
    pageparts(&dir)
        .args(["render", "/products/", "--locale", "en", "--fragment"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#"<list data-component="list"><h1>Products</h1><ul><item data-component="item">"#,
        ))
        .stdout(predicate::str::contains("<!DOCTYPE").not());
}

#[test]
fn test_render_several_paths_in_argument_order() {
    let dir = shop_dir();
    let output = pageparts(&dir)
        .args(["render", "--fragment", "/product/2", "/product/1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let chair = stdout.find("<p>Chair</p>").unwrap();
    let lamp = stdout.find("<p>Lamp</p>").unwrap();
    assert!(stdout.find("<!-- /product/2 -->").unwrap() < chair);
    assert!(chair < stdout.find("<!-- /product/1 -->").unwrap());
    assert!(chair < lamp);
}

#[test]
fn test_render_unknown_route_fails() {
    let dir = shop_dir();
    pageparts(&dir)
        .args(["render", "/nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to render /nowhere (404)"));
}

#[test]
fn test_render_auth_page_with_and_without_claims() {
    let dir = shop_dir();
    pageparts(&dir)
        .args(["render", "/account/", "--fragment"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<login data-component="login">"#));

    pageparts(&dir)
        .args(["render", "/account/", "--fragment", "--claim", "authenticated=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>Alice</p>"));
}

#[test]
fn test_render_failure_does_not_leak_internals() {
    let dir = TempDir::new().unwrap();
    ConfigFixture::shop()
        .with_config(
            r#"
components:
  - name: list
    templates: [{ name: list, source: "{{ item | safe }}" }]
pages:
  - route: /
    parts:
      - name: list
        children: [{ name: secret_component }]
"#,
        )
        .write_to(dir.path())
        .unwrap();

    pageparts(&dir)
        .args(["render", "/"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("secret_component").not())
        .stderr(predicate::str::contains("500 Internal server error"));
}

#[test]
fn test_config_from_flag_and_environment() {
    let site = shop_dir();
    let elsewhere = TempDir::new().unwrap();
    let config = site.path().join("app.yml");

    pageparts(&elsewhere)
        .arg("-c")
        .arg(&config)
        .args(["render", "/product/1", "--fragment"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>Lamp</p>"));

    pageparts(&elsewhere)
        .env("PAGEPARTS_CONFIG", &config)
        .args(["render", "/product/1", "--fragment"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>Lamp</p>"));
}

#[test]
fn test_missing_config_is_a_friendly_error() {
    let empty = TempDir::new().unwrap();
    pageparts(&empty)
        .args(["render", "/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
