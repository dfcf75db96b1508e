//! End-to-end integration tests for Hurler
//!
//! These tests walk through what a user sees in the editor: lenses on a
//! document, hovers over placeholders under different settings, and the
//! command line a run would dispatch.

use super::Workspace;
use hurler::config::load_config;
use hurler::language_server::{provide_code_lens, provide_hover, EnvironmentSettings, Position};
use hurler::runner::prepare_run;
use hurler::variables::{resolve, ResolutionOutcome};
use serde_json::json;
use std::fs;
use std::path::Path;

const DOCUMENT: &str = r#"# Users API
GET {{base}}/users
Authorization: Bearer {{api_key}}
HTTP 200

POST {{base}}/users
{"name": "{{ user }}"}
HTTP 201
"#;

#[test]
fn test_unrecognized_file_type_gets_no_lenses() {
    let workspace = Workspace::new();
    let path = workspace.write("users.http", DOCUMENT);

    assert!(provide_code_lens(DOCUMENT, &path).is_empty());
}

#[test]
fn test_hurl_document_gets_lenses() {
    let workspace = Workspace::new();
    let path = workspace.write("users.hurl", DOCUMENT);

    let lenses = provide_code_lens(DOCUMENT, &path);
    let lines: Vec<usize> = lenses.iter().map(|lens| lens.range.start.line).collect();
    assert_eq!(lines, vec![1, 5]);
}

#[test]
fn test_hover_without_environment_file() {
    let hover = provide_hover(DOCUMENT, Position::new(1, 7), &EnvironmentSettings::default())
        .expect("hover over {{base}}");

    assert_eq!(hover.header, "**base**");
    assert_eq!(hover.body, "*No environment file configured*");
}

#[test]
fn test_hover_with_missing_environment_file() {
    let workspace = Workspace::new();
    let settings = EnvironmentSettings::new("env/missing.env", workspace.root());

    let hover = provide_hover(DOCUMENT, Position::new(1, 7), &settings).unwrap();
    let expected_path = workspace.root().join("env/missing.env");

    assert!(hover.body.contains(&expected_path.display().to_string()));
    assert!(hover.body.contains("not found"));
    assert_ne!(hover.body, "*No environment file configured*");
}

#[test]
fn test_hover_values_from_environment_file() {
    let workspace = Workspace::new();
    workspace.write(
        "env/dev.env",
        "# dev settings\nbase=https://x\napi_key=abc=123\n user = alice \nbase=https://ignored\n",
    );

    let config = load_config(Some(json!({ "hurler": { "environmentFile": "env/dev.env" } })));
    let settings = config.environment_settings(workspace.root());

    let base = provide_hover(DOCUMENT, Position::new(1, 6), &settings).unwrap();
    assert_eq!(base.body, "`https://x`");

    let key = provide_hover(DOCUMENT, Position::new(2, 28), &settings).unwrap();
    assert_eq!(key.header, "**api_key**");
    assert_eq!(key.body, "`abc=123`");

    let user = provide_hover(DOCUMENT, Position::new(6, 14), &settings).unwrap();
    assert_eq!(user.header, "**user**");
    assert_eq!(user.body, "`alice`");
}

#[test]
fn test_hover_variable_not_defined() {
    let workspace = Workspace::new();
    let env = workspace.write("vars.env", "base=https://x\n");
    let settings = EnvironmentSettings::new(env.to_str().unwrap(), Path::new("/unused"));

    let hover = provide_hover(DOCUMENT, Position::new(2, 28), &settings).unwrap();
    assert_eq!(hover.body, "*Variable not found in environment file*");
}

#[test]
fn test_resolve_value_containing_equals() {
    let workspace = Workspace::new();
    workspace.write("vars.env", "base=https://x\napi_key=abc=123\n");

    assert_eq!(
        resolve("api_key", "vars.env", workspace.root()),
        ResolutionOutcome::Found("abc=123".to_string())
    );
}

#[test]
fn test_run_plan_matches_hover_environment() {
    let workspace = Workspace::new();
    let document = workspace.write("api/users.hurl", DOCUMENT);
    workspace.write("env/dev.env", "base=https://x\n");
    fs::write(workspace.root().join("api/users.hurl.out"), "previous run").unwrap();

    let config = load_config(Some(json!({
        "hurler": { "environmentFile": "env/dev.env", "additionalArgs": "--test" }
    })));
    let plan = prepare_run(Some(&document), &config, workspace.root()).unwrap();

    assert_eq!(plan.working_dir, workspace.root().join("api"));
    assert_eq!(fs::read_to_string(&plan.output_path).unwrap(), "");
    assert_eq!(
        plan.command,
        format!(
            "hurl \"{}\" --variables-file \"{}\" --test > \"{}\" 2>&1",
            document.display(),
            workspace.root().join("env/dev.env").display(),
            plan.output_path.display()
        )
    );
}
