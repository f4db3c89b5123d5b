//! End-to-end tests for the hubkitctl binary.
//!
//! Each test runs the compiled binary with no config file and inspects its
//! stdout and exit status. Entity files are written to the system temp dir.

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::{Value, json};

fn hubkitctl(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hubkitctl"));
    cmd.args(args)
        .env("HUBKIT_CONFIG", "/nonexistent/hubkit.toml")
        .env("HUBKIT_PRETTY", "false")
        .env_remove("HUBKIT_SCHEMAS")
        .env_remove("RUST_LOG");
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("binary should run")
}

fn entity_file(name: &str, entity: &Value) -> PathBuf {
    let path = std::env::temp_dir().join(format!("hubkitctl-{}-{name}.json", std::process::id()));
    std::fs::write(&path, entity.to_string()).unwrap();
    path
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

#[test]
fn should_describe_all_enabled_schemas_in_domain_order() {
    let json = stdout_json(&hubkitctl(&["describe"], &[]));

    let domains: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["domain"].as_str().unwrap())
        .collect();
    assert_eq!(domains, vec!["light", "switch"]);
}

#[test]
fn should_describe_single_schema() {
    let json = stdout_json(&hubkitctl(&["describe", "light"], &[]));

    assert_eq!(json["domain"], "light");
    assert_eq!(json["commands"], json["events"]);
    let brightness = &json["commands"][2];
    assert_eq!(brightness["action"], "set_brightness");
    assert_eq!(brightness["fields"][0]["type"], "int");
    assert_eq!(brightness["fields"][0]["max"], 100);
}

#[test]
fn should_fail_to_describe_unknown_domain() {
    let output = hubkitctl(&["describe", "thermostat"], &[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn should_restrict_registry_to_enabled_schemas() {
    let json = stdout_json(&hubkitctl(&["describe"], &[("HUBKIT_SCHEMAS", "switch")]));
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["domain"], "switch");

    let output = hubkitctl(&["describe", "light"], &[("HUBKIT_SCHEMAS", "switch")]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// command / event
// ---------------------------------------------------------------------------

#[test]
fn should_apply_command_to_desired_state() {
    let path = entity_file(
        "command",
        &json!({"id": "light.kitchen", "domain": "light"}),
    );

    let json = stdout_json(&hubkitctl(
        &[
            "command",
            path.to_str().unwrap(),
            r#"{"type":"set_brightness","brightness":40}"#,
        ],
        &[],
    ));

    assert_eq!(json["data"]["desired"], json!({"power": false, "brightness": 40}));
    assert_eq!(json["actions"].as_array().unwrap().len(), 6);
    assert!(json["data"].get("reported").is_none());
}

#[test]
fn should_mirror_event_into_effective_state() {
    let path = entity_file(
        "event",
        &json!({"id": "switch.porch", "domain": "switch", "actions": ["turn_on"]}),
    );

    let json = stdout_json(&hubkitctl(
        &["event", path.to_str().unwrap(), r#"{"type":"turn_on"}"#],
        &[],
    ));

    assert_eq!(json["data"]["reported"], json!({"power": true}));
    assert_eq!(json["data"]["effective"], json["data"]["reported"]);
    assert_eq!(json["actions"], json!(["turn_on"]));
}

#[test]
fn should_leave_entity_file_untouched() {
    let entity = json!({"id": "switch.garage", "domain": "switch"});
    let path = entity_file("untouched", &entity);

    stdout_json(&hubkitctl(
        &["command", path.to_str().unwrap(), r#"{"type":"turn_on"}"#],
        &[],
    ));

    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, entity);
}

#[test]
fn should_fail_on_invalid_command() {
    let path = entity_file(
        "invalid",
        &json!({"id": "light.desk", "domain": "light"}),
    );

    let output = hubkitctl(
        &[
            "command",
            path.to_str().unwrap(),
            r#"{"type":"set_rgb","rgb":[1,2]}"#,
        ],
        &[],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

// ---------------------------------------------------------------------------
// usage
// ---------------------------------------------------------------------------

#[test]
fn should_exit_with_usage_error_for_unknown_subcommand() {
    let output = hubkitctl(&["toggle"], &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: hubkitctl"));
}

#[test]
fn should_print_usage_for_help() {
    let output = hubkitctl(&["help"], &[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("describe [DOMAIN]"));
}
