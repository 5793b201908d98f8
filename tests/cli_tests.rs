//! Integration tests for CLI functionality

use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::Path;
use std::process::{Command, Output};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get path to compiled binary
fn nbcli_bin() -> &'static Path {
    assert_cmd::cargo::cargo_bin!("nbcli")
}

/// Command isolated from the caller's NetBox settings
fn isolated(workdir: &Path) -> Command {
    let mut cmd = Command::new(nbcli_bin());
    cmd.current_dir(workdir)
        .env_remove("NETBOX_URL")
        .env_remove("NETBOX_TOKEN")
        .env_remove("NETBOX_TIMEOUT")
        .env_remove("NETBOX_INSECURE")
        .env("HOME", workdir)
        .env("XDG_CONFIG_HOME", workdir);
    cmd
}

/// Write an env file pointing at `url`
fn write_env_file(dir: &Path, url: &str) -> std::path::PathBuf {
    let env_file = dir.join("netbox.env");
    std::fs::write(
        &env_file,
        format!("NETBOX_URL={}\nNETBOX_TOKEN=0123456789abcdef\n", url),
    )
    .unwrap();
    env_file
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Test that help flag works
#[test]
fn test_help_flag() {
    let output = Command::new(nbcli_bin()).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Interrogate a NetBox API"));
    for verb in ["status", "get", "list", "dump", "show"] {
        assert!(stdout.contains(verb), "help should mention '{}'", verb);
    }
}

/// Test that version flag works
#[test]
fn test_version_flag() {
    let output = Command::new(nbcli_bin()).arg("--version").output().unwrap();

    assert!(output.status.success());
    assert!(predicate::str::starts_with("nbcli").eval(&stdout_of(&output)));
}

/// Format flags are mutually exclusive
#[test]
fn test_conflicting_format_flags() {
    let output = Command::new(nbcli_bin())
        .args(["status", "--json", "--csv"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("cannot be used with"));
}

/// Format flags on both sides of the subcommand still conflict
#[test]
fn test_conflicting_format_flags_across_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), "http://127.0.0.1:1");

    let output = isolated(dir.path())
        .args(["--json", "status", "--yaml", "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Only one of --plain, --json, --yaml, --csv"));
    assert!(stdout_of(&output).is_empty());
}

/// Missing token is a configuration error
#[test]
fn test_missing_token_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join("partial.env");
    std::fs::write(&env_file, "NETBOX_URL=https://netbox.example.com\n").unwrap();

    let output = isolated(dir.path())
        .args(["status", "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Missing NETBOX_URL or NETBOX_TOKEN in .env"));
}

/// An explicit env file that does not exist is a configuration error
#[test]
fn test_missing_env_file_exits_2() {
    let dir = tempfile::tempdir().unwrap();

    let output = isolated(dir.path())
        .args(["status", "--env-file", "does-not-exist.env"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}

/// Malformed params fail before any request is sent
#[test]
fn test_invalid_param_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), "http://127.0.0.1:1");

    let output = isolated(dir.path())
        .args(["get", "dcim/devices", "--param", "limit", "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Invalid param 'limit'. Use key=value."));
}

/// Connection failures exit with 3
#[test]
fn test_connection_failure_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), "http://127.0.0.1:1");

    let output = isolated(dir.path())
        .args(["status", "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr_of(&output).contains("Connection failed."));
}

/// `get cli config` needs no server and masks the token
#[test]
fn test_get_cli_config() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), "https://netbox.example.com");

    let output = isolated(dir.path())
        .args(["get", "cli", "config", "--json", "--timeout", "7.5", "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let payload: Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(payload["netbox_url"], "https://netbox.example.com");
    assert_eq!(payload["token_masked"], "************cdef");
    assert_eq!(payload["timeout"], 7.5);
    assert_eq!(payload["format"], "json");
    assert!(!stdout_of(&output).contains("0123456789abcdef"));
}

/// `show verbs` needs no server
#[test]
fn test_show_verbs_plain() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), "http://127.0.0.1:1");

    let output = isolated(dir.path())
        .args(["show", "verbs", "--plain", "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "verbs:\n  - status\n  - get\n  - list\n  - dump\n  - show\n"
    );
}

/// `show` without a target
#[test]
fn test_show_without_target_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), "http://127.0.0.1:1");

    let output = isolated(dir.path())
        .args(["show", "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("the following arguments are required: target"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_path_selection() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .and(header("Authorization", "Token 0123456789abcdef"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"netbox-version": "4.4.1", "hostname": "nb01"})),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), &mock_server.uri());

    let output = isolated(dir.path())
        .args(["status", "--path", ".netbox-version", "--plain", "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "4.4.1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_missing_path_exits_2() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hostname": "nb01"})))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), &mock_server.uri());

    let output = isolated(dir.path())
        .args(["status", "--path", ".missing", "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Path not found: .missing"));
    assert!(stdout_of(&output).is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_http_error_exits_1() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/999/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"detail\":\"Not found.\"}"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), &mock_server.uri());

    let output = isolated(dir.path())
        .args(["get", "dcim/devices/999", "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("404 Not Found"));
    assert!(stderr.contains("Not found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_all_csv() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": null,
            "results": [{"id": 3, "name": "leaf3"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .and(query_param("role", "leaf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": format!("{}/api/dcim/devices/?limit=2&offset=2&role=leaf", base),
            "results": [{"id": 1, "name": "leaf1"}, {"id": 2}]
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), &base);

    let output = isolated(dir.path())
        .args([
            "list",
            "dcim/devices",
            "--filter",
            "role=leaf",
            "--all",
            "--path",
            ".results",
            "--csv",
            "--env-file",
        ])
        .arg(&env_file)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "id,name\n1,leaf1\n2,\n3,leaf3\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dump_json_file() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hostname": "nb01"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "core": format!("{}/api/core/", base),
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/core/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data-sources": format!("{}/api/core/data-sources/", base),
            "jobs": format!("{}/api/core/jobs/", base),
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/core/data-sources/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0, "next": null, "results": []
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/core/jobs/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), &base);
    let dump_file = dir.path().join("dump.json");

    let output = isolated(dir.path())
        .args(["dump", "--json", "--env-file"])
        .arg(&env_file)
        .arg(&dump_file)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("Wrote"));

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&dump_file).unwrap()).unwrap();
    let root = &written["netbox_data"];
    assert_eq!(root["hostname"], "nb01");
    assert_eq!(root["nb_id"], "127");
    assert_eq!(
        root["data"]["core"]["data-sources"],
        json!({"count": 0, "results": []})
    );
    assert!(root["data"]["core"].get("jobs").is_none());
}

/// CSV is not a dump format
#[test]
fn test_dump_csv_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), "http://127.0.0.1:1");

    let output = isolated(dir.path())
        .args(["dump", "out.csv", "--csv", "--env-file"])
        .arg(&env_file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Dump output supports YAML or JSON only."));
    assert!(!dir.path().join("out.csv").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dump_failed_endpoint_reported_once() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hostname": "nb01"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ipam": format!("{}/api/ipam/", base),
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ipam/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rules": format!("{}/api/ipam/rules/", base),
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ipam/rules/"))
        .respond_with(ResponseTemplate::new(400).set_body_string("filter required"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let env_file = write_env_file(dir.path(), &base);
    let dump_file = dir.path().join("dump.yaml");

    let output = isolated(dir.path())
        .args(["dump", "--env-file"])
        .arg(&env_file)
        .arg(&dump_file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert_eq!(stderr.matches("ipam/rules").count(), 1, "stderr: {}", stderr);
    assert!(dump_file.exists());
}
