//! CLI end-to-end tests that invoke the compiled `vca-config-upgrade` binary
//! against documents written to temporary directories.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use vcacfg_test_utils::fixtures::{ConfigXml, DocumentSet, upgrade_scenario};

/// Command for the binary, isolated from the caller's settings and tool
fn upgrade_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vca-config-upgrade").expect("Failed to find binary");
    cmd.env_remove("VCA_CONFIG_TOOL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn scenario() -> DocumentSet {
    let (old, user, new) = upgrade_scenario();
    DocumentSet::write(&old, &user, &new)
}

/// Executable shell script in the document directory
#[cfg(unix)]
fn script_tool(set: &DocumentSet, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let tool = set.dir().join(name);
    std::fs::write(&tool, format!("#!/bin/sh\n{}", body)).unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
    tool
}

const MERGE_NOTICE: &str = "Automatic merge ended correctly";

fn documents(set: &DocumentSet) -> Vec<String> {
    [set.old(), set.user(), set.new_default()]
        .iter()
        .map(|p| p.display().to_string())
        .collect()
}

// ============================================================================
// Help and argument handling
// ============================================================================

#[test]
fn test_help_exits_zero() {
    let home = TempDir::new().unwrap();
    upgrade_cmd(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("manual"))
        .stdout(predicate::str::contains("semi-auto"))
        .stdout(predicate::str::contains("full-auto"));
}

#[test]
fn test_non_xml_argument_exits_three() {
    let home = TempDir::new().unwrap();
    upgrade_cmd(&home)
        .args(["old.xml", "user.conf", "new.xml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Bad arguments"));
}

#[test]
fn test_missing_document_exits_three() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    let absent = set.dir().join("absent.xml");
    upgrade_cmd(&home)
        .args([
            set.old().display().to_string(),
            absent.display().to_string(),
            set.new_default().display().to_string(),
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Cannot open file"));
}

// ============================================================================
// Merge runs
// ============================================================================

#[test]
fn test_debug_prints_tool_commands() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    upgrade_cmd(&home)
        .args(documents(&set))
        .arg("debug")
        .assert()
        .success()
        .stdout(predicate::str::contains("UPDATE MODE = Full automatic mode"))
        .stdout(predicate::str::contains(
            r#"[DEBUG] ["vcactl", "config", "auto-boot", "0"]"#,
        ))
        .stdout(predicate::str::contains(
            r#"[DEBUG] ["vcactl", "config", "0", "0", "legacy-flag", ""]"#,
        ))
        .stdout(predicate::str::contains("[WARNING] Option for card 0, cpu 0: os-image"))
        .stdout(predicate::str::contains("Configuration update done!"));
}

#[test]
fn test_successful_tool_run() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    upgrade_cmd(&home)
        .args(["--tool", "true"])
        .args(documents(&set))
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration update done!"));
}

#[test]
fn test_tool_read_from_environment() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    upgrade_cmd(&home)
        .env("VCA_CONFIG_TOOL", "false")
        .args(documents(&set))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("vcactl error occurred"));
}

#[cfg(unix)]
#[test]
fn test_tool_exit_code_is_propagated() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    let tool = script_tool(&set, "failing-tool", "echo \"rejected $*\" >&2\nexit 4\n");

    upgrade_cmd(&home)
        .arg("--tool")
        .arg(&tool)
        .args(documents(&set))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("rejected config auto-boot 0"))
        .stderr(predicate::str::contains("semi-auto"));
}

#[cfg(unix)]
#[test]
fn test_tool_messages_reach_the_operator() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    let tool = script_tool(&set, "chatty-tool", "echo \"applied $*\"\n");

    upgrade_cmd(&home)
        .arg("--tool")
        .arg(&tool)
        .args(documents(&set))
        .assert()
        .success()
        .stdout(predicate::str::contains("applied config auto-boot 0"))
        .stdout(predicate::str::contains("Configuration update done!"));
}

#[cfg(unix)]
#[test]
fn test_tool_messages_stay_off_json_output() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    let tool = script_tool(&set, "chatty-tool", "echo \"applied $*\"\n");

    let output = upgrade_cmd(&home)
        .arg("--json")
        .arg("--tool")
        .arg(&tool)
        .args(documents(&set))
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "full-auto");
    assert!(String::from_utf8_lossy(&output.stderr).contains("applied config auto-boot 0"));
}

#[test]
fn test_corrupted_user_config_exits_three() {
    let home = TempDir::new().unwrap();
    let old = ConfigXml::new().node(0, 1, "ip", Some("172.31.1.1"));
    let user = ConfigXml::new();
    let set = DocumentSet::write(&old, &user, &old);

    upgrade_cmd(&home)
        .args(["--tool", "true"])
        .args(documents(&set))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("corrupted"))
        .stderr(predicate::str::contains("Bad USER XML configuration"));
}

#[test]
fn test_json_report() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    let output = upgrade_cmd(&home)
        .args(["--json", "--tool", "true"])
        .args(documents(&set))
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "full-auto");
    assert_eq!(report["applied"].as_array().unwrap().len(), 7);
    assert_eq!(report["warnings"][0]["option"], "os-image");
}

#[test]
fn test_json_report_with_debug_keeps_stdout_parseable() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    let output = upgrade_cmd(&home)
        .arg("--json")
        .args(documents(&set))
        .arg("debug")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["debug"], true);
    assert_eq!(report["applied"].as_array().unwrap().len(), 7);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(r#"[DEBUG] ["vcactl", "config", "auto-boot", "0"]"#));
}

// ============================================================================
// Closing notice
// ============================================================================

#[test]
fn test_warning_notice_printed_once_after_warnings() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    let output = upgrade_cmd(&home)
        .args(["--tool", "true"])
        .args(documents(&set))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches(MERGE_NOTICE).count(), 1);
    assert!(stdout.contains("vca-config-upgrade <old.xml> <user.xml> <new.xml> manual"));
    assert!(stdout.contains("vca-config-upgrade <old.xml> <user.xml> <new.xml> semi-auto"));

    // The notice follows every per-option warning
    let notice_at = stdout.find(MERGE_NOTICE).unwrap();
    let last_warning_at = stdout.rfind("[WARNING] Option").unwrap();
    assert!(last_warning_at < notice_at);
    assert!(notice_at < stdout.find("Configuration update done!").unwrap());
}

#[test]
fn test_no_warning_notice_without_contested_options() {
    let home = TempDir::new().unwrap();
    let defaults = ConfigXml::new()
        .global("auto-boot", Some("1"))
        .node(0, 0, "ip", Some("172.31.1.1"));
    let user = ConfigXml::new()
        .global("auto-boot", Some("0"))
        .node(0, 0, "ip", Some("172.31.1.1"));
    let set = DocumentSet::write(&defaults, &user, &defaults);

    upgrade_cmd(&home)
        .args(["--tool", "true"])
        .args(documents(&set))
        .assert()
        .success()
        .stdout(predicate::str::contains("[WARNING]").not())
        .stdout(predicate::str::contains(MERGE_NOTICE).not())
        .stdout(predicate::str::contains("Configuration update done!"));
}

#[test]
fn test_settings_file_selects_tool() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    let settings = set.dir().join("settings.toml");
    std::fs::write(&settings, "[tool]\nprogram = \"false\"\n").unwrap();

    upgrade_cmd(&home)
        .arg("--settings")
        .arg(&settings)
        .args(documents(&set))
        .assert()
        .code(1);
}

#[test]
fn test_manual_mode_without_terminal_fails() {
    let home = TempDir::new().unwrap();
    let set = scenario();
    upgrade_cmd(&home)
        .args(["--tool", "true"])
        .args(documents(&set))
        .arg("manual")
        .assert()
        .failure()
        .stdout(predicate::str::contains("UPDATE MODE = Manual mode"));
}
