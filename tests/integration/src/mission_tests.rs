//! Scenario tests for complete upgrade runs
//!
//! Each test walks one operator-visible situation through the library:
//! which options get asked about, what ends up applied, and what a rerun does.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use vcacfg_core::{
    Action, ApplyValue, ConfigSnapshot, Error, MergePlan, Mode, OperatorChoice, Reconciler,
    RunReport, Scope, SettingsResolver, Unattended,
};
use vcacfg_test_utils::doubles::{RecordingPort, ScriptedOperator};
use vcacfg_test_utils::fixtures::{ConfigXml, DocumentSet};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures")
}

fn golden_plan() -> MergePlan {
    let load = |name: &str| ConfigSnapshot::load(&fixtures_dir().join("configs").join(name)).unwrap();
    MergePlan::combine(&load("old.xml"), &load("user.xml"), &load("new.xml"))
}

fn plan_from(set: &DocumentSet) -> MergePlan {
    MergePlan::combine(
        &ConfigSnapshot::load(&set.old()).unwrap(),
        &ConfigSnapshot::load(&set.user()).unwrap(),
        &ConfigSnapshot::load(&set.new_default()).unwrap(),
    )
}

/// Document holding exactly the values a run applied
fn applied_document(report: &RunReport) -> ConfigXml {
    report.applied.iter().fold(ConfigXml::new(), |xml, applied| {
        let value = match &applied.value {
            ApplyValue::Text(v) => Some(v.as_str()),
            ApplyValue::Clear => None,
        };
        match &applied.scope {
            Scope::Global => xml.global(&applied.option, value),
            Scope::Node { card, node } => xml.node(*card, *node, &applied.option, value),
            Scope::BlockDevice { card, node, device } => {
                xml.device(*card, *node, device, &applied.option, value)
            }
        }
    })
}

fn text(s: &str) -> ApplyValue {
    ApplyValue::Text(s.to_string())
}

// =============================================================================
// Mission: unattended upgrade
// =============================================================================

#[test]
fn mission_unattended_upgrade_then_rerun_is_stable() {
    let mut first_port = RecordingPort::new();
    let first = Reconciler::new(Mode::FullAuto)
        .run(&golden_plan(), &mut first_port, &mut Unattended)
        .unwrap();

    let applied = applied_document(&first);
    let set = DocumentSet::write(&applied, &applied, &applied);

    let mut second_port = RecordingPort::new();
    let second = Reconciler::new(Mode::FullAuto)
        .run(&plan_from(&set), &mut second_port, &mut Unattended)
        .unwrap();

    assert_eq!(second.unchanged_count(), second.applied.len());
    assert_eq!(second_port.calls, first_port.calls);
}

#[test]
fn mission_option_only_in_new_default_is_adopted() {
    let old = ConfigXml::new().global("auto-boot", Some("1"));
    let new = ConfigXml::new()
        .global("auto-boot", Some("1"))
        .global("va-min-free-memory-enabled", Some("1"));
    let set = DocumentSet::write(&old, &old, &new);

    let mut port = RecordingPort::new();
    let report = Reconciler::new(Mode::FullAuto)
        .run(&plan_from(&set), &mut port, &mut Unattended)
        .unwrap();

    assert_eq!(report.applied[1].action, Action::NewDefault);
    assert_eq!(
        port.value_of(&Scope::Global, "va-min-free-memory-enabled"),
        Some(&text("1"))
    );
}

#[test]
fn mission_corrupted_user_document_stops_at_first_bad_option() {
    let old = ConfigXml::new()
        .global("auto-boot", Some("1"))
        .node(0, 0, "ip", Some("172.31.1.1"))
        .node(2, 1, "ip", Some("172.31.7.1"));
    let user = ConfigXml::new()
        .global("auto-boot", Some("0"))
        .node(0, 0, "ip", Some("172.31.1.1"));
    let set = DocumentSet::write(&old, &user, &old);

    let mut port = RecordingPort::new();
    let mut reconciler = Reconciler::new(Mode::FullAuto);
    let err = reconciler
        .run(&plan_from(&set), &mut port, &mut Unattended)
        .unwrap_err();

    assert!(matches!(
        &err,
        Error::CorruptedUserConfig { option, scope, triple }
            if option == "ip" && scope == "for card 2, cpu 1" && triple == "[172.31.7.1, <not set>, 172.31.7.1]"
    ));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(port.calls.len(), 2);
    assert_eq!(reconciler.context().applied.len(), 2);
}

// =============================================================================
// Mission: operator-assisted upgrade
// =============================================================================

#[test]
fn mission_semi_auto_operator_settles_conflicts() {
    let mut operator = ScriptedOperator::new()
        .with_choices([OperatorChoice::NewDefault, OperatorChoice::FreshValue])
        .with_values(["/srv/other.img"]);
    let mut port = RecordingPort::new();

    let report = Reconciler::new(Mode::SemiAuto)
        .run(&golden_plan(), &mut port, &mut operator)
        .unwrap();

    let asked: Vec<_> = operator
        .choice_requests
        .iter()
        .map(|r| (r.scope.clone(), r.option().to_string()))
        .collect();
    assert_eq!(
        asked,
        vec![
            (Scope::Global, "OS-boot-timeout-s".to_string()),
            (Scope::node(0, 1), "os-image".to_string()),
        ]
    );
    assert_eq!(port.value_of(&Scope::Global, "OS-boot-timeout-s"), Some(&text("240")));
    assert_eq!(
        port.value_of(&Scope::node(0, 1), "os-image"),
        Some(&text("/srv/other.img"))
    );
    assert!(!report.has_warnings());
}

#[test]
fn mission_manual_operator_accepting_defaults() {
    let mut operator = ScriptedOperator::new().with_choices([OperatorChoice::NewDefault; 6]);
    let mut port = RecordingPort::new();

    Reconciler::new(Mode::Manual)
        .run(&golden_plan(), &mut port, &mut operator)
        .unwrap();

    let asked: Vec<_> = operator
        .choice_requests
        .iter()
        .map(|r| r.option().to_string())
        .collect();
    assert_eq!(
        asked,
        vec![
            "link-up-timeout-ms",
            "handshake-irq-timeout-ms",
            "OS-boot-timeout-s",
            "os-image",
            "os-image",
            "va-min-free-memory-enabled",
        ]
    );
    assert_eq!(
        port.value_of(&Scope::Global, "handshake-irq-timeout-ms"),
        Some(&ApplyValue::Clear)
    );
    assert_eq!(
        port.value_of(&Scope::node(0, 1), "os-image"),
        Some(&text("/usr/lib/vca/vca_baremetal_5.0.img"))
    );
    // User edits over unchanged defaults are kept without asking
    assert_eq!(port.value_of(&Scope::node(1, 0), "node-name"), Some(&text("lab-node")));
}

// =============================================================================
// Mission: site settings
// =============================================================================

#[test]
fn mission_site_settings_pick_mode_and_tool() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("settings.toml"),
        "mode = \"semi-auto\"\n\n[tool]\nprogram = \"/opt/intel/vca/bin/vcactl\"\n",
    )
    .unwrap();

    let settings = SettingsResolver::new(None)
        .with_config_dir(dir.path().to_path_buf())
        .resolve()
        .unwrap();

    assert_eq!(settings.mode, Some(Mode::SemiAuto));
    assert_eq!(settings.tool.program, "/opt/intel/vca/bin/vcactl");
    assert_eq!(settings.tool.subcommand, "config");
}
