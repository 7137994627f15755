//! End-to-end integration test for the vertical slice
//!
//! Exercises the complete flow on the golden documents in
//! `test-fixtures/configs`: document loading -> plan -> reconciliation ->
//! tool invocation.

use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use vcacfg_core::{
    Action, ApplyValue, ConfigSnapshot, DebugPort, MergePlan, Mode, Reconciler, Scope,
    ToolCommand, ToolPort, Unattended,
};
use vcacfg_test_utils::doubles::RecordingPort;

/// Path to the test-fixtures directory (relative to the workspace root).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures")
}

fn load(name: &str) -> ConfigSnapshot {
    ConfigSnapshot::load(&fixtures_dir().join("configs").join(name))
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

fn golden_plan() -> MergePlan {
    MergePlan::combine(&load("old.xml"), &load("user.xml"), &load("new.xml"))
}

/// Writer whose contents stay readable after it is boxed into a port
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_golden_documents_load() {
    let old = load("old.xml");
    assert_eq!(old.global.value("auto-boot"), Some("1"));
    assert_eq!(old.global.get("debug-enabled"), Some(None));
    assert_eq!(old.node(0, 0).options.get("bridge-interface"), Some(None));
    assert_eq!(
        old.node(0, 0).device("vcablk0").unwrap().value("mode"),
        Some("ro")
    );

    let user = load("user.xml");
    assert!(user.node(0, 0).device("vcablk1").is_some());
}

#[test]
fn test_full_auto_debug_output_matches_golden_file() {
    let expected =
        fs::read_to_string(fixtures_dir().join("expected/full-auto-debug.txt")).unwrap();
    let buf = SharedBuf::default();
    let mut port = DebugPort::new(ToolCommand::default(), Box::new(buf.clone()));

    let report = Reconciler::new(Mode::FullAuto)
        .with_debug(true)
        .run(&golden_plan(), &mut port, &mut Unattended)
        .unwrap();

    assert_eq!(buf.contents().replace("\r\n", "\n"), expected.replace("\r\n", "\n"));
    assert!(report.debug);
    assert_eq!(report.applied.len(), 21);
}

#[test]
fn test_full_auto_actions_on_golden_documents() {
    let mut port = RecordingPort::new();
    let report = Reconciler::new(Mode::FullAuto)
        .run(&golden_plan(), &mut port, &mut Unattended)
        .unwrap();

    let action_of = |scope: &Scope, option: &str| {
        report
            .for_scope(scope)
            .find(|a| a.option == option)
            .map(|a| a.action)
    };

    let node00 = Scope::node(0, 0);
    assert_eq!(action_of(&Scope::Global, "auto-boot"), Some(Action::NoAction));
    assert_eq!(action_of(&Scope::Global, "link-up-timeout-ms"), Some(Action::NewDefault));
    assert_eq!(action_of(&Scope::Global, "handshake-irq-timeout-ms"), Some(Action::Delete));
    assert_eq!(action_of(&Scope::Global, "ICMP-ping-interval-s"), Some(Action::ApplyUser));
    assert_eq!(action_of(&Scope::Global, "OS-boot-timeout-s"), Some(Action::WarnApplyUser));
    assert_eq!(action_of(&node00, "bridge-interface"), Some(Action::ApplyUser));
    assert_eq!(
        action_of(&Scope::node(1, 0), "va-min-free-memory-enabled"),
        Some(Action::NewDefault)
    );

    let warned: Vec<_> = report
        .warnings
        .iter()
        .map(|w| (w.scope.clone(), w.option.as_str()))
        .collect();
    assert_eq!(
        warned,
        vec![
            (Scope::Global, "OS-boot-timeout-s"),
            (Scope::node(0, 1), "os-image"),
        ]
    );
    assert_eq!(
        port.value_of(&Scope::block_device(0, 0, "vcablk1"), "path"),
        Some(&ApplyValue::Text("/srv/data.img".to_string()))
    );
}

#[cfg(unix)]
#[test]
fn test_tool_port_runs_real_program() {
    let mut port = ToolPort::new(ToolCommand::new("true", "config"));
    let report = Reconciler::new(Mode::FullAuto)
        .run(&golden_plan(), &mut port, &mut Unattended)
        .unwrap();
    assert_eq!(report.applied.len(), 21);
}

#[test]
fn test_report_round_trips_through_json() {
    let report = Reconciler::new(Mode::FullAuto)
        .run(&golden_plan(), &mut RecordingPort::new(), &mut Unattended)
        .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let back: vcacfg_core::RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
