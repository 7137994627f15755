//! The merge command
//!
//! Loads the three documents, resolves settings, runs the reconciler and
//! reports the outcome.

use colored::Colorize;

use vcacfg_core::entry::NOT_SET;
use vcacfg_core::{
    ApplyPort, ConfigSnapshot, DebugPort, MergePlan, Mode, Operator, Reconciler, RunReport,
    Settings, SettingsResolver, ToolCommand, ToolPort, Unattended,
};

use crate::cli::MergeArgs;
use crate::error::Result;
use crate::interactive::TerminalOperator;

/// Mode and tool invocation after applying command-line overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effective {
    pub mode: Mode,
    pub command: ToolCommand,
}

/// Command-line words override the settings file
pub fn effective(args: &MergeArgs, settings: Settings) -> Effective {
    let mode = args.mode.or(settings.mode).unwrap_or_default();
    let mut tool = settings.tool;
    if let Some(program) = &args.tool {
        tool.program = program.clone();
    }
    Effective {
        mode,
        command: ToolCommand::from(&tool),
    }
}

/// Load the documents and build the merge plan
pub fn load_plan(args: &MergeArgs) -> Result<MergePlan> {
    let old = ConfigSnapshot::load(&args.old)?;
    let user = ConfigSnapshot::load(&args.user)?;
    let new = ConfigSnapshot::load(&args.new)?;
    Ok(MergePlan::combine(&old, &user, &new))
}

/// Run the merge command
pub fn run_merge(args: &MergeArgs) -> Result<()> {
    let settings = SettingsResolver::new(args.settings.clone()).resolve()?;
    let Effective { mode, command } = effective(args, settings);
    let plan = load_plan(args)?;

    if !args.json {
        println!("UPDATE MODE = {}", mode.title());
        if args.debug {
            println!(
                "[DEBUG] Debug mode is on, {} will not be run, commands are only printed",
                command.program()
            );
        }
    }

    // With --json, stdout carries only the report
    let mut port: Box<dyn ApplyPort> = match (args.debug, args.json) {
        (true, false) => Box::new(DebugPort::stdout(command)),
        (true, true) => Box::new(DebugPort::stderr(command)),
        (false, false) => Box::new(ToolPort::new(command)),
        (false, true) => Box::new(ToolPort::new(command).with_stdout_to_stderr()),
    };
    let mut operator: Box<dyn Operator> = match (mode.is_interactive(), args.json) {
        (false, _) => Box::new(Unattended),
        (true, false) => Box::new(TerminalOperator::new()),
        (true, true) => Box::new(TerminalOperator::on_stderr()),
    };

    let mut reconciler = Reconciler::new(mode).with_debug(args.debug);
    let report = reconciler.run(&plan, port.as_mut(), operator.as_mut())?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(vcacfg_core::Error::from)?;
        println!("{}", json);
        return Ok(());
    }

    print_warnings(&report);
    println!("{}", "Configuration update done!".green().bold());
    Ok(())
}

fn print_warnings(report: &RunReport) {
    for warning in &report.warnings {
        println!(
            "{} Option {}: {} has new default value [{}]",
            "[WARNING]".yellow().bold(),
            warning.scope,
            warning.option,
            warning.new_default.as_deref().unwrap_or(NOT_SET)
        );
    }

    if report.has_warnings() {
        println!(
            "\tAutomatic merge ended correctly, but some contested situations occurred. Values set by USER were selected, but you should check"
        );
        println!(
            "\tmessages labeled with [WARNING], and consider setting new values for these parameters."
        );
        println!("\tYou can use 'vcactl' or run this tool in manual or semi-auto mode:");
        println!("\t\tvca-config-upgrade <old.xml> <user.xml> <new.xml> manual");
        println!("\t\tvca-config-upgrade <old.xml> <user.xml> <new.xml> semi-auto");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcacfg_core::ToolSettings;
    use vcacfg_test_utils::fixtures::{DocumentSet, upgrade_scenario};

    fn args(set: &DocumentSet) -> MergeArgs {
        MergeArgs {
            old: set.old(),
            user: set.user(),
            new: set.new_default(),
            mode: None,
            debug: false,
            json: false,
            tool: None,
            settings: None,
        }
    }

    #[test]
    fn test_command_line_overrides_settings() {
        let (old, user, new) = upgrade_scenario();
        let set = DocumentSet::write(&old, &user, &new);
        let settings = Settings {
            tool: ToolSettings {
                program: "/opt/vca/vcactl".to_string(),
                subcommand: "config".to_string(),
            },
            mode: Some(Mode::Manual),
        };

        let defaults = effective(&args(&set), settings.clone());
        assert_eq!(defaults.mode, Mode::Manual);
        assert_eq!(defaults.command.program(), "/opt/vca/vcactl");

        let overridden = effective(
            &MergeArgs {
                mode: Some(Mode::SemiAuto),
                tool: Some("true".to_string()),
                ..args(&set)
            },
            settings,
        );
        assert_eq!(overridden.mode, Mode::SemiAuto);
        assert_eq!(overridden.command.program(), "true");
    }

    #[test]
    fn test_default_mode_is_full_auto() {
        let (old, user, new) = upgrade_scenario();
        let set = DocumentSet::write(&old, &user, &new);
        assert_eq!(effective(&args(&set), Settings::default()).mode, Mode::FullAuto);
    }

    #[test]
    fn test_load_plan_reads_documents() {
        let (old, user, new) = upgrade_scenario();
        let set = DocumentSet::write(&old, &user, &new);
        let plan = load_plan(&args(&set)).unwrap();
        assert_eq!(plan.option_count(), 7);
    }

    #[test]
    fn test_load_plan_missing_document() {
        let (old, user, new) = upgrade_scenario();
        let set = DocumentSet::write(&old, &user, &new);
        let missing = MergeArgs {
            user: set.dir().join("absent.xml"),
            ..args(&set)
        };
        let err = load_plan(&missing).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
