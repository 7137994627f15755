//! Applying resolved values through the external configuration tool
//!
//! The tool is invoked once per option as
//! `<program> <subcommand> [card node [device]] <option> <value>`, where an
//! empty value removes the option. Invocations are strictly sequential and
//! each exit status is checked before the next option is processed.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::resolve::ApplyValue;
use crate::settings::ToolSettings;
use crate::topology::Scope;

/// Destination for resolved option values
pub trait ApplyPort {
    /// Set `option` at `scope` to `value`
    fn apply(&mut self, scope: &Scope, option: &str, value: &ApplyValue) -> Result<()>;
}

/// Command line builder for the configuration tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    subcommand: String,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, subcommand: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            subcommand: subcommand.into(),
        }
    }

    /// Program name or path
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for one invocation, program excluded
    pub fn args(&self, scope: &Scope, option: &str, value: &ApplyValue) -> Vec<String> {
        let mut args = vec![self.subcommand.clone()];
        args.extend(scope.tool_args());
        args.push(option.to_string());
        args.push(value.as_arg().to_string());
        args
    }

    /// Full command line, program included
    pub fn argv(&self, scope: &Scope, option: &str, value: &ApplyValue) -> Vec<String> {
        let mut argv = vec![self.program.clone()];
        argv.extend(self.args(scope, option, value));
        argv
    }
}

impl Default for ToolCommand {
    fn default() -> Self {
        Self::from(&ToolSettings::default())
    }
}

impl From<&ToolSettings> for ToolCommand {
    fn from(settings: &ToolSettings) -> Self {
        Self::new(settings.program.clone(), settings.subcommand.clone())
    }
}

/// Runs the configuration tool as a subprocess
///
/// The tool's own messages reach the operator directly. Its stderr is also
/// kept so a failure can be reported with the tool's explanation.
#[derive(Debug, Clone, Default)]
pub struct ToolPort {
    command: ToolCommand,
    stdout_to_stderr: bool,
}

impl ToolPort {
    pub fn new(command: ToolCommand) -> Self {
        Self {
            command,
            stdout_to_stderr: false,
        }
    }

    /// Send the tool's standard output to our standard error
    ///
    /// Used when standard output carries a machine-readable report.
    pub fn with_stdout_to_stderr(mut self) -> Self {
        self.stdout_to_stderr = true;
        self
    }

    fn tool_stdout(&self) -> Stdio {
        if self.stdout_to_stderr {
            Stdio::from(std::io::stderr())
        } else {
            Stdio::inherit()
        }
    }
}

impl ApplyPort for ToolPort {
    fn apply(&mut self, scope: &Scope, option: &str, value: &ApplyValue) -> Result<()> {
        let args = self.command.args(scope, option, value);
        tracing::debug!(program = %self.command.program(), ?args, "running configuration tool");

        let output = Command::new(self.command.program())
            .args(&args)
            .stdin(Stdio::null())
            .stdout(self.tool_stdout())
            .stderr(Stdio::piped())
            .output()
            .map_err(Error::Io)?;

        if !output.status.success() {
            // A tool killed by a signal has no exit code of its own
            let exit_code = output.status.code().unwrap_or(1);
            return Err(Error::ApplyFailed {
                command: format!("{} {}", self.command.program(), args.join(" ")),
                exit_code,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Prints the would-be tool invocation instead of running it
pub struct DebugPort {
    command: ToolCommand,
    out: Box<dyn Write>,
}

impl DebugPort {
    /// Print to an arbitrary writer
    pub fn new(command: ToolCommand, out: Box<dyn Write>) -> Self {
        Self { command, out }
    }

    /// Print to standard output
    pub fn stdout(command: ToolCommand) -> Self {
        Self::new(command, Box::new(std::io::stdout()))
    }

    /// Print to standard error
    pub fn stderr(command: ToolCommand) -> Self {
        Self::new(command, Box::new(std::io::stderr()))
    }
}

impl ApplyPort for DebugPort {
    fn apply(&mut self, scope: &Scope, option: &str, value: &ApplyValue) -> Result<()> {
        let argv = self.command.argv(scope, option, value);
        writeln!(self.out, "[DEBUG] {:?}", argv)?;
        Ok(())
    }
}
