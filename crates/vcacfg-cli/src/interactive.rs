//! Interactive prompts for contested options
//!
//! Uses dialoguer for terminal input.

use std::io::Write;

use colored::Colorize;
use dialoguer::Input;
use vcacfg_core::{Error, Operator, OperatorChoice, PromptRequest, Result};

/// Operator backed by the terminal
///
/// The option description and menu go to `out`; dialoguer draws its input
/// line on the terminal's stderr.
pub struct TerminalOperator {
    out: Box<dyn Write>,
}

impl TerminalOperator {
    pub fn new() -> Self {
        Self::with_output(Box::new(std::io::stdout()))
    }

    /// Describe contested options on standard error
    pub fn on_stderr() -> Self {
        Self::with_output(Box::new(std::io::stderr()))
    }

    fn with_output(out: Box<dyn Write>) -> Self {
        Self { out }
    }

    fn show(&mut self, request: &PromptRequest) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", request.describe())?;
        writeln!(self.out, "{}", PromptRequest::menu())?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for TerminalOperator {
    fn default() -> Self {
        Self::new()
    }
}

impl Operator for TerminalOperator {
    fn choose(&mut self, request: &PromptRequest) -> Result<OperatorChoice> {
        self.show(request)?;

        let answer: String = Input::new()
            .with_prompt("Your choice")
            .default(OperatorChoice::DEFAULT_KEY.to_string())
            .interact_text()
            .map_err(prompt_error)?;

        let choice = OperatorChoice::parse(&answer);
        tracing::debug!(option = %request.option(), ?choice, "operator chose");
        Ok(choice)
    }

    fn provide_value(&mut self, request: &PromptRequest) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(format!("New value for {}", request.option().cyan()))
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        Ok(value)
    }
}

fn prompt_error(err: dialoguer::Error) -> Error {
    Error::Operator {
        message: err.to_string(),
    }
}
