//! CLI argument parsing using clap derive
//!
//! The positional layout is kept from the legacy upgrade script: three XML
//! documents followed by free words naming the mode and `debug`.

use std::path::{Path, PathBuf};

use clap::Parser;
use vcacfg_core::Mode;

use crate::error::{CliError, Result};

/// First-argument word that prints the mode overview
pub const HELP_WORD: &str = "help";

/// Trailing word that prints tool invocations instead of running them
pub const DEBUG_WORD: &str = "debug";

const XML_EXTENSION: &str = "xml";

/// Mode overview printed for `help`
pub const HELP_TEXT: &str = "\
VCA configuration update tool. Performs an update of the VCA configuration. Can work in given modes:
\tmanual    - Ask what to do for every changed option. Untouched options and USER edits of unchanged defaults are kept without asking.
\tsemi-auto - Will favour user set values, but in contested situations will ask user what to do.
\tfull-auto - Apply USER value when possible. May trigger ERROR (execution will be terminated) or show WARNING. This is default mode.
Example call:
\tvca-config-upgrade old.xml user.xml new.xml manual
\tvca-config-upgrade old.xml user.xml new.xml full-auto
Adding 'debug' prints the configuration tool commands instead of running them:
\tvca-config-upgrade old.xml user.xml new.xml full-auto debug";

/// VCA configuration upgrade - carry user settings over to new factory defaults
#[derive(Parser, Debug)]
#[command(name = "vca-config-upgrade")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Configuration tool to run
    #[arg(long, env = "VCA_CONFIG_TOOL")]
    pub tool: Option<String>,

    /// Settings file
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Old default configuration, or `help`
    pub old: String,

    /// User configuration
    pub user: Option<String>,

    /// New default configuration
    pub new: Option<String>,

    /// Merge mode (manual, semi-auto, full-auto) and `debug`
    pub words: Vec<String>,
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Help,
    Merge(MergeArgs),
}

/// A fully interpreted merge invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeArgs {
    pub old: PathBuf,
    pub user: PathBuf,
    pub new: PathBuf,
    /// Mode named on the command line, if any
    pub mode: Option<Mode>,
    pub debug: bool,
    pub json: bool,
    pub tool: Option<String>,
    pub settings: Option<PathBuf>,
}

impl Cli {
    /// Whether the trailing words ask for a debug run
    pub fn debug_requested(&self) -> bool {
        self.words.iter().any(|w| w == DEBUG_WORD)
    }

    /// Interpret the positional arguments
    pub fn request(&self) -> Result<Request> {
        if self.old == HELP_WORD {
            return Ok(Request::Help);
        }

        let (Some(user), Some(new)) = (&self.user, &self.new) else {
            return Err(CliError::bad_arguments("expected three documents"));
        };

        let documents = [&self.old, user, new].map(PathBuf::from);
        if let Some(path) = documents.iter().find(|p| !has_xml_extension(p)) {
            return Err(CliError::bad_arguments(format!(
                "{} is not an .xml file",
                path.display()
            )));
        }

        // Later words win; unknown words leave the default in place
        let mut mode = None;
        for word in self.words.iter().filter(|w| *w != DEBUG_WORD) {
            match word.parse::<Mode>() {
                Ok(parsed) => mode = Some(parsed),
                Err(_) => tracing::warn!(word = %word, "ignoring unknown argument"),
            }
        }

        let [old, user, new] = documents;
        Ok(Request::Merge(MergeArgs {
            old,
            user,
            new,
            mode,
            debug: self.debug_requested(),
            json: self.json,
            tool: self.tool.clone(),
            settings: self.settings.clone(),
        }))
    }
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == XML_EXTENSION)
}
