use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(name = "zodgen", version, about = "Generate zod validators from TypeScript types")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output reports as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Report every entry and enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Generate validators for a TypeScript file or configured entries
    Generate {
        /// TypeScript source (default: entries from zodgen.config.json)
        input: Option<String>,
        /// Validator module to write (default: stdout)
        output: Option<String>,
        /// Maximum resolution rounds
        #[arg(long)]
        max_run: Option<u32>,
        /// Copy declaration JSDoc blocks above their validators
        #[arg(long)]
        keep_comments: bool,
        /// Ignore JSDoc refinement tags
        #[arg(long)]
        skip_parse_jsdoc: bool,
        /// Generate only the named config entry
        #[arg(long, conflicts_with_all = ["input", "all"])]
        config: Option<String>,
        /// Generate every config entry
        #[arg(long, conflicts_with = "input")]
        all: bool,
        /// Also write an integration-test module to this path
        #[arg(long)]
        with_test: Option<String>,
        /// Exit non-zero when any validator is left unresolved
        #[arg(long)]
        strict: bool,
    },

    /// Write a starter zodgen.config.json
    Init {
        /// Overwrite an existing config without asking
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Regenerate configured entries whenever their inputs change
    Watch {
        /// Watch only the named config entry
        #[arg(long)]
        config: Option<String>,
    },

    /// List configured entries
    List,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
