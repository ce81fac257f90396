//! zodgen CLI: zod validators from TypeScript declarations.
//!
//! This binary provides the `zodgen` command with subcommands for generating,
//! watching, and configuring validator modules. See `zodgen --help` for usage.

use clap::Parser;

mod cli_args;
mod commands;
mod tracing_config;

use cli_args::{Cli, Commands};
use commands::generate::GenerateRequest;

fn main() {
    let cli = Cli::parse();
    tracing_config::init_tracing(cli.verbose);

    let formatter: Box<dyn zodgen_output::OutputFormatter> = if cli.json {
        Box::new(zodgen_output::json::JsonFormatter)
    } else {
        Box::new(zodgen_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Generate {
            input,
            output,
            max_run,
            keep_comments,
            skip_parse_jsdoc,
            config,
            all,
            with_test,
            strict,
        } => commands::generate::run(
            &*formatter,
            cli.verbose,
            cli.json,
            GenerateRequest {
                input,
                output,
                max_run,
                keep_comments,
                skip_parse_jsdoc,
                config,
                all,
                with_test,
                strict,
            },
        ),
        Commands::Init { yes } => commands::init::run(cli.verbose, yes),
        Commands::Watch { config } => commands::watch::run(&*formatter, cli.verbose, config),
        Commands::List => commands::list::run(&*formatter),
        Commands::Completion { shell } => commands::completion::run(shell),
    };

    std::process::exit(exit_code);
}
