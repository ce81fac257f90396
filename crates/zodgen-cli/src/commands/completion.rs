use std::io::Write;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli_args::Cli;

/// Run `zodgen completion <shell>` -- print a completion script for the shell.
pub fn run(shell: Shell) -> i32 {
    let script = script(shell);
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(&script).and_then(|_| stdout.flush()) {
        eprintln!("zodgen completion: failed to write script: {e}");
        return 2;
    }
    0
}

fn script(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    let mut buf = Vec::new();
    generate(shell, &mut cmd, bin, &mut buf);
    buf
}
