use zodgen_output::report::{ListEntry, ListReport};
use zodgen_output::OutputFormatter;

/// Run `zodgen list` -- print the entries in zodgen.config.json.
pub fn run(formatter: &dyn OutputFormatter) -> i32 {
    let cwd = match super::current_dir("list") {
        Ok(p) => p,
        Err(code) => return code,
    };
    let config = match super::load_config("list", &cwd) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let entries = config
        .entries
        .iter()
        .map(|e| ListEntry {
            name: e.label().to_string(),
            input: e.input.clone(),
            output: e.output.clone(),
            with_test: e.with_test.clone(),
            max_run: e.max_run,
        })
        .collect();
    println!("{}", formatter.format_list(&ListReport::new(entries)).trim_end());
    0
}
