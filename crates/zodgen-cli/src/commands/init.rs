use std::fs;
use std::path::Path;

use dialoguer::Confirm;
use zodgen_core::config::{EntryConfig, ZodgenConfig, CONFIG_FILE};

/// Likely homes of a project's shared type declarations, most specific first.
const CANDIDATE_INPUTS: &[&str] = &[
    "src/types.ts",
    "src/types/index.ts",
    "types.ts",
    "src/index.ts",
];

/// Run `zodgen init` -- write a starter zodgen.config.json.
pub fn run(verbose: bool, yes: bool) -> i32 {
    let cwd = match super::current_dir("init") {
        Ok(p) => p,
        Err(code) => return code,
    };

    let config_path = cwd.join(CONFIG_FILE);
    if config_path.exists() && !yes {
        let prompt = format!("{CONFIG_FILE} already exists. Overwrite?");
        match Confirm::new().with_prompt(prompt).default(false).interact() {
            Ok(true) => {}
            Ok(false) => {
                eprintln!("zodgen init: cancelled");
                return 0;
            }
            Err(e) => {
                eprintln!(
                    "zodgen init: {CONFIG_FILE} already exists (pass --yes to overwrite): {e}"
                );
                return 2;
            }
        }
    }

    let config = starter_config(&cwd);
    if let Err(e) = fs::write(&config_path, config.to_json() + "\n") {
        eprintln!("zodgen init: failed to write {}: {}", config_path.display(), e);
        return 2;
    }

    if verbose {
        eprintln!(
            "zodgen init: wrote {} for input {}",
            config_path.display(),
            config.entries[0].input
        );
    }
    0
}

fn starter_config(root: &Path) -> ZodgenConfig {
    let input = CANDIDATE_INPUTS
        .iter()
        .find(|p| root.join(p).is_file())
        .copied()
        .unwrap_or(CANDIDATE_INPUTS[0]);
    let mut entry = EntryConfig::for_input(input);
    entry.output = Some(sibling_with_suffix(input, ".zod.ts"));
    ZodgenConfig {
        entries: vec![entry],
    }
}

/// `src/types.ts` -> `src/types<suffix>`.
fn sibling_with_suffix(input: &str, suffix: &str) -> String {
    let stem = input
        .strip_suffix(".tsx")
        .or_else(|| input.strip_suffix(".ts"))
        .unwrap_or(input);
    format!("{stem}{suffix}")
}
