pub mod completion;
pub mod generate;
pub mod init;
pub mod list;
pub(crate) mod paths;
pub mod watch;

use std::path::PathBuf;

use zodgen_core::config::{EntryConfig, ZodgenConfig};

/// Working directory, or a printed error for `zodgen <cmd>`.
pub(crate) fn current_dir(cmd: &str) -> Result<PathBuf, i32> {
    std::env::current_dir().map_err(|e| {
        eprintln!("zodgen {cmd}: failed to get current directory: {}", e);
        2
    })
}

/// Config entries selected by `--config NAME`, or every entry.
pub(crate) fn select_entries(
    cmd: &str,
    config: &ZodgenConfig,
    name: Option<&str>,
) -> Result<Vec<EntryConfig>, i32> {
    match name {
        Some(name) => match config.entry(name) {
            Some(entry) => Ok(vec![entry.clone()]),
            None => {
                eprintln!("zodgen {cmd}: no config entry named '{name}'");
                Err(2)
            }
        },
        None if config.entries.is_empty() => {
            eprintln!(
                "zodgen {cmd}: no entries in {}. Run `zodgen init` or pass an input file.",
                zodgen_core::config::CONFIG_FILE
            );
            Err(2)
        }
        None => Ok(config.entries.clone()),
    }
}

pub(crate) fn load_config(cmd: &str, root: &std::path::Path) -> Result<ZodgenConfig, i32> {
    ZodgenConfig::load(root).map_err(|e| {
        eprintln!("zodgen {cmd}: {}", e);
        2
    })
}
