use std::fs;
use std::path::Path;

use rayon::prelude::*;
use zodgen_core::config::{ConfigError, EntryConfig};
use zodgen_output::report::{EntryReport, EntryStatus, GenerateReport};
use zodgen_output::{generate, OutputFormatter};
use zodgen_resolve::engine::GenerateOptions;

use super::paths::{import_path, import_path_from_file};

/// Flags of `zodgen generate`.
#[derive(Debug, Default)]
pub struct GenerateRequest {
    pub input: Option<String>,
    pub output: Option<String>,
    pub max_run: Option<u32>,
    pub keep_comments: bool,
    pub skip_parse_jsdoc: bool,
    pub config: Option<String>,
    pub all: bool,
    pub with_test: Option<String>,
    pub strict: bool,
}

/// One entry's report, plus its module when it goes to stdout.
pub(crate) struct EntryRun {
    pub report: EntryReport,
    pub stdout_module: Option<String>,
}

/// Run `zodgen generate` -- write validator modules for an input file or
/// for configured entries.
pub fn run(
    formatter: &dyn OutputFormatter,
    verbose: bool,
    json: bool,
    req: GenerateRequest,
) -> i32 {
    let cwd = match super::current_dir("generate") {
        Ok(p) => p,
        Err(code) => return code,
    };

    let entries = match select(&cwd, &req) {
        Ok(entries) => entries,
        Err(code) => return code,
    };
    if entries.iter().filter(|e| e.output.is_none()).count() > 1 {
        eprintln!(
            "zodgen generate: several entries without an output file; set `output` for each"
        );
        return 2;
    }

    // Entries are independent; order of the report follows the config.
    let runs: Vec<EntryRun> = entries.par_iter().map(|e| run_entry(&cwd, e)).collect();

    let mut printed_module = false;
    let mut reports = Vec::with_capacity(runs.len());
    for run in runs {
        if let Some(module) = run.stdout_module {
            print!("{module}");
            printed_module = true;
        }
        reports.push(run.report);
    }
    let report = GenerateReport::new("generate", reports);

    if json {
        let out = formatter.format_generate(&report);
        if printed_module {
            eprintln!("{out}");
        } else {
            println!("{out}");
        }
    } else {
        for entry in &report.entries {
            for error in &entry.errors {
                eprintln!("zodgen generate: {}: {}", entry.name, error);
            }
        }
        if verbose || report.has_failures() || report.has_unresolved() {
            eprint!("{}", formatter.format_generate(&report));
        }
    }

    if report.has_failures() {
        2
    } else if req.strict && report.has_unresolved() {
        1
    } else {
        0
    }
}

/// Entries named on the command line, or taken from the config file.
fn select(root: &Path, req: &GenerateRequest) -> Result<Vec<EntryConfig>, i32> {
    let mut entries = match &req.input {
        Some(input) => {
            let mut entry = EntryConfig::for_input(input);
            entry.output = req.output.clone();
            vec![entry]
        }
        None => {
            let config = super::load_config("generate", root)?;
            let entries = super::select_entries("generate", &config, req.config.as_deref())?;
            if entries.len() > 1 && !req.all && req.config.is_none() {
                eprintln!(
                    "zodgen generate: {} entries configured; pass --config NAME or --all",
                    entries.len()
                );
                return Err(2);
            }
            entries
        }
    };

    for entry in &mut entries {
        if let Some(max_run) = req.max_run {
            entry.max_run = max_run;
        }
        entry.keep_comments |= req.keep_comments;
        entry.skip_parse_jsdoc |= req.skip_parse_jsdoc;
    }
    if let Some(test) = &req.with_test {
        if entries.len() > 1 {
            eprintln!("zodgen generate: --with-test needs a single entry");
            return Err(2);
        }
        entries[0].with_test = Some(test.clone());
    }
    Ok(entries)
}

pub(crate) fn entry_options(
    entry: &EntryConfig,
    input: &Path,
) -> Result<GenerateOptions, ConfigError> {
    let filter = entry.name_filter()?;
    Ok(GenerateOptions {
        max_run: entry.max_run,
        name_filter: Box::new(move |name: &str| filter.matches(name)),
        get_schema_name: entry.schema_namer(),
        keep_comments: entry.keep_comments,
        skip_parse_jsdoc: entry.skip_parse_jsdoc,
        tsx: input.extension().is_some_and(|e| e == "tsx"),
    })
}

/// Generate one entry from the source text already read from disk.
pub(crate) fn run_entry_source(root: &Path, entry: &EntryConfig, source: &str) -> EntryRun {
    let name = entry.label();
    let (input, output, with_test) = entry.resolve_paths(root);
    let fail = |message: String| EntryRun {
        report: EntryReport::failed(name, &entry.input, message),
        stdout_module: None,
    };

    let options = match entry_options(entry, &input) {
        Ok(o) => o,
        Err(e) => return fail(e.to_string()),
    };
    let generated = match generate(source, &options) {
        Ok(g) => g,
        Err(e) => return fail(format!("{}: {}", entry.input, e)),
    };

    let module_dir = output.as_deref().and_then(Path::parent).unwrap_or(root);
    let module = generated.validator_module(&import_path(module_dir, &input));

    let mut stdout_module = None;
    match &output {
        Some(path) => {
            if let Err(e) = write_file(path, &module) {
                return fail(e);
            }
            tracing::debug!(entry = name, path = %path.display(), "validator module written");
        }
        None => stdout_module = Some(module),
    }

    if let Some(test_path) = &with_test {
        let Some(output_path) = &output else {
            return fail("a test module needs an output file to import from".to_string());
        };
        let text = generated.test_module(
            &import_path_from_file(test_path, &input),
            &import_path_from_file(test_path, output_path),
        );
        if let Err(e) = write_file(test_path, &text) {
            return fail(e);
        }
    }

    EntryRun {
        report: EntryReport {
            name: name.to_string(),
            input: entry.input.clone(),
            output: entry.output.clone(),
            with_test: entry.with_test.clone(),
            status: EntryStatus::Generated,
            declarations: generated.generation().declarations,
            validators: generated.validator_names().map(str::to_string).collect(),
            deferred: generated.deferred_types().map(str::to_string).collect(),
            has_circular_dependencies: generated.has_circular_dependencies,
            errors: generated.errors.clone(),
            unresolved: generated.unresolved.clone(),
            failure: None,
        },
        stdout_module,
    }
}

pub(crate) fn run_entry(root: &Path, entry: &EntryConfig) -> EntryRun {
    let (input, _, _) = entry.resolve_paths(root);
    match fs::read_to_string(&input) {
        Ok(source) => run_entry_source(root, entry, &source),
        Err(e) => EntryRun {
            report: EntryReport::failed(
                entry.label(),
                &entry.input,
                format!("failed to read {}: {}", entry.input, e),
            ),
            stdout_module: None,
        },
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
        }
    }
    fs::write(path, contents).map_err(|e| format!("failed to write {}: {}", path.display(), e))
}
