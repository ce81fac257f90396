use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{Event, EventKind, RecursiveMode, Watcher};
use zodgen_core::config::EntryConfig;
use zodgen_core::hash::generation_fingerprint;
use zodgen_output::report::{EntryReport, EntryStatus, GenerateReport};
use zodgen_output::OutputFormatter;

use super::generate::{run_entry_source, EntryRun};

const DEBOUNCE_MS: u64 = 200;

/// A configured entry plus the fingerprint of its last generation.
struct WatchedEntry {
    entry: EntryConfig,
    input: PathBuf,
    fingerprint: Option<String>,
}

impl WatchedEntry {
    /// Regenerate unless the input and options match the last run.
    fn refresh(&mut self, root: &Path) -> EntryRun {
        let source = match std::fs::read_to_string(&self.input) {
            Ok(s) => s,
            Err(e) => {
                self.fingerprint = None;
                return EntryRun {
                    report: EntryReport::failed(
                        self.entry.label(),
                        &self.entry.input,
                        format!("failed to read {}: {}", self.entry.input, e),
                    ),
                    stdout_module: None,
                };
            }
        };
        let options = serde_json::to_string(&self.entry).unwrap_or_default();
        let fingerprint = generation_fingerprint(&source, &options);
        if self.fingerprint.as_deref() == Some(fingerprint.as_str()) {
            let report = EntryReport::unchanged(self.entry.label(), &self.entry.input);
            return EntryRun {
                report,
                stdout_module: None,
            };
        }

        let run = run_entry_source(root, &self.entry, &source);
        self.fingerprint = match run.report.status {
            EntryStatus::Generated => Some(fingerprint),
            _ => None,
        };
        run
    }
}

/// Run `zodgen watch` -- regenerate configured entries when their inputs change.
pub fn run(formatter: &dyn OutputFormatter, verbose: bool, config_name: Option<String>) -> i32 {
    let cwd = match super::current_dir("watch") {
        Ok(p) => p,
        Err(code) => return code,
    };
    let config = match super::load_config("watch", &cwd) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let entries = match super::select_entries("watch", &config, config_name.as_deref()) {
        Ok(e) => e,
        Err(code) => return code,
    };

    let mut watched: Vec<WatchedEntry> = entries
        .into_iter()
        .map(|entry| {
            let (input, _, _) = entry.resolve_paths(&cwd);
            let input = input.canonicalize().unwrap_or(input);
            WatchedEntry {
                entry,
                input,
                fingerprint: None,
            }
        })
        .collect();

    let (tx, rx) = mpsc::channel::<Event>();
    let mut watcher = match notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    }) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("zodgen watch: failed to create watcher: {}", e);
            return 2;
        }
    };

    // Editors often replace files, so watch the containing directories.
    let dirs: BTreeSet<PathBuf> = watched
        .iter()
        .filter_map(|w| w.input.parent().map(Path::to_path_buf))
        .collect();
    for dir in &dirs {
        if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            eprintln!("zodgen watch: failed to watch {}: {}", dir.display(), e);
            return 2;
        }
    }

    let all: Vec<usize> = (0..watched.len()).collect();
    report_runs(formatter, verbose, refresh(&mut watched, &cwd, &all));
    eprintln!("zodgen watch: watching {} input(s)... (Ctrl+C to stop)", watched.len());

    let index: HashMap<PathBuf, Vec<usize>> =
        watched.iter().enumerate().fold(HashMap::new(), |mut acc, (i, w)| {
            acc.entry(w.input.clone()).or_default().push(i);
            acc
        });

    let mut total_runs = 0u32;
    while let Ok(event) = rx.recv() {
        let mut changed = BTreeSet::new();
        collect_changed(&event, &index, &mut changed);

        // Debounce: drain events for DEBOUNCE_MS
        while let Ok(ev) = rx.recv_timeout(Duration::from_millis(DEBOUNCE_MS)) {
            collect_changed(&ev, &index, &mut changed);
        }

        if !changed.is_empty() {
            let targets: Vec<usize> = changed.into_iter().collect();
            report_runs(formatter, verbose, refresh(&mut watched, &cwd, &targets));
            total_runs += 1;
        }
    }

    eprintln!("zodgen watch: stopped after {} regeneration(s)", total_runs);
    0
}

fn collect_changed(
    event: &Event,
    index: &HashMap<PathBuf, Vec<usize>>,
    changed: &mut BTreeSet<usize>,
) {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return;
    }
    for path in &event.paths {
        let path = path.canonicalize().unwrap_or_else(|_| path.clone());
        if let Some(entries) = index.get(&path) {
            changed.extend(entries.iter().copied());
        }
    }
}

fn refresh(watched: &mut [WatchedEntry], root: &Path, targets: &[usize]) -> Vec<EntryRun> {
    targets.iter().map(|&i| watched[i].refresh(root)).collect()
}

fn report_runs(formatter: &dyn OutputFormatter, verbose: bool, runs: Vec<EntryRun>) {
    let mut reports = Vec::with_capacity(runs.len());
    for run in runs {
        if let Some(module) = run.stdout_module {
            print!("{module}");
        }
        if verbose || run.report.status != EntryStatus::Unchanged {
            reports.push(run.report);
        }
    }
    if !reports.is_empty() {
        eprint!("{}", formatter.format_generate(&GenerateReport::new("watch", reports)));
    }
}
