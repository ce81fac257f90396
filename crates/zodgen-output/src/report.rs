use serde::Serialize;
use zodgen_resolve::types::UnresolvedReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Modules written (or printed).
    Generated,
    /// Input unchanged since the last run; nothing written.
    Unchanged,
    /// Reading, parsing, or writing failed.
    Failed,
}

/// Outcome of generating one config entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub name: String,
    pub input: String,
    pub output: Option<String>,
    pub with_test: Option<String>,
    pub status: EntryStatus,
    pub declarations: usize,
    pub validators: Vec<String>,
    pub deferred: Vec<String>,
    pub has_circular_dependencies: bool,
    pub errors: Vec<String>,
    pub unresolved: UnresolvedReport,
    pub failure: Option<String>,
}

impl EntryReport {
    fn empty(name: &str, input: &str, status: EntryStatus) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            output: None,
            with_test: None,
            status,
            declarations: 0,
            validators: Vec::new(),
            deferred: Vec::new(),
            has_circular_dependencies: false,
            errors: Vec::new(),
            unresolved: UnresolvedReport::default(),
            failure: None,
        }
    }

    pub fn failed(name: &str, input: &str, failure: String) -> Self {
        Self {
            failure: Some(failure),
            ..Self::empty(name, input, EntryStatus::Failed)
        }
    }

    pub fn unchanged(name: &str, input: &str) -> Self {
        Self::empty(name, input, EntryStatus::Unchanged)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub version: String,
    pub command: String,
    pub entries: Vec<EntryReport>,
}

impl GenerateReport {
    pub fn new(command: &str, entries: Vec<EntryReport>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: command.to_string(),
            entries,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|e| e.status == EntryStatus::Failed)
    }

    pub fn has_unresolved(&self) -> bool {
        self.entries.iter().any(|e| !e.errors.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListEntry {
    pub name: String,
    pub input: String,
    pub output: Option<String>,
    pub with_test: Option<String>,
    pub max_run: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListReport {
    pub version: String,
    pub command: String,
    pub entries: Vec<ListEntry>,
}

impl ListReport {
    pub fn new(entries: Vec<ListEntry>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "list".to_string(),
            entries,
        }
    }
}
