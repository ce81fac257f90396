use zodgen_resolve::types::{UnresolvedCause, UnresolvedEntry};

use crate::report::{EntryReport, EntryStatus, GenerateReport, ListReport};
use crate::OutputFormatter;

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_generate(&self, report: &GenerateReport) -> String {
        let mut out = String::new();
        for entry in &report.entries {
            out.push_str(&format_entry(entry));
        }

        let failed = report
            .entries
            .iter()
            .filter(|e| e.status == EntryStatus::Failed)
            .count();
        let unresolved: usize = report.entries.iter().map(|e| e.unresolved.entries.len()).sum();
        if failed > 0 || unresolved > 0 {
            out.push_str(&format!(
                "\n{} failed, {} unresolved validator(s) in {} entr{}\n",
                failed,
                unresolved,
                report.entries.len(),
                if report.entries.len() == 1 { "y" } else { "ies" },
            ));
        }
        out
    }

    fn format_list(&self, report: &ListReport) -> String {
        if report.entries.is_empty() {
            return "no entries configured\n".to_string();
        }
        let mut out = String::new();
        for e in &report.entries {
            out.push_str(&format!(
                "{}\n  input:  {}\n  output: {}\n",
                e.name,
                e.input,
                e.output.as_deref().unwrap_or("(stdout)"),
            ));
            if let Some(test) = &e.with_test {
                out.push_str(&format!("  test:   {}\n", test));
            }
            out.push_str(&format!("  max run: {}\n", e.max_run));
        }
        out
    }
}

fn format_entry(entry: &EntryReport) -> String {
    let target = entry.output.as_deref().unwrap_or("stdout");
    match entry.status {
        EntryStatus::Failed => {
            return format!(
                "{}: {} failed: {}\n",
                entry.name,
                entry.input,
                entry.failure.as_deref().unwrap_or("unknown error"),
            );
        }
        EntryStatus::Unchanged => {
            return format!("{}: {} unchanged\n", entry.name, entry.input);
        }
        EntryStatus::Generated => {}
    }

    let mut out = format!(
        "{}: {} -> {} ({} of {} validator(s)",
        entry.name,
        entry.input,
        target,
        entry.validators.len(),
        entry.declarations,
    );
    if !entry.deferred.is_empty() {
        out.push_str(&format!(", deferred: {}", entry.deferred.join(", ")));
    }
    out.push_str(")\n");
    if let Some(test) = &entry.with_test {
        out.push_str(&format!("  test module -> {}\n", test));
    }
    for u in &entry.unresolved.entries {
        out.push_str(&format!("  unresolved {}\n", describe(u)));
    }
    out
}

fn describe(entry: &UnresolvedEntry) -> String {
    match &entry.cause {
        UnresolvedCause::Cycle { members } => {
            format!("{}: cycle through {}", entry.var_name, members.join(" -> "))
        }
        UnresolvedCause::MissingDependency { missing } => {
            format!("{}: no declaration for {}", entry.var_name, missing.join(", "))
        }
        UnresolvedCause::Blocked { by } => {
            format!("{}: waits on {}", entry.var_name, by.join(", "))
        }
        UnresolvedCause::Starved => {
            format!("{}: round limit reached (raise maxRun)", entry.var_name)
        }
    }
}
