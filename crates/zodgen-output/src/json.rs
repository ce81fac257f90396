use crate::report::{GenerateReport, ListReport};
use crate::OutputFormatter;

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_generate(&self, report: &GenerateReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
    fn format_list(&self, report: &ListReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
}
