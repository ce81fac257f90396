//! Output side of zodgen.
//!
//! - [`render`]: zod expression tree to TypeScript text
//! - [`artifacts`]: validator module and integration-test module assembly
//! - [`human`] / [`json`]: command report formatters (`--json` selects the latter)

pub mod artifacts;
pub mod human;
pub mod json;
pub mod render;
pub mod report;
pub mod test_module;

pub use artifacts::{generate, GenerateOutput};

use report::{GenerateReport, ListReport};

pub trait OutputFormatter {
    fn format_generate(&self, report: &GenerateReport) -> String;
    fn format_list(&self, report: &ListReport) -> String;
}
