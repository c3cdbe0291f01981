//! Document adapters - Rendering of reports for text-mode tool output.
//!
//! - `MarkdownReportRenderer` - KPI reports and the DSS decision report as markdown

mod markdown_report;

pub use markdown_report::MarkdownReportRenderer;
