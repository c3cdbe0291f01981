//! DSS tool handlers.

mod generate_dss_report;

pub use generate_dss_report::GenerateDssReportHandler;
