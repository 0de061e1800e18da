pub mod report;

pub use report::{build_report, Destination, ReportOptions, ReportOutput};
