mod report;
mod report_location;

pub use report::{MediaType, NoiseLevel, Report, ReportStatus};
pub use report_location::{LocationAddress, ReportLocation};
