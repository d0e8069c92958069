mod backend;
mod http_backend;

pub use backend::ReportBackend;
pub use http_backend::HttpReportBackend;
