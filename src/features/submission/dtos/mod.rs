mod new_report_dto;

pub use new_report_dto::NewReportDto;
