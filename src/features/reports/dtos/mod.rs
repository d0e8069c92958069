mod report_dto;

pub use report_dto::{
    decode_reports, BadgeDto, CountUsersResponse, MediaAttachment, NewReportPayload, SubmitReportResponse,
    TotalReportsResponse, UpdateStatusRequest, UserReportsResponse,
};
