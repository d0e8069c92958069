mod history_dto;

pub use history_dto::{history_subtitle, HistoryReportCardDto};
