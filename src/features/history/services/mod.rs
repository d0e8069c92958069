mod history_service;

pub use history_service::{HistoryService, HistoryState};
