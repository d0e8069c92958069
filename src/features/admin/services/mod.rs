mod admin_service;

pub use admin_service::{AdminReviewService, AdminReviewState, ResponsePicker, SaveOutcome};
