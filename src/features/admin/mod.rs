pub mod dtos;
pub mod services;

pub use services::{AdminReviewService, AdminReviewState, ResponsePicker, SaveOutcome};
