pub mod clients;
pub mod display;
pub mod dtos;
pub mod engine;
pub mod models;
pub mod services;

pub use clients::{HttpReportBackend, ReportBackend};
pub use engine::{available_responses, current_message, selectable_responses, Audience, ResponseOption};
pub use services::{StatusUpdateService, ViewEpoch};
