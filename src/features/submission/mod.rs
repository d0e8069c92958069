pub mod dtos;
pub mod services;

pub use services::{submission_summary, SubmissionService};
