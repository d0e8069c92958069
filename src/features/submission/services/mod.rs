mod submission_service;

pub use submission_service::{submission_summary, SubmissionService};
