pub mod admin;
pub mod dashboard;
pub mod history;
pub mod reports;
pub mod submission;
