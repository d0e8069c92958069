//! Barangay noise-report client.
//!
//! The report status engine (`features::reports::engine`) decides which
//! responses an administrator may send for a report and which message a
//! report currently shows. The admin review, citizen history, submission and
//! dashboard flows sit on top of it and talk to the backend through
//! `features::reports::clients::ReportBackend`.

pub mod core;
pub mod features;
pub mod shared;
