mod status_update_service;
mod view_epoch;

#[cfg(test)]
pub(crate) use status_update_service::testing;
pub use status_update_service::StatusUpdateService;
pub use view_epoch::{EpochTicket, ViewEpoch};
