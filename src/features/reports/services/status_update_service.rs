use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::core::error::{AppError, Result};
use crate::features::reports::clients::ReportBackend;
use crate::features::reports::models::ReportStatus;

type InFlightSet = Arc<Mutex<HashSet<String>>>;

/// Persists status changes, allowing at most one in-flight request per report.
///
/// A second call for a report whose previous update has not resolved yet is
/// rejected with `UpdateInFlight` without touching the backend. Failed
/// updates are not retried.
pub struct StatusUpdateService {
    backend: Arc<dyn ReportBackend>,
    in_flight: InFlightSet,
}

/// Clears the report's in-flight flag when the request resolves or is dropped
struct InFlightGuard {
    set: InFlightSet,
    report_id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut set = self.set.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.report_id);
    }
}

impl StatusUpdateService {
    pub fn new(backend: Arc<dyn ReportBackend>) -> Self {
        Self {
            backend,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Whether the update trigger for `report_id` should be disabled
    pub fn is_updating(&self, report_id: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(report_id)
    }

    fn acquire(&self, report_id: &str) -> Result<InFlightGuard> {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(report_id.to_string()) {
            tracing::warn!(
                "Ignoring status update for report {}: previous update still in flight",
                report_id
            );
            return Err(AppError::UpdateInFlight(report_id.to_string()));
        }
        Ok(InFlightGuard {
            set: Arc::clone(&self.in_flight),
            report_id: report_id.to_string(),
        })
    }

    pub async fn apply_status_update(&self, report_id: &str, status: ReportStatus) -> Result<()> {
        let _guard = self.acquire(report_id)?;

        tracing::info!("Updating report {} to {}", report_id, status);
        self.backend
            .update_report_status(report_id, status)
            .await
            .inspect_err(|e| {
                tracing::warn!("Status update for report {} failed: {}", report_id, e);
            })
    }
}
