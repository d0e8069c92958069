use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{AdminReportCardDto, ResponseChoiceDto};
use crate::features::reports::clients::ReportBackend;
use crate::features::reports::display::{matches_reason_filter, REASON_FILTERS};
use crate::features::reports::engine::{selectable_responses, ResponseOption};
use crate::features::reports::models::{Report, ReportStatus};
use crate::features::reports::services::{EpochTicket, StatusUpdateService, ViewEpoch};
use crate::shared::constants::NOTICE_SELECT_RESPONSE;

/// Response picker opened for one report
#[derive(Debug, Clone)]
pub struct ResponsePicker {
    pub report: Report,
    pub selected: Option<ReportStatus>,
}

impl ResponsePicker {
    pub fn options(&self) -> Vec<ResponseOption> {
        selectable_responses(&self.report)
    }
}

/// Result of a confirmed save. The update itself succeeded in both cases.
#[derive(Debug)]
pub enum SaveOutcome {
    /// The list was re-fetched and shows the new status
    Refreshed,
    /// The re-fetch failed; the previous list is kept
    RefreshFailed(AppError),
}

/// Per-screen state of the admin review list
#[derive(Debug, Clone)]
pub struct AdminReviewState {
    pub reports: Vec<Report>,
    pub loading: bool,
    pub filter: String,
    pub expanded_report: Option<String>,
    pub picker: Option<ResponsePicker>,
}

impl Default for AdminReviewState {
    fn default() -> Self {
        Self {
            reports: Vec::new(),
            loading: false,
            filter: REASON_FILTERS[0].to_string(),
            expanded_report: None,
            picker: None,
        }
    }
}

/// Drives the admin review flow: list, filter, pick a response, save, re-fetch.
///
/// Local report data is only ever replaced by a fresh fetch; a chosen
/// status is never written into local state before the backend confirms it.
pub struct AdminReviewService {
    backend: Arc<dyn ReportBackend>,
    updates: Arc<StatusUpdateService>,
    epoch: ViewEpoch,
    state: AdminReviewState,
}

impl AdminReviewService {
    pub fn new(backend: Arc<dyn ReportBackend>, updates: Arc<StatusUpdateService>) -> Self {
        Self {
            backend,
            updates,
            epoch: ViewEpoch::new(),
            state: AdminReviewState::default(),
        }
    }

    pub fn state(&self) -> &AdminReviewState {
        &self.state
    }

    /// Handle for invalidating in-flight fetches from outside the screen
    pub fn epoch(&self) -> ViewEpoch {
        self.epoch.clone()
    }

    /// Leave the screen: results of requests still in flight are dropped
    pub fn leave(&mut self) {
        self.epoch.invalidate();
        self.state.loading = false;
    }

    // =========================================================================
    // LIST
    // =========================================================================

    pub async fn refresh(&mut self) -> Result<()> {
        let ticket = self.epoch.ticket();
        self.state.loading = true;
        let result = self.backend.list_reports().await;
        self.apply_fetch(ticket, result)
    }

    /// Apply a fetch result taken under `ticket`; stale results are discarded
    pub fn apply_fetch(&mut self, ticket: EpochTicket, result: Result<Vec<Report>>) -> Result<()> {
        if !self.epoch.is_current(ticket) {
            tracing::debug!("Discarding admin report fetch that resolved after leaving the screen");
            return Ok(());
        }

        self.state.loading = false;
        let reports = result?;
        tracing::debug!("Admin list now holds {} reports", reports.len());

        if let Some(expanded) = &self.state.expanded_report {
            if !reports.iter().any(|r| &r.id == expanded) {
                self.state.expanded_report = None;
            }
        }
        self.state.reports = reports;
        Ok(())
    }

    pub fn set_filter(&mut self, filter: &str) -> Result<()> {
        if !REASON_FILTERS.contains(&filter) {
            return Err(AppError::Validation(format!("Unknown filter '{}'", filter)));
        }
        self.state.filter = filter.to_string();
        Ok(())
    }

    pub fn visible_reports(&self) -> Vec<&Report> {
        self.state
            .reports
            .iter()
            .filter(|r| matches_reason_filter(r, &self.state.filter))
            .collect()
    }

    pub fn cards(&self, now: DateTime<Utc>) -> Vec<AdminReportCardDto> {
        self.visible_reports()
            .into_iter()
            .map(|r| AdminReportCardDto::from_report(r, now))
            .collect()
    }

    /// Expand `report_id`, or collapse it when it is already expanded
    pub fn toggle_expanded(&mut self, report_id: &str) {
        if self.state.expanded_report.as_deref() == Some(report_id) {
            self.state.expanded_report = None;
        } else {
            self.state.expanded_report = Some(report_id.to_string());
        }
    }

    // =========================================================================
    // RESPONSE PICKER
    // =========================================================================

    pub fn open_picker(&mut self, report_id: &str) -> Result<&ResponsePicker> {
        let report = self
            .state
            .reports
            .iter()
            .find(|r| r.id == report_id)
            .cloned()
            .ok_or_else(|| AppError::Validation(format!("Report {} is not loaded", report_id)))?;

        let options = selectable_responses(&report);
        let selected = report
            .status
            .filter(|status| options.iter().any(|o| o.status == *status));

        Ok(&*self.state.picker.insert(ResponsePicker { report, selected }))
    }

    pub fn close_picker(&mut self) {
        self.state.picker = None;
    }

    pub fn picker_choices(&self) -> Vec<ResponseChoiceDto> {
        self.state
            .picker
            .as_ref()
            .map(|picker| {
                picker
                    .options()
                    .iter()
                    .map(|o| ResponseChoiceDto::new(o, picker.selected))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn select_response(&mut self, status: ReportStatus) -> Result<()> {
        let picker = self
            .state
            .picker
            .as_mut()
            .ok_or_else(|| AppError::Validation(NOTICE_SELECT_RESPONSE.to_string()))?;

        if !picker.options().iter().any(|o| o.status == status) {
            return Err(AppError::Validation(format!(
                "'{}' is not an available response for this report",
                status
            )));
        }
        picker.selected = Some(status);
        Ok(())
    }

    /// Whether the save trigger is disabled because an update is in flight
    pub fn is_saving(&self) -> bool {
        self.state
            .picker
            .as_ref()
            .is_some_and(|p| self.updates.is_updating(&p.report.id))
    }

    /// Persist the selected response, then reload the list.
    ///
    /// On failure the picker stays open with its selection unchanged. Once the
    /// backend confirms the update the save is `Ok`, whatever the re-fetch does.
    pub async fn save_selection(&mut self) -> Result<SaveOutcome> {
        let (report_id, status) = match &self.state.picker {
            Some(ResponsePicker {
                report,
                selected: Some(status),
            }) => (report.id.clone(), *status),
            _ => return Err(AppError::Validation(NOTICE_SELECT_RESPONSE.to_string())),
        };

        self.updates.apply_status_update(&report_id, status).await?;

        self.state.picker = None;
        match self.refresh().await {
            Ok(()) => Ok(SaveOutcome::Refreshed),
            Err(e) => {
                tracing::warn!("Report {} updated but re-fetch failed: {}", report_id, e);
                Ok(SaveOutcome::RefreshFailed(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::NoiseLevel;
    use crate::features::reports::services::testing::FakeBackend;

    fn report(id: &str, reason: &str, level: NoiseLevel, days: u32) -> Report {
        Report {
            id: id.to_string(),
            user_id: Some("u-1".to_string()),
            reason: Some(reason.to_string()),
            noise_level: Some(level),
            consecutive_days: days,
            status: None,
            comment: None,
            location: None,
            media_type: None,
            media_url: None,
            created_at: None,
        }
    }

    fn service(backend: Arc<FakeBackend>) -> AdminReviewService {
        let updates = Arc::new(StatusUpdateService::new(backend.clone()));
        AdminReviewService::new(backend, updates)
    }

    #[tokio::test]
    async fn test_refresh_and_filter() {
        let backend = Arc::new(FakeBackend::with_reports(vec![
            report("a", "🔊 Loud Music", NoiseLevel::Red, 1),
            report("b", "🚗 Vehicle Noise", NoiseLevel::Green, 1),
        ]));
        let mut admin = service(backend);

        admin.refresh().await.unwrap();
        assert_eq!(admin.visible_reports().len(), 2);
        assert!(!admin.state().loading);

        admin.set_filter("Vehicle").unwrap();
        let visible: Vec<&str> = admin.visible_reports().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(visible, vec!["b"]);

        assert!(admin.set_filter("Fireworks").is_err());
        assert_eq!(admin.state().filter, "Vehicle");
    }

    #[tokio::test]
    async fn test_save_selection_persists_then_refetches() {
        let backend = Arc::new(FakeBackend::with_reports(vec![report(
            "a",
            "🔊 Loud Music",
            NoiseLevel::Red,
            3,
        )]));
        let mut admin = service(backend.clone());
        admin.refresh().await.unwrap();

        let picker = admin.open_picker("a").unwrap();
        assert_eq!(picker.selected, None);
        assert_eq!(admin.picker_choices().len(), 3);

        admin.select_response(ReportStatus::ActionRequired).unwrap();
        let outcome = admin.save_selection().await.unwrap();

        assert!(matches!(outcome, SaveOutcome::Refreshed));
        assert!(admin.state().picker.is_none());
        assert_eq!(*backend.list_calls.lock().unwrap(), 2);
        assert_eq!(
            admin.state().reports[0].status,
            Some(ReportStatus::ActionRequired)
        );
        let cards = admin.cards(Utc::now());
        assert_eq!(cards[0].response_heading, "System Response");
        assert!(cards[0].response_message.contains("officer has been assigned"));
    }

    #[tokio::test]
    async fn test_save_without_selection_is_rejected() {
        let backend = Arc::new(FakeBackend::with_reports(vec![report(
            "a",
            "Party",
            NoiseLevel::Yellow,
            1,
        )]));
        let mut admin = service(backend.clone());
        admin.refresh().await.unwrap();
        admin.open_picker("a").unwrap();

        let err = admin.save_selection().await.unwrap_err();
        assert_eq!(err.user_notice("ignored"), "Please select a response");
        assert!(backend.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_response_cannot_be_selected() {
        let backend = Arc::new(FakeBackend::with_reports(vec![report(
            "a",
            "Party",
            NoiseLevel::Yellow,
            4,
        )]));
        let mut admin = service(backend);
        admin.refresh().await.unwrap();
        admin.open_picker("a").unwrap();

        assert!(admin.select_response(ReportStatus::ActionRequired).is_err());
        assert!(admin.select_response(ReportStatus::Pending).is_err());
        admin.select_response(ReportStatus::Monitoring).unwrap();
    }

    #[tokio::test]
    async fn test_failed_save_keeps_picker_and_local_state() {
        let backend = Arc::new(FakeBackend {
            reports: std::sync::Mutex::new(vec![report("a", "Party", NoiseLevel::Green, 1)]),
            fail_updates_with: Some(500),
            ..Default::default()
        });
        let mut admin = service(backend.clone());
        admin.refresh().await.unwrap();
        admin.open_picker("a").unwrap();
        admin.select_response(ReportStatus::Resolved).unwrap();

        assert!(admin.save_selection().await.is_err());

        let picker = admin.state().picker.as_ref().unwrap();
        assert_eq!(picker.selected, Some(ReportStatus::Resolved));
        assert_eq!(admin.state().reports[0].status, None);
        assert!(!admin.is_saving());
        assert_eq!(*backend.list_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_succeeds_when_refetch_fails() {
        let backend = Arc::new(FakeBackend {
            reports: std::sync::Mutex::new(vec![report("a", "Party", NoiseLevel::Red, 1)]),
            fail_lists_after: Some(1),
            ..Default::default()
        });
        let mut admin = service(backend.clone());
        admin.refresh().await.unwrap();
        admin.open_picker("a").unwrap();
        admin.select_response(ReportStatus::Monitoring).unwrap();

        let outcome = admin.save_selection().await.unwrap();

        let SaveOutcome::RefreshFailed(err) = outcome else {
            panic!("expected the re-fetch to fail");
        };
        assert_eq!(err.user_notice("Failed to fetch reports"), "Could not connect to server");
        assert_eq!(backend.updates.lock().unwrap().len(), 1);
        assert!(admin.state().picker.is_none());
        assert_eq!(admin.state().reports.len(), 1);
        assert!(!admin.state().loading);
    }

    #[tokio::test]
    async fn test_stale_fetch_is_discarded() {
        let backend = Arc::new(FakeBackend::default());
        let mut admin = service(backend);

        let ticket = admin.epoch().ticket();
        admin.leave();
        admin
            .apply_fetch(ticket, Ok(vec![report("late", "Party", NoiseLevel::Red, 1)]))
            .unwrap();
        assert!(admin.state().reports.is_empty());

        // Errors resolving after leaving are swallowed too
        let ticket = admin.epoch().ticket();
        admin.epoch().invalidate();
        assert!(admin
            .apply_fetch(ticket, Err(AppError::Connection("reset".to_string())))
            .is_ok());
    }

    #[tokio::test]
    async fn test_offline_refresh_keeps_previous_reports() {
        let mut admin = service(Arc::new(FakeBackend::with_reports(vec![report(
            "a",
            "Party",
            NoiseLevel::Red,
            1,
        )])));
        admin.refresh().await.unwrap();

        let ticket = admin.epoch().ticket();
        let err = admin
            .apply_fetch(ticket, Err(AppError::Connection("refused".to_string())))
            .unwrap_err();
        assert_eq!(err.user_notice("Failed to fetch reports"), "Could not connect to server");
        assert_eq!(admin.state().reports.len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_expanded() {
        let mut admin = service(Arc::new(FakeBackend::default()));
        admin.toggle_expanded("a");
        assert_eq!(admin.state().expanded_report.as_deref(), Some("a"));
        admin.toggle_expanded("b");
        assert_eq!(admin.state().expanded_report.as_deref(), Some("b"));
        admin.toggle_expanded("b");
        assert_eq!(admin.state().expanded_report, None);
    }
}
