use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::history::dtos::HistoryReportCardDto;
use crate::features::reports::clients::ReportBackend;
use crate::features::reports::models::Report;
use crate::features::reports::services::{EpochTicket, ViewEpoch};
use crate::shared::constants::NOTICE_LOGIN_TO_VIEW;

/// Per-screen state of the citizen history list
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    pub reports: Vec<Report>,
    pub loading: bool,
}

/// Loads and renders the signed-in citizen's own reports
pub struct HistoryService {
    backend: Arc<dyn ReportBackend>,
    user_id: Option<String>,
    epoch: ViewEpoch,
    state: HistoryState,
}

impl HistoryService {
    pub fn new(backend: Arc<dyn ReportBackend>, user_id: Option<String>) -> Self {
        Self {
            backend,
            user_id,
            epoch: ViewEpoch::new(),
            state: HistoryState::default(),
        }
    }

    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    pub fn epoch(&self) -> ViewEpoch {
        self.epoch.clone()
    }

    pub fn leave(&mut self) {
        self.epoch.invalidate();
        self.state.loading = false;
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let Some(user_id) = self.user_id.clone() else {
            tracing::warn!("History requested without a signed-in user");
            return Err(AppError::Unauthenticated(NOTICE_LOGIN_TO_VIEW.to_string()));
        };

        let ticket = self.epoch.ticket();
        self.state.loading = true;
        let result = self.backend.list_reports_for_user(&user_id).await;
        self.apply_fetch(ticket, result)
    }

    pub fn apply_fetch(&mut self, ticket: EpochTicket, result: Result<Vec<Report>>) -> Result<()> {
        if !self.epoch.is_current(ticket) {
            tracing::debug!("Discarding history fetch that resolved after leaving the screen");
            return Ok(());
        }
        self.state.loading = false;
        self.state.reports = result?;
        Ok(())
    }

    pub fn cards(&self) -> Vec<HistoryReportCardDto> {
        self.state.reports.iter().map(HistoryReportCardDto::from).collect()
    }
}
