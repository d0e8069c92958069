use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use super::ReportBackend;
use crate::core::config::BackendConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    decode_reports, CountUsersResponse, NewReportPayload, SubmitReportResponse, TotalReportsResponse,
    UpdateStatusRequest, UserReportsResponse,
};
use crate::features::reports::models::{Report, ReportStatus};
use crate::shared::constants::{
    PATH_COUNT_USERS, PATH_LIST_REPORTS, PATH_NEW_REPORT, PATH_TOTAL_REPORTS, PATH_UPDATE_STATUS,
    PATH_USER_REPORTS,
};
use crate::shared::types::ErrorBody;

/// `ReportBackend` over the JSON/multipart HTTP API
pub struct HttpReportBackend {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    upload_timeout: std::time::Duration,
}

impl HttpReportBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("BarangayNoiseClient/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            upload_timeout: config.upload_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// URL of `path` followed by one percent-encoded identifier segment
    fn url_with_id(&self, path: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, path, urlencoding::encode(id))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(AppError::from_transport)?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse backend response: {:?}", e);
            AppError::InvalidResponse(format!("Failed to parse backend response: {}", e))
        })
    }

    /// Turn a non-success response into `Rejected`, keeping the backend's message
    async fn rejection(response: reqwest::Response) -> AppError {
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());

        tracing::warn!("Backend returned HTTP {} for {}: {}", status, url, body);

        AppError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ReportBackend for HttpReportBackend {
    async fn list_reports(&self) -> Result<Vec<Report>> {
        let records: Vec<serde_json::Value> = self.get_json(&self.url(PATH_LIST_REPORTS)).await?;
        let reports = decode_reports(records);
        tracing::info!("Fetched {} reports", reports.len());
        Ok(reports)
    }

    async fn list_reports_for_user(&self, user_id: &str) -> Result<Vec<Report>> {
        let envelope: UserReportsResponse = self
            .get_json(&self.url_with_id(PATH_USER_REPORTS, user_id))
            .await?;
        let reports = decode_reports(envelope.reports);
        tracing::info!("Fetched {} reports for user {}", reports.len(), user_id);
        Ok(reports)
    }

    async fn update_report_status(&self, report_id: &str, status: ReportStatus) -> Result<()> {
        let url = self.url_with_id(PATH_UPDATE_STATUS, report_id);
        tracing::debug!("PUT {} status={}", url, status);

        let response = self
            .authorize(self.client.put(&url))
            .json(&UpdateStatusRequest { status })
            .send()
            .await
            .map_err(AppError::from_transport)?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        tracing::info!("Report {} status updated to {}", report_id, status);
        Ok(())
    }

    async fn count_users(&self) -> Result<u64> {
        let body: CountUsersResponse = self.get_json(&self.url(PATH_COUNT_USERS)).await?;
        Ok(body.total_users)
    }

    async fn count_reports(&self) -> Result<u64> {
        let body: TotalReportsResponse = self.get_json(&self.url(PATH_TOTAL_REPORTS)).await?;
        Ok(body.total_reports)
    }

    async fn submit_report(&self, payload: NewReportPayload) -> Result<Report> {
        let bytes = tokio::fs::read(&payload.media.path).await?;
        let file_name = payload
            .media
            .upload_file_name(chrono::Utc::now().timestamp_millis());

        let media_part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(&payload.media.mime_type())
            .map_err(|e| AppError::Internal(format!("Invalid media MIME type: {}", e)))?;

        let mut form = Form::new()
            .text("userId", payload.user_id.clone())
            .part("media", media_part)
            .text("reason", payload.reason.clone())
            .text("mediaType", payload.media.media_type.as_str())
            .text("noiseLevel", payload.noise_level.as_str());

        if let Some(comment) = payload.comment.clone() {
            form = form.text("comment", comment);
        }

        if let Some(location) = &payload.location {
            let location_json = serde_json::to_string(location)
                .map_err(|e| AppError::Internal(format!("Failed to encode location: {}", e)))?;
            form = form.text("location", location_json);
        }

        let url = self.url(PATH_NEW_REPORT);
        tracing::debug!("POST {} media={} level={}", url, file_name, payload.noise_level);

        let response = self
            .authorize(self.client.post(&url))
            .timeout(self.upload_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(AppError::from_transport)?;

        let created: SubmitReportResponse = Self::decode(response).await?;
        let report = created.into_report();
        tracing::info!("Submitted report {}", report.id);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_trim_trailing_slash_and_encode_ids() {
        let backend =
            HttpReportBackend::new(&BackendConfig::with_base_url("http://localhost:5000/api/"))
                .unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000/api");
        assert_eq!(
            backend.url(PATH_LIST_REPORTS),
            "http://localhost:5000/api/reports/get-report"
        );
        assert_eq!(
            backend.url_with_id(PATH_UPDATE_STATUS, "abc/../x"),
            "http://localhost:5000/api/reports/update-status/abc%2F..%2Fx"
        );
    }
}
