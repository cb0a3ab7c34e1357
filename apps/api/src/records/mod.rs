//! Record source — where a CV comes from when the caller does not post it.
//!
//! The storage API owns the profile data; this service only reads it, forwarding
//! the caller's own bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::cv::RawCvRecord;
use crate::session::Session;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches the caller's raw CV record.
///
/// Carried in `AppState` as `Arc<dyn RecordSource>`.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_cv_data(&self, session: &Session) -> Result<RawCvRecord, AppError>;
}

/// Reads `GET {base_url}/cv/data` from the profile service.
#[derive(Clone)]
pub struct HttpRecordSource {
    client: Client,
    base_url: String,
}

impl HttpRecordSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
        }
    }

    fn cv_data_url(&self) -> String {
        format!("{}/cv/data", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_cv_data(&self, session: &Session) -> Result<RawCvRecord, AppError> {
        let url = self.cv_data_url();
        let response = self
            .client
            .get(&url)
            .bearer_auth(&session.bearer_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GET {url}: {e}")))?;

        let status = response.status();
        if let Some(err) = status_error(status) {
            let body = response.text().await.unwrap_or_default();
            warn!("Profile service returned {status} for {url}: {body}");
            return Err(err);
        }

        let record: RawCvRecord = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("invalid CV payload from {url}: {e}")))?;

        debug!("Fetched CV record from {url}");
        Ok(record)
    }
}

/// Maps a non-success upstream status to the error the caller should see.
fn status_error(status: StatusCode) -> Option<AppError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized,
        StatusCode::NOT_FOUND => AppError::NotFound("CV data not found".to_string()),
        other => AppError::Upstream(format!("profile service returned {other}")),
    })
}
