use crate::api::domain::{CheckInRequest, CheckInResponse, GeofencingContextGet, OfflineCheckInRequest};
use crate::api::{ApiError, AttendanceApi, map_context};
use crate::app_config::AppConfig;
use crate::domain::GeofencingContext;
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::{Client, Url, header};
use thiserror::Error;
use tracing::{debug, info, instrument};

pub fn new_client(config: &AppConfig) -> Result<Client, ApiClientError> {
    let mut headers = header::HeaderMap::new();
    let mut authorization_value = HeaderValue::from_str(&format!("Bearer {}", config.api().token()))?;
    authorization_value.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, authorization_value);

    let client = Client::builder().timeout(config.api().timeout()).default_headers(headers).build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("attendance client set an invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}

#[derive(Debug, Clone)]
pub struct HttpAttendanceApi {
    client: Client,
    url: String,
}

impl HttpAttendanceApi {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        HttpAttendanceApi { client, url: url.into() }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn check_in(&self, url: Url, request: &CheckInRequest) -> Result<CheckInResponse, ApiError> {
        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Rejections come with an error status and a regular check-in body
        match serde_json::from_str::<CheckInResponse>(&body) {
            Ok(check_in) => {
                debug!(status = %status, success = check_in.success, "Check-in answered");
                Ok(check_in)
            }
            Err(_) if !status.is_success() => Err(ApiError::Status {
                status: status.as_u16(),
                body,
            }),
            Err(e) => Err(ApiError::Decode(e.to_string())),
        }
    }
}

#[async_trait]
impl AttendanceApi for HttpAttendanceApi {
    #[instrument(skip(self))]
    async fn geofencing_context(&self) -> Result<GeofencingContext, ApiError> {
        info!("🌐 Retrieving geofencing context...");
        let response = self
            .client
            .get(self.endpoint(&["attendance", "geofencing-context"])?)
            .send()
            .await?
            .error_for_status()?;

        let context_get = response.json::<GeofencingContextGet>().await?;
        let context = map_context(context_get);
        info!(
            "🌐 Retrieving geofencing context... OK, {} office(s), {} mission(s)",
            context.offices.len(),
            context.missions.len()
        );

        Ok(context)
    }

    #[instrument(skip_all)]
    async fn check_in_office(&self, request: &CheckInRequest) -> Result<CheckInResponse, ApiError> {
        self.check_in(self.endpoint(&["attendance", "check-in"])?, request).await
    }

    #[instrument(skip(self, request))]
    async fn check_in_mission(&self, order_number: &str, request: &CheckInRequest) -> Result<CheckInResponse, ApiError> {
        self.check_in(self.endpoint(&["missions", order_number, "check-in"])?, request).await
    }

    #[instrument(skip(self))]
    async fn check_in_offline(&self, timestamp: &str) -> Result<(), ApiError> {
        self.client
            .post(self.endpoint(&["attendance", "check-in", "offline"])?)
            .json(&OfflineCheckInRequest { timestamp })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
