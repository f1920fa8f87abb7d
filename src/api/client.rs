// src/api/client.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use super::{
    error::{ApiError, Result},
    request::{AbsentFaces, ApiCall},
    types::EnrollPersonResponse,
};
use crate::core::identity::types::EnrollPersonRequest;
use crate::utils::config::{ApiConfig, SubscriptionKey};

/// The enrollment endpoint as seen by callers. One invocation is one POST.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentApi: Send + Sync {
    async fn enroll_person(&self, request: &EnrollPersonRequest) -> Result<EnrollPersonResponse>;
}

pub struct BioPassClient {
    http: reqwest::Client,
    base_url: Url,
    subscription_key: SubscriptionKey,
    absent_faces: AbsentFaces,
}

impl BioPassClient {
    pub fn new(config: &ApiConfig, absent_faces: AbsentFaces) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .http1_title_case_headers()
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url()?,
            subscription_key: config.subscription_key.clone(),
            absent_faces,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn build_call(&self, request: &EnrollPersonRequest) -> Result<ApiCall> {
        ApiCall::enroll_person(request, &self.subscription_key, self.absent_faces)
    }

    async fn send(&self, call: ApiCall) -> Result<EnrollPersonResponse> {
        let url = call.url(&self.base_url).map_err(|e| {
            error!("Failed to resolve enroll URL: {}", e);
            e
        })?;
        let headers = header_map(&call.headers).map_err(|e| {
            error!("Failed to build request headers: {}", e);
            e
        })?;

        debug!(method = %call.method, %url, body_len = call.body.len(), "Sending request");
        let response = self
            .http
            .request(call.method, url)
            .headers(headers)
            .body(call.body)
            .send()
            .await
            .map_err(|e| {
                error!("Enrollment request failed: {}", e);
                ApiError::Transport(e)
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            error!(status = status.as_u16(), "Failed to read enrollment response: {}", e);
            ApiError::Transport(e)
        })?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), "Subscription key rejected");
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "Enrollment returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        EnrollPersonResponse::from_slice(&bytes).map_err(|e| {
            error!(status = status.as_u16(), "Undecodable enrollment response: {}", e);
            e
        })
    }
}

#[async_trait]
impl EnrollmentApi for BioPassClient {
    #[instrument(
        name = "enroll_person",
        skip(self, request),
        fields(custom_id = %request.custom_id(), faces = request.face_count())
    )]
    async fn enroll_person(&self, request: &EnrollPersonRequest) -> Result<EnrollPersonResponse> {
        let call = self.build_call(request).map_err(|e| {
            error!("Failed to encode enrollment request: {}", e);
            e
        })?;
        let response = self.send(call).await?;

        info!("Enrollment accepted");
        Ok(response)
    }
}

fn header_map(headers: &[(&'static str, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for &(name, ref value) in headers {
        let invalid = |reason: String| ApiError::InvalidHeader { name, reason };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
