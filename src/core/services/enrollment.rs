use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    api::{client::EnrollmentApi, types::EnrollPersonResponse},
    core::identity::{
        biometric::FaceSample,
        types::{EnrollPersonRequest, ValidationError},
    },
    utils::{
        config::EnrollmentConfig,
        error::{NodeError, Result},
    },
};

/// Outcome of a single accepted enrollment.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentReceipt {
    pub request_id: Uuid,
    pub custom_id: String,
    pub face_count: usize,
    pub submitted_at: DateTime<Utc>,
    pub response: EnrollPersonResponse,
}

pub struct EnrollmentService {
    api: Arc<dyn EnrollmentApi>,
    timeout: Option<Duration>,
    require_faces: bool,
}

impl EnrollmentService {
    pub fn new(api: Arc<dyn EnrollmentApi>, config: &EnrollmentConfig) -> Self {
        Self {
            api,
            timeout: config.timeout(),
            require_faces: config.require_faces,
        }
    }

    pub async fn enroll(
        &self,
        custom_id: impl Into<String>,
        samples: Vec<FaceSample>,
    ) -> Result<EnrollmentReceipt> {
        let faces = if samples.is_empty() {
            None
        } else {
            Some(samples.into_iter().map(FaceSample::into_payload).collect())
        };

        self.submit(EnrollPersonRequest::new(custom_id, faces)).await
    }

    /// Validates, then sends exactly once. Nothing is retried.
    pub async fn submit(&self, request: EnrollPersonRequest) -> Result<EnrollmentReceipt> {
        let request_id = Uuid::new_v4();

        request.validate()?;
        if self.require_faces && request.person.faces.is_none() {
            warn!(%request_id, "Rejecting enrollment without face samples");
            return Err(ValidationError::MissingFaces.into());
        }

        info!(
            %request_id,
            custom_id = %request.custom_id(),
            faces = request.face_count(),
            "Submitting enrollment"
        );
        let submitted_at = Utc::now();

        let call = self.api.enroll_person(&request);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                error!(%request_id, "Enrollment timed out after {:?}", limit);
                NodeError::Timeout(limit)
            })?,
            None => call.await,
        }
        .map_err(|e| {
            error!(%request_id, "Enrollment failed: {}", e);
            NodeError::Api(e)
        })?;

        info!(%request_id, "Enrollment completed");
        Ok(EnrollmentReceipt {
            request_id,
            custom_id: request.person.custom_id,
            face_count: request.person.faces.as_ref().map_or(0, Vec::len),
            submitted_at,
            response,
        })
    }
}
