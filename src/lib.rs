pub mod api;
pub mod core;
pub mod utils;

use std::sync::Arc;
use tracing::info;

use crate::{
    api::{client::BioPassClient, request::ApiCall},
    core::{
        identity::{biometric::FaceSample, types::EnrollPersonRequest},
        services::enrollment::{EnrollmentReceipt, EnrollmentService},
    },
    utils::{config::Config, error::Result},
};

pub struct Application {
    config: Arc<Config>,
    client: Arc<BioPassClient>,
    enrollment_service: EnrollmentService,
}

impl Application {
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        info!("Initializing BioPass client for {}", config.api.base_url);
        let client = Arc::new(BioPassClient::new(
            &config.api,
            config.enrollment.absent_faces,
        )?);

        let enrollment_service = EnrollmentService::new(client.clone(), &config.enrollment);

        Ok(Self {
            config,
            client,
            enrollment_service,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn enrollment_service(&self) -> &EnrollmentService {
        &self.enrollment_service
    }

    pub async fn load_face(&self, path: impl AsRef<std::path::Path>) -> Result<FaceSample> {
        Ok(FaceSample::from_path(path, self.config.enrollment.max_face_bytes).await?)
    }

    pub fn decode_face(&self, encoded: &str) -> Result<FaceSample> {
        Ok(FaceSample::from_base64(encoded, self.config.enrollment.max_face_bytes)?)
    }

    pub async fn enroll(
        &self,
        custom_id: impl Into<String>,
        samples: Vec<FaceSample>,
    ) -> Result<EnrollmentReceipt> {
        self.enrollment_service.enroll(custom_id, samples).await
    }

    /// The call that `enroll` would make, without sending it.
    pub fn preview(&self, request: &EnrollPersonRequest) -> Result<(url::Url, ApiCall)> {
        let call = self.client.build_call(request)?;
        let url = call.url(self.client.base_url())?;
        Ok((url, call))
    }
}
