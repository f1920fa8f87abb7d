// src/api/request.rs
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::error::{ApiError, Result};
use crate::core::identity::{types::EnrollPersonRequest, wire_keys};
use crate::utils::config::SubscriptionKey;

pub const ENROLL_PATH: &str = "multibiometrics/enroll";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// How a request without faces is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsentFaces {
    /// No `"Face"` key at all.
    #[default]
    Omit,
    /// `"Face": null`.
    Null,
}

/// Everything that goes on the wire for one call, built before any I/O.
#[derive(Clone)]
pub struct ApiCall {
    pub method: Method,
    pub path: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl ApiCall {
    pub fn enroll_person(
        request: &EnrollPersonRequest,
        key: &SubscriptionKey,
        absent_faces: AbsentFaces,
    ) -> Result<Self> {
        let mut body = serde_json::to_value(request).map_err(ApiError::Encode)?;

        if absent_faces == AbsentFaces::Null && request.person.faces.is_none() {
            if let Some(person) = body
                .get_mut(wire_keys::PERSON)
                .and_then(Value::as_object_mut)
            {
                person.insert(wire_keys::FACE_LIST.to_string(), Value::Null);
            }
        }

        Ok(Self {
            method: Method::POST,
            path: ENROLL_PATH,
            headers: vec![
                (CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE.to_string()),
                (SUBSCRIPTION_KEY_HEADER, key.expose().to_string()),
            ],
            body: serde_json::to_vec(&body).map_err(ApiError::Encode)?,
        })
    }

    /// Resolves the relative path against a base URL ending in `/`.
    pub fn url(&self, base_url: &Url) -> Result<Url> {
        Ok(base_url.join(self.path)?)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Debug for ApiCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<_> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if *name == SUBSCRIPTION_KEY_HEADER {
                    (*name, "<redacted>")
                } else {
                    (*name, value.as_str())
                }
            })
            .collect();

        f.debug_struct("ApiCall")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}
