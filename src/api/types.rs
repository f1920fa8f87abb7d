// src/api/types.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{ApiError, Result};

/// Body returned by the enroll endpoint.
///
/// The provider's schema is not pinned down, so the body is kept as an
/// opaque JSON object. Anything that is not an object fails to decode
/// rather than being coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollPersonResponse {
    body: Map<String, Value>,
}

impl EnrollPersonResponse {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.body
    }
}
