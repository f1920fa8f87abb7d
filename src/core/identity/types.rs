// src/core/identity/types.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level body of `POST multibiometrics/enroll`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollPersonRequest {
    #[serde(rename = "Person")]
    pub person: PersonRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRequest {
    #[serde(rename = "CustomID")]
    pub custom_id: String,

    /// Ordered face samples. `None` is written as a missing key; the API
    /// layer can turn it into an explicit `null` when configured to.
    #[serde(rename = "Face", default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<FacePersonRequest>>,
}

/// A single face sample, base64 image data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacePersonRequest {
    #[serde(rename = "Face-1")]
    pub face: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("custom id must not be empty")]
    EmptyCustomId,

    #[error("face list is present but empty")]
    EmptyFaceList,

    #[error("no face samples supplied")]
    MissingFaces,

    #[error("face sample {index} is empty")]
    EmptyFace { index: usize },
}

impl EnrollPersonRequest {
    pub fn new(custom_id: impl Into<String>, faces: Option<Vec<FacePersonRequest>>) -> Self {
        Self {
            person: PersonRequest {
                custom_id: custom_id.into(),
                faces,
            },
        }
    }

    pub fn custom_id(&self) -> &str {
        &self.person.custom_id
    }

    pub fn face_count(&self) -> usize {
        self.person.faces.as_ref().map_or(0, Vec::len)
    }

    /// Checks what the remote API needs for the enrollment to be useful.
    /// Sending never calls this; callers decide whether to.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.person.custom_id.trim().is_empty() {
            return Err(ValidationError::EmptyCustomId);
        }

        if let Some(faces) = &self.person.faces {
            if faces.is_empty() {
                return Err(ValidationError::EmptyFaceList);
            }
            if let Some(index) = faces.iter().position(|f| f.face.trim().is_empty()) {
                return Err(ValidationError::EmptyFace { index });
            }
        }

        Ok(())
    }
}

impl FacePersonRequest {
    pub fn new(face: impl Into<String>) -> Self {
        Self { face: face.into() }
    }
}
