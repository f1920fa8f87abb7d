// src/core/identity/biometric.rs
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use super::types::FacePersonRequest;

pub const DEFAULT_MAX_FACE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum BiometricError {
    #[error("face sample is empty")]
    Empty,

    #[error("face sample is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("face sample is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("failed to read face image {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Unknown,
}

impl ImageFormat {
    fn detect(data: &[u8]) -> Self {
        const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];
        const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

        if data.starts_with(JPEG) {
            ImageFormat::Jpeg
        } else if data.starts_with(PNG) {
            ImageFormat::Png
        } else {
            ImageFormat::Unknown
        }
    }
}

/// Raw face image bytes on their way into a `"Face-1"` payload.
#[derive(Clone)]
pub struct FaceSample {
    data: Vec<u8>,
    format: ImageFormat,
}

impl std::fmt::Debug for FaceSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceSample")
            .field("len", &self.data.len())
            .field("format", &self.format)
            .finish()
    }
}

impl FaceSample {
    pub fn from_bytes(data: Vec<u8>, max_bytes: usize) -> Result<Self, BiometricError> {
        if data.is_empty() {
            return Err(BiometricError::Empty);
        }
        if data.len() > max_bytes {
            return Err(BiometricError::TooLarge {
                size: data.len(),
                limit: max_bytes,
            });
        }

        let format = ImageFormat::detect(&data);
        if format == ImageFormat::Unknown {
            // The API decides what it accepts; we only flag it.
            warn!(len = data.len(), "Face sample is neither JPEG nor PNG");
        }

        Ok(Self { data, format })
    }

    /// Reads at most `max_bytes + 1` bytes, so an oversized file or an
    /// endless stream fails with `TooLarge` instead of filling memory.
    pub async fn from_path(path: impl AsRef<Path>, max_bytes: usize) -> Result<Self, BiometricError> {
        let path = path.as_ref();
        let read_error = |source| BiometricError::Read {
            path: path.to_path_buf(),
            source,
        };

        let size = tokio::fs::metadata(path).await.map_err(read_error)?.len();
        if size > max_bytes as u64 {
            return Err(BiometricError::TooLarge {
                size: usize::try_from(size).unwrap_or(usize::MAX),
                limit: max_bytes,
            });
        }

        let file = tokio::fs::File::open(path).await.map_err(read_error)?;
        let mut data = Vec::with_capacity(size as usize);
        file.take(max_bytes as u64 + 1)
            .read_to_end(&mut data)
            .await
            .map_err(read_error)?;

        debug!("Loaded face image {} ({} bytes)", path.display(), data.len());
        Self::from_bytes(data, max_bytes)
    }

    /// Accepts data that is already base64 encoded, as produced by a capture
    /// device. Line breaks (MIME-style wrapping) are ignored; the encoding is
    /// checked by decoding it.
    pub fn from_base64(encoded: &str, max_bytes: usize) -> Result<Self, BiometricError> {
        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let data = STANDARD.decode(compact)?;
        Self::from_bytes(data, max_bytes)
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_payload(self) -> FacePersonRequest {
        FacePersonRequest::new(STANDARD.encode(&self.data))
    }
}
