//! Enrollment payload model and the face samples that feed it.

pub mod biometric;
pub mod types;
pub mod wire_keys;

pub use biometric::{BiometricError, FaceSample, ImageFormat};
pub use types::{EnrollPersonRequest, FacePersonRequest, PersonRequest, ValidationError};
