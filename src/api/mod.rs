// src/api/mod.rs
//! Binding for the BioPass ID multibiometrics enroll endpoint.
pub mod client;
pub mod error;
pub mod request;
pub mod types;

pub use client::{BioPassClient, EnrollmentApi};
pub use error::ApiError;
pub use request::{AbsentFaces, ApiCall};
pub use types::EnrollPersonResponse;
