// tests/integration/enrollment_tests.rs
use std::io::Write;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use biopass_enroll::{
    api::error::ApiError,
    core::identity::types::{EnrollPersonRequest, FacePersonRequest},
    utils::error::NodeError,
};
use httpmock::prelude::*;
use serde_json::json;

use crate::common::{TestContext, JPEG_BYTES, TEST_KEY};

#[test_log::test(tokio::test)]
async fn test_enroll_from_image_file() {
    let ctx = TestContext::new();
    let encoded = STANDARD.encode(JPEG_BYTES);

    let mock = ctx.server.mock(|when, then| {
        when.method(Method::POST)
            .path("/multibiometrics/enroll")
            .header("Content-Type", "application/json")
            .header("Ocp-Apim-Subscription-Key", TEST_KEY)
            .json_body(json!({
                "Person": {"CustomID": "user-42", "Face": [{"Face-1": encoded}]}
            }));
        then.status(200)
            .json_body(json!({"Person": {"CustomID": "user-42"}, "Success": true}));
    });

    let mut image = tempfile::NamedTempFile::new().unwrap();
    image.write_all(JPEG_BYTES).unwrap();

    let sample = ctx.app.load_face(image.path()).await.unwrap();
    let receipt = ctx.app.enroll("user-42", vec![sample]).await.unwrap();

    mock.assert();
    assert_eq!(receipt.custom_id, "user-42");
    assert_eq!(receipt.face_count, 1);
    assert_eq!(receipt.response.get("Success"), Some(&json!(true)));
}

#[test_log::test(tokio::test)]
async fn test_multiple_faces_keep_their_order() {
    let ctx = TestContext::new();

    let mock = ctx.server.mock(|when, then| {
        when.method(Method::POST)
            .path("/multibiometrics/enroll")
            .json_body(json!({
                "Person": {
                    "CustomID": "user-7",
                    "Face": [{"Face-1": "AQ=="}, {"Face-1": "Ag=="}, {"Face-1": "Aw=="}]
                }
            }));
        then.status(201).json_body(json!({}));
    });

    let samples = ["AQ==", "Ag==", "Aw=="]
        .iter()
        .map(|s| ctx.app.decode_face(s).unwrap())
        .collect();
    ctx.app.enroll("user-7", samples).await.unwrap();

    mock.assert();
}

#[test_log::test(tokio::test)]
async fn test_absent_faces_null_policy_end_to_end() {
    let ctx = TestContext::with_enrollment("require_faces = false\nabsent_faces = \"null\"");

    let mock = ctx.server.mock(|when, then| {
        when.method(Method::POST)
            .path("/multibiometrics/enroll")
            .json_body(json!({"Person": {"CustomID": "user-42", "Face": null}}));
        then.status(200).json_body(json!({}));
    });

    let receipt = ctx.app.enroll("user-42", vec![]).await.unwrap();

    mock.assert();
    assert_eq!(receipt.face_count, 0);
}

#[test_log::test(tokio::test)]
async fn test_rejected_subscription_key() {
    let ctx = TestContext::new();
    let mock = ctx.server.mock(|when, then| {
        when.method(Method::POST).path("/multibiometrics/enroll");
        then.status(401)
            .json_body(json!({"statusCode": 401, "message": "Access denied due to invalid subscription key."}));
    });

    let sample = ctx.app.decode_face("AQID").unwrap();
    let err = ctx.app.enroll("user-42", vec![sample]).await.unwrap_err();

    assert!(matches!(
        err,
        NodeError::Api(ApiError::Unauthorized { status: 401, .. })
    ));
    assert_eq!(mock.calls(), 1);
}

#[test_log::test(tokio::test)]
async fn test_non_object_response_fails_closed() {
    let ctx = TestContext::new();
    ctx.server.mock(|when, then| {
        when.method(Method::POST).path("/multibiometrics/enroll");
        then.status(200).json_body(json!(["unexpected"]));
    });

    let sample = ctx.app.decode_face("AQID").unwrap();
    let err = ctx.app.enroll("user-42", vec![sample]).await.unwrap_err();

    assert!(matches!(err, NodeError::Api(ApiError::Decode(_))));
}

#[test_log::test(tokio::test)]
async fn test_invalid_request_is_not_sent() {
    let ctx = TestContext::new();
    let mock = ctx.server.mock(|when, then| {
        when.method(Method::POST).path("/multibiometrics/enroll");
        then.status(200).json_body(json!({}));
    });

    let request = EnrollPersonRequest::new("user-42", Some(vec![FacePersonRequest::new("")]));
    let err = ctx.app.enrollment_service().submit(request).await.unwrap_err();

    assert!(matches!(err, NodeError::Validation(_)));
    assert_eq!(mock.calls(), 0);
}

#[test]
fn test_preview_matches_wire_contract() {
    let ctx = TestContext::new();
    let request =
        EnrollPersonRequest::new("user-42", Some(vec![FacePersonRequest::new("BASE64DATA")]));

    let (url, call) = ctx.app.preview(&request).unwrap();

    assert_eq!(url.as_str(), format!("{}/multibiometrics/enroll", ctx.server.base_url()));
    assert_eq!(call.method.as_str(), "POST");
    assert_eq!(call.header("Content-Type"), Some("application/json"));
    assert_eq!(call.header("Ocp-Apim-Subscription-Key"), Some(TEST_KEY));
    assert_eq!(
        String::from_utf8(call.body).unwrap(),
        r#"{"Person":{"CustomID":"user-42","Face":[{"Face-1":"BASE64DATA"}]}}"#
    );
}
