use crate::e2e::helpers;

use helpers::TestContext;
use httpmock::Method::POST;
use hyper::StatusCode;
use serde_json::json;
use std::path::PathBuf;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_with_builtin_voice(ctx: &TestContext) {
    let tts = ctx
        .backend
        .mock_async(|when, then| {
            when.method(POST)
                .path("/tts")
                .json_body(json!({
                    "text": "Hello there.",
                    "role": "female1",
                    "speed": 1.0,
                    "version": "v2"
                }));
            then.status(200).body("RIFFaudio");
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "Hello there.", "voice": "female1" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["audio_size_bytes"], 9);

    let output = PathBuf::from(body["output_path"].as_str().unwrap());
    assert!(output.starts_with(ctx.config.save_dir()));
    assert!(output.file_name().unwrap().to_str().unwrap().starts_with("tts_"));
    assert_eq!(std::fs::read(&output).unwrap(), b"RIFFaudio");
    tts.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_with_custom_voice(ctx: &TestContext) {
    ctx.add_voice("alice-hello world.wav", b"alice-sample");
    let clone = ctx
        .backend
        .mock_async(|when, then| {
            when.method(POST)
                .path("/clone_eq")
                .body_contains("hello world")
                .body_contains("alice-sample");
            then.status(200).body("cloned");
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "Good morning.", "voice": "custom:alice-hello world.wav" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    clone.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "   ", "voice": "female1" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Text cannot be empty");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_over_single_shot_limit(ctx: &TestContext) {
    let text = "a".repeat(1501);

    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": text, "voice": "female1" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_error_message("1500 characters");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_custom_voice(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "Hi.", "voice": "custom:nobody-here.wav" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Unknown custom voice");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_backend_failure_as_bad_gateway(ctx: &TestContext) {
    ctx.backend
        .mock_async(|when, then| {
            when.method(POST).path("/tts");
            then.status(500).body("model crashed");
        })
        .await;

    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Hi.", "voice": "female1" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("HTTP 500");
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clone_from_arbitrary_reference(ctx: &TestContext) {
    let reference = ctx.write_file("speaker.wav", b"speaker-sample");
    let clone = ctx
        .backend
        .mock_async(|when, then| {
            when.method(POST)
                .path("/clone_eq")
                .body_contains("this is me")
                .body_contains("speaker-sample");
            then.status(200).body("cloned-audio");
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/clone",
            &json!({
                "text": "Read this for me.",
                "reference_audio": reference,
                "reference_text": "this is me",
                "version": "v1"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let output = PathBuf::from(response.body.as_ref().unwrap()["output_path"].as_str().unwrap());
    assert!(output.file_name().unwrap().to_str().unwrap().starts_with("clone_"));
    assert_eq!(std::fs::read(&output).unwrap(), b"cloned-audio");
    clone.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clone_across_languages_without_reference_text(ctx: &TestContext) {
    let reference = ctx.write_file("speaker.wav", b"speaker-sample");
    let clone = ctx
        .backend
        .mock_async(|when, then| {
            when.method(POST).path("/clone");
            then.status(200).body("cross");
        })
        .await;

    let response = ctx
        .client
        .post(
            "/api/clone",
            &json!({ "text": "Bonjour.", "reference_audio": reference }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    clone.assert_async().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_reference_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/clone",
            &json!({ "text": "Hi.", "reference_audio": "/definitely/not/here.wav" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Reference audio not found");
}
