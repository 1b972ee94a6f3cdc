use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_list_without_samples(ctx: &TestContext) {
    let response = ctx.client.get("/api/voices").await.unwrap();

    response.assert_status(StatusCode::OK);
    let voices = response.body.as_ref().unwrap()["voices"].as_array().unwrap().clone();
    assert!(voices.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_custom_voices_from_file_names(ctx: &TestContext) {
    ctx.add_voice("zoe-good evening.mp3", b"zoe");
    ctx.add_voice("alice-hello world.wav", b"alice");
    ctx.add_voice("notes.txt", b"not audio");
    ctx.add_voice("noseparator.wav", b"skipped");

    let response = ctx.client.get("/api/voices").await.unwrap();

    response.assert_status(StatusCode::OK);
    let voices = response.body.as_ref().unwrap()["voices"].as_array().unwrap().clone();
    let names: Vec<&str> = voices.iter().map(|v| v["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["alice", "zoe"]);
    assert_eq!(voices[0]["reference_text"], "hello world");
    assert_eq!(voices[0]["file_name"], "alice-hello world.wav");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_see_new_samples_without_restart(ctx: &TestContext) {
    let response = ctx.client.get("/api/voices").await.unwrap();
    assert_eq!(response.body.as_ref().unwrap()["voices"].as_array().unwrap().len(), 0);

    ctx.add_voice("bob-morning.wav", b"bob");

    let response = ctx.client.get("/api/voices").await.unwrap();
    assert_eq!(response.body.as_ref().unwrap()["voices"].as_array().unwrap().len(), 1);
}
