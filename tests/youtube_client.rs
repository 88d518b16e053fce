use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ytcaptions::config::Config;
use ytcaptions::extractors::{resolve_video_id, CaptionSource, YoutubeClient};
use ytcaptions::{SelectionRequest, TranscriptError, TranscriptPipeline};

const VIDEO_ID: &str = "dQw4w9WgXcQ";
const API_KEY: &str = "AIzaSyTestKey_123";

fn client(server: &MockServer) -> YoutubeClient {
    let mut config = Config::default().youtube;
    config.watch_url = format!("{}/watch?v={{video_id}}", server.uri());
    config.player_api_url = format!("{}/youtubei/v1/player?key={{api_key}}", server.uri());
    YoutubeClient::new(config).unwrap()
}

fn watch_page() -> String {
    format!(r#"<html><script>ytcfg.set({{"INNERTUBE_API_KEY":"{}"}});</script></html>"#, API_KEY)
}

async fn mount_watch_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/watch"))
        .and(query_param("v", VIDEO_ID))
        .and(header("accept-language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_string(watch_page()))
        .mount(server)
        .await;
}

async fn mount_player(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/player"))
        .and(query_param("key", API_KEY))
        .and(body_partial_json(json!({
            "context": {"client": {"clientName": "ANDROID"}},
            "videoId": VIDEO_ID,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn tracks_body(server: &MockServer) -> serde_json::Value {
    json!({
        "playabilityStatus": {"status": "OK"},
        "captions": {"playerCaptionsTracklistRenderer": {"captionTracks": [
            {
                "baseUrl": format!("{}/api/timedtext?v={}&lang=de&fmt=srv3", server.uri(), VIDEO_ID),
                "languageCode": "de",
                "name": {"runs": [{"text": "German"}]}
            },
            {
                "baseUrl": format!("{}/api/timedtext?v={}&lang=en&kind=asr&fmt=srv3", server.uri(), VIDEO_ID),
                "languageCode": "en",
                "kind": "asr",
                "name": {"runs": [{"text": "English (auto-generated)"}]}
            }
        ]}}
    })
}

#[tokio::test]
async fn fetches_selected_track_end_to_end() {
    let server = MockServer::start().await;
    mount_watch_page(&server).await;
    mount_player(&server, tracks_body(&server)).await;

    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("lang", "en"))
        .and(query_param_is_missing("fmt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<?xml version="1.0" encoding="utf-8" ?><transcript>
                <text start="58.2" dur="1.8">never gonna</text>
                <text start="60.0" dur="1.4">give you up</text>
                <text start="61.4">let you &amp;#39;down&amp;#39;</text>
            </transcript>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = TranscriptPipeline::new(client(&server));
    let request = SelectionRequest::new(Some(60), None, [], Vec::new()).unwrap();
    let transcript = pipeline
        .fetch_transcript(VIDEO_ID, &["en", "de"], &request)
        .await
        .unwrap();

    assert_eq!(transcript.track.language_code, "en");
    assert!(transcript.track.is_generated);
    let texts: Vec<&str> = transcript.snippets.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["give you up", "let you 'down'"]);
    assert_eq!(transcript.snippets[1].duration, 0.0);
}

#[tokio::test]
async fn page_http_error_is_page_fetch_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let video_id = resolve_video_id(VIDEO_ID).unwrap();
    let result = client(&server).list_tracks(&video_id).await;
    assert!(matches!(result, Err(TranscriptError::PageFetchFailed(_))));
}

#[tokio::test]
async fn captcha_page_is_request_blocked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/watch"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<form><div class="g-recaptcha" data-sitekey="k"></div></form>"#),
        )
        .mount(&server)
        .await;

    let video_id = resolve_video_id(VIDEO_ID).unwrap();
    let result = client(&server).list_tracks(&video_id).await;
    assert!(matches!(result, Err(TranscriptError::RequestBlocked)));
}

#[tokio::test]
async fn player_http_error_is_api_request_failed() {
    let server = MockServer::start().await;
    mount_watch_page(&server).await;
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/player"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let video_id = resolve_video_id(VIDEO_ID).unwrap();
    let result = client(&server).list_tracks(&video_id).await;
    assert!(matches!(result, Err(TranscriptError::ApiRequestFailed(_))));
}

#[tokio::test]
async fn bot_check_playability_is_request_blocked() {
    let server = MockServer::start().await;
    mount_watch_page(&server).await;
    mount_player(
        &server,
        json!({"playabilityStatus": {
            "status": "LOGIN_REQUIRED",
            "reason": "Sign in to confirm you're not a bot"
        }}),
    )
    .await;

    let video_id = resolve_video_id(VIDEO_ID).unwrap();
    let result = client(&server).list_tracks(&video_id).await;
    assert!(matches!(result, Err(TranscriptError::RequestBlocked)));
}

#[tokio::test]
async fn missing_captions_is_captions_disabled() {
    let server = MockServer::start().await;
    mount_watch_page(&server).await;
    mount_player(&server, json!({"playabilityStatus": {"status": "OK"}})).await;

    let video_id = resolve_video_id(VIDEO_ID).unwrap();
    let result = client(&server).list_tracks(&video_id).await;
    assert!(matches!(result, Err(TranscriptError::CaptionsDisabled)));
}

#[tokio::test]
async fn timed_text_http_error_is_transcript_fetch_failed() {
    let server = MockServer::start().await;
    mount_watch_page(&server).await;
    mount_player(&server, tracks_body(&server)).await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let pipeline = TranscriptPipeline::new(client(&server));
    let result = pipeline
        .fetch_transcript(VIDEO_ID, &["de"], &SelectionRequest::default())
        .await;
    assert!(matches!(result, Err(TranscriptError::TranscriptFetchFailed(_))));
}
