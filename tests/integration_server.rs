//! HTTP surface tests: the generation endpoint, the form page and routing

use base64::Engine as _;
use newsreel::extract::StaticFetcher;
use newsreel::server::{self, ServerConfig, ServerHandle, GENERATE_PATH};
use newsreel::{VideoConfig, VideoGenerator};
use serde_json::Value;

const STORY: &str = "https://news.test/story";

fn start_server() -> ServerHandle {
    let fetcher = StaticFetcher::new().with_page(
        STORY,
        "<h1>Comet spotted</h1><article><p>Astronomers in Chile photographed a bright new comet last night.</p>\
         <p>It should be visible to the naked eye by the end of the month.</p></article>",
    );
    let generator = VideoGenerator::new(fetcher, VideoConfig::default());
    let config = ServerConfig {
        addr: "127.0.0.1:0".into(),
        workers: 2,
        ..Default::default()
    };
    server::spawn(config, generator).expect("server should start")
}

fn post(server: &ServerHandle, body: &str) -> (u16, Value) {
    let client = reqwest::blocking::Client::new();
    let resp = client
        .post(format!("{}{}", server.url(), GENERATE_PATH))
        .header("Content-Type", "application/json")
        .body(body.to_string())
        .send()
        .expect("request should complete");
    let status = resp.status().as_u16();
    let json: Value = resp.json().expect("body should be JSON");
    (status, json)
}

fn decode_video(json: &Value) -> String {
    let uri = json["videoData"].as_str().expect("videoData field");
    let payload = uri
        .strip_prefix("data:text/html;base64,")
        .expect("data URI prefix");
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .expect("valid base64");
    String::from_utf8(bytes).expect("utf-8 html")
}

#[test]
fn missing_input_returns_400() {
    let server = start_server();
    let (status, json) = post(&server, "{}");
    assert_eq!(status, 400);
    assert_eq!(json["error"], "Please provide either newsUrl or customText");
    server.shutdown();
}

#[test]
fn custom_text_returns_playable_document() {
    let server = start_server();
    let (status, json) = post(&server, r#"{"customText":"Breaking news."}"#);
    assert_eq!(status, 200);
    assert!(json["videoData"]
        .as_str()
        .unwrap()
        .starts_with("data:text/html;base64,"));

    let html = decode_video(&json);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(html.matches(r#"class="frame frame-"#).count(), 1);
    server.shutdown();
}

#[test]
fn news_url_is_extracted_into_frames() {
    let server = start_server();
    let (status, json) = post(&server, &format!(r#"{{"newsUrl":"{}"}}"#, STORY));
    assert_eq!(status, 200);

    let html = decode_video(&json);
    assert_eq!(html.matches(r#"class="frame frame-"#).count(), 3);
    assert!(html.contains("Comet spotted."));
    server.shutdown();
}

#[test]
fn failed_extraction_returns_500() {
    let server = start_server();
    let (status, json) = post(&server, r#"{"newsUrl":"https://news.test/nowhere"}"#);
    assert_eq!(status, 500);
    assert_eq!(
        json["error"],
        "Failed to fetch news content: Request failed with status code 404"
    );
    server.shutdown();
}

#[test]
fn serves_form_and_routes() {
    let server = start_server();
    let client = reqwest::blocking::Client::new();

    let form = client.get(server.url()).send().unwrap();
    assert_eq!(form.status().as_u16(), 200);
    let content_type = form
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(form.text().unwrap().contains("News Video Maker"));

    let health = client.get(format!("{}/healthz", server.url())).send().unwrap();
    assert_eq!(health.status().as_u16(), 200);

    let missing = client.get(format!("{}/nope", server.url())).send().unwrap();
    assert_eq!(missing.status().as_u16(), 404);

    let wrong = client
        .get(format!("{}{}", server.url(), GENERATE_PATH))
        .send()
        .unwrap();
    assert_eq!(wrong.status().as_u16(), 405);

    server.shutdown();
}

#[test]
fn oversized_body_is_rejected() {
    let fetcher = StaticFetcher::new();
    let generator = VideoGenerator::new(fetcher, VideoConfig::default());
    let config = ServerConfig {
        addr: "127.0.0.1:0".into(),
        workers: 1,
        max_body_bytes: 64,
    };
    let server = server::spawn(config, generator).unwrap();

    let body = format!(r#"{{"customText":"{}"}}"#, "a".repeat(200));
    let (status, json) = post(&server, &body);
    assert_eq!(status, 413);
    assert!(json["error"].as_str().unwrap().contains("too large"));
    server.shutdown();
}
