#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;

use growth_server::playlist::Playlist;

pub const TEST_PLAYLIST: &str = r#"{
    "chapters": [
        {
            "id": "intro",
            "videos": [
                { "id": "intro-2", "title": "Second", "number": "2",
                  "urls": [{ "type": "video/mp4", "src": "/media/intro-2.mp4" }] },
                { "id": "intro-1", "title": "First", "number": "1",
                  "urls": [
                      { "type": "video/webm", "src": "/media/intro-1.webm" },
                      { "type": "video/mp4", "src": "/media/intro-1.mp4" }
                  ] }
            ]
        },
        {
            "id": "seeker",
            "videos": [{ "id": "seeker-1", "title": "Asking", "number": "1", "urls": [] }]
        }
    ]
}"#;

pub fn create_test_app() -> Router {
    let playlist = Playlist::from_json(TEST_PLAYLIST).expect("test playlist parses");
    growth_server::create_app(playlist)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=UTF-8",
        )
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
