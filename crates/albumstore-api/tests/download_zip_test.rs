//! Album archive integration tests.
//!
//! Run with: `cargo test -p albumstore-api --test download_zip_test`

mod helpers;

use axum::http::StatusCode;
use helpers::fixtures::audio_bytes;
use helpers::{
    default_payments, setup_test_app, setup_test_app_with, PAID_SESSION, UNPAID_SESSION,
};
use serde_json::Value;
use std::io::Read;

#[tokio::test]
async fn test_zip_contains_every_track_in_order() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/api/download-zip")
        .add_query_param("session_id", PAID_SESSION)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("content-type"), "application/zip");
    let disposition = response.header("content-disposition");
    assert!(disposition
        .to_str()
        .unwrap()
        .starts_with("attachment; filename=\"WE BOW - YermiYahu.zip\""));

    let bytes = response.as_bytes().to_vec();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["01 - Intro.mp3", "02 - Second.flac", "10 - Finale.mp3", "Bonus.wav"]
    );

    let expected = [
        ("01 - Intro.mp3", audio_bytes(1, 100)),
        ("02 - Second.flac", audio_bytes(2, 48)),
        ("10 - Finale.mp3", audio_bytes(10, 64)),
        ("Bonus.wav", audio_bytes(99, 32)),
    ];
    for (name, original) in expected {
        let mut extracted = Vec::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_end(&mut extracted)
            .unwrap();
        assert_eq!(extracted, original, "{}", name);
    }
}

#[tokio::test]
async fn test_zip_without_audio_is_not_found() {
    let files = vec![("albums/WE BOW/cover.jpg", b"jpeg".to_vec())];
    let app = setup_test_app_with(default_payments(), files).await;

    let response = app
        .client()
        .get("/api/download-zip")
        .add_query_param("session_id", PAID_SESSION)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "NO_ASSETS_AVAILABLE");
    assert_eq!(app.store.fetch_calls(), 0);
}

#[tokio::test]
async fn test_zip_access_control() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/download-zip").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .client()
        .get("/api/download-zip")
        .add_query_param("session_id", UNPAID_SESSION)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(app.store.list_calls(), 0);
}
