//! End-to-end runs against the SeaORM backend on in-memory SQLite.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;

use crate::support::{TestApp, UploadFile, routes};

#[tokio::test]
async fn ping_reports_connected() {
    let app = TestApp::spawn_sqlite().await;

    let res = app.get(routes::PING).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.message(), "Connected");
}

#[tokio::test]
async fn sprite_lifecycle() {
    let app = TestApp::spawn_sqlite().await;

    let res = app
        .upload(
            routes::UPLOAD_SPRITES,
            &[
                UploadFile::new("cat.png", b"\x89PNG-cat", "image/png"),
                UploadFile::new("dog.png", b"\x89PNG-dog", "image/png"),
            ],
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    let ids = res.ids();
    assert_eq!(ids.len(), 2);

    let listed = app.get(routes::SPRITES).await;
    let records = listed.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["_id"], json!(ids[0]));
    assert_eq!(records[0]["name"], "cat.png");
    assert_eq!(records[0]["content_type"], "image/png");
    let content = records[0]["content"].as_str().unwrap();
    assert_eq!(STANDARD.decode(content).unwrap(), b"\x89PNG-cat");

    let res = app
        .put_json(&routes::sprite(&ids[0]), &json!({"name": "kitten.png", "frames": 4}))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);

    let res = app.delete(&routes::sprite(&ids[1])).await;
    assert_eq!(res.status, 200);

    let listed = app.get(routes::SPRITES).await;
    let records = listed.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "kitten.png");
    assert_eq!(records[0]["frames"], 4);
    assert_eq!(records[0]["content"], json!(content));
}

#[tokio::test]
async fn collections_are_isolated() {
    let app = TestApp::spawn_sqlite().await;

    let audio_id = app
        .upload_one(
            routes::UPLOAD_AUDIOS,
            UploadFile::new("meow.ogg", b"OggS", "audio/ogg"),
        )
        .await;

    assert_eq!(app.get(routes::AUDIOS).await.records().len(), 1);
    assert!(app.get(routes::SPRITES).await.records().is_empty());

    // Deleting through the wrong collection leaves the record in place.
    let res = app.delete(&routes::sprite(&audio_id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(app.get(routes::AUDIOS).await.records().len(), 1);
}

#[tokio::test]
async fn score_batch_keeps_order_and_updates_merge() {
    let app = TestApp::spawn_sqlite().await;

    let ids = app
        .submit_scores(&json!([
            {"player_name": "Tom", "score": 3},
            {"player_name": "Luna", "score": 1},
            {"player_name": "Mochi", "score": 2},
        ]))
        .await;
    assert_eq!(ids.len(), 3);

    let listed = app.get(routes::SCORES).await;
    let names: Vec<_> = listed
        .records()
        .iter()
        .map(|r| r["player_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Tom", "Luna", "Mochi"]);

    let res = app
        .put_json(&routes::score(&ids[1]), &json!({"score": 10}))
        .await;
    assert_eq!(res.status, 200);

    let res = app
        .put_json(&routes::score(&ids[1]), &json!({"player_name": "$x"}))
        .await;
    assert_eq!(res.status, 400);

    let listed = app.get(routes::SCORES).await;
    let luna = &listed.records()[1];
    assert_eq!(luna["player_name"], "Luna");
    assert_eq!(luna["score"], 10);
}

#[tokio::test]
async fn unknown_ids_are_noops() {
    let app = TestApp::spawn_sqlite().await;
    app.submit_scores(&json!([{"player_name": "Tom", "score": 1}]))
        .await;
    let missing = common::DocumentId::generate().to_string();

    let res = app
        .put_json(&routes::score(&missing), &json!({"score": 5}))
        .await;
    assert_eq!(res.status, 200);
    let res = app.delete(&routes::score(&missing)).await;
    assert_eq!(res.status, 200);

    let listed = app.get(routes::SCORES).await;
    assert_eq!(listed.records().len(), 1);
    assert_eq!(listed.records()[0]["score"], 1);
}
