//! In-process stand-in for the MixQ server.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use mixq::clients::LocalStorage;
use mixq::{ConfigBuilder, Controller};
use serde_json::{Value, json};

#[derive(Default)]
pub struct MockPlayer {
    pub playlists: HashMap<String, Value>,
    /// Body of `details` returned by `/current_track`, omitted while null.
    pub current: Value,
    pub played: Vec<String>,
    pub actions: Vec<String>,
    pub playlist_requests: Vec<String>,
    /// Answer `/play_specific` with `success: false` and this error.
    pub reject_play: Option<String>,
    /// Answer every request with this status.
    pub fail_status: Option<u16>,
}

pub type SharedPlayer = Arc<Mutex<MockPlayer>>;

pub fn track(id: &str, name: &str, duration: u64) -> Value {
    json!({
        "id": id,
        "name": name,
        "artist": "The Testers",
        "album": "Fixtures",
        "duration": duration,
    })
}

pub fn status(state: &str, id: &str, remaining: f64) -> Value {
    json!({
        "state": state,
        "id": id,
        "name": format!("Song {id}"),
        "artist": "The Testers",
        "album": "Fixtures",
        "duration": 200,
        "elapsed": 200.0 - remaining,
        "remaining": remaining,
    })
}

fn failure(player: &MockPlayer) -> Option<(StatusCode, Json<Value>)> {
    player.fail_status.map(|code| {
        (
            StatusCode::from_u16(code).unwrap(),
            Json(json!({"success": false, "error": "player unavailable"})),
        )
    })
}

async fn load_playlist(
    State(player): State<SharedPlayer>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut player = player.lock().unwrap();
    if let Some(failed) = failure(&player) {
        return failed;
    }
    let Some(name) = body.get("playlist").and_then(Value::as_str) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Missing playlist name"})),
        );
    };
    player.playlist_requests.push(name.to_string());
    let queue = player.playlists.get(name).cloned().unwrap_or(json!([]));
    (StatusCode::OK, Json(json!({ "queue": queue })))
}

async fn control(
    State(player): State<SharedPlayer>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut player = player.lock().unwrap();
    if let Some(failed) = failure(&player) {
        return failed;
    }
    let action = body["action"].as_str().unwrap_or_default().to_string();
    player.actions.push(action);
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn play_specific(
    State(player): State<SharedPlayer>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut player = player.lock().unwrap();
    if let Some(failed) = failure(&player) {
        return failed;
    }
    if let Some(reason) = player.reject_play.clone() {
        return (StatusCode::OK, Json(json!({"success": false, "error": reason})));
    }
    let id = body["track_id"].as_str().unwrap_or_default().to_string();
    player.current = status("playing", &id, 200.0);
    player.played.push(id);
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn current_track(State(player): State<SharedPlayer>) -> (StatusCode, Json<Value>) {
    let player = player.lock().unwrap();
    if let Some(failed) = failure(&player) {
        return failed;
    }
    if player.current.is_null() {
        return (StatusCode::OK, Json(json!({})));
    }
    (StatusCode::OK, Json(json!({ "details": player.current.clone() })))
}

/// Serve `player` on an ephemeral port, returning its base URL.
pub async fn spawn(player: MockPlayer) -> (String, SharedPlayer) {
    let shared = Arc::new(Mutex::new(player));
    let app = Router::new()
        .route("/load_playlist", post(load_playlist))
        .route("/control", post(control))
        .route("/play_specific", post(play_specific))
        .route("/current_track", get(current_track))
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), shared)
}

pub async fn storage() -> Arc<LocalStorage> {
    Arc::new(LocalStorage::in_memory().await.unwrap())
}

pub async fn controller(base_url: &str, storage: Arc<LocalStorage>) -> Controller {
    let config = ConfigBuilder::new()
        .server_url(Some(base_url.to_string()))
        .storage(storage)
        .build()
        .await
        .unwrap();
    Controller::restore(config).await.unwrap()
}

/// Controller whose queue holds `ids`, in order.
pub async fn controller_with_queue(
    ids: &[&str],
    mut player: MockPlayer,
) -> (Controller, SharedPlayer, Arc<LocalStorage>) {
    let tracks: Vec<Value> = ids.iter().map(|id| track(id, &format!("Song {id}"), 200)).collect();
    player.playlists.insert("fixture".to_string(), Value::Array(tracks));
    let (url, shared) = spawn(player).await;
    let storage = storage().await;
    let mut controller = controller(&url, storage.clone()).await;
    controller.load_playlist("fixture").await.unwrap();
    (controller, shared, storage)
}

pub fn queue_ids(controller: &Controller) -> Vec<String> {
    controller
        .queue()
        .tracks()
        .iter()
        .map(|t| t.id.clone())
        .collect()
}
