#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use warp::http::{Response, StatusCode};
use warp::Filter;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub body: serde_json::Value,
}

pub struct MockTts {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: mpsc::Sender<()>,
}

impl MockTts {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown.send(()).await;
    }
}

/// Serve `body` with `status` for every POST, recording what was sent.
pub async fn spawn_mock_tts(status: u16, body: &str) -> MockTts {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();
    let body = body.to_string();
    let status = StatusCode::from_u16(status).unwrap();

    let route = warp::post()
        .and(warp::path::full())
        .and(warp::header::optional::<String>("x-goog-api-key"))
        .and(warp::body::json())
        .map(
            move |path: warp::path::FullPath, api_key: Option<String>, json: serde_json::Value| {
                recorded.lock().unwrap().push(RecordedRequest {
                    path: path.as_str().to_string(),
                    api_key,
                    body: json,
                });
                Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .header("x-request-id", "mock-1")
                    .body(body.clone())
                    .unwrap()
            },
        );

    let (addr, server) =
        warp::serve(route).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async move {
            shutdown_rx.recv().await;
        });
    tokio::spawn(server);

    MockTts {
        base_url: format!("http://{}/v1beta", addr),
        requests,
        shutdown: shutdown_tx,
    }
}

pub fn audio_response(base64_data: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{
                    "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": base64_data }
                }]
            },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}
