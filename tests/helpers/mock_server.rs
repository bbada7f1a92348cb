// ABOUTME: Local HTTP servers standing in for upstream APIs during tests
// ABOUTME: Serves canned wger pages and endpoints that fail a set number of times

use axum::{
    extract::RawQuery,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral localhost port
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Mock server has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock server failed");
    });
    addr
}

/// Counts requests and keeps their query strings
#[derive(Clone, Default)]
pub struct Recorder {
    hits: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// Record one request, returning its 1-based number
    pub fn record(&self, query: Option<String>) -> usize {
        self.queries
            .lock()
            .expect("recorder lock poisoned")
            .push(query.unwrap_or_default());
        self.hits.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Requests seen so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Query strings seen so far
    #[allow(dead_code)]
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("recorder lock poisoned").clone()
    }
}

/// wger API serving `page` for every `exerciseinfo` request
#[allow(dead_code)]
pub fn wger_api(recorder: Recorder, page: Value) -> Router {
    Router::new().route(
        "/exerciseinfo/",
        get(move |RawQuery(query): RawQuery| {
            let recorder = recorder.clone();
            let page = page.clone();
            async move {
                recorder.record(query);
                Json(page)
            }
        }),
    )
}

/// Endpoint answering `status` for the first `failures` requests, then 200
#[allow(dead_code)]
pub fn flaky_api(recorder: Recorder, failures: usize, status: StatusCode) -> Router {
    Router::new().route(
        "/flaky",
        get(move |RawQuery(query): RawQuery| {
            let recorder = recorder.clone();
            async move {
                if recorder.record(query) <= failures {
                    (status, "try again later")
                } else {
                    (StatusCode::OK, "ok")
                }
            }
        }),
    )
}

/// A wger `exerciseinfo` page with a curl, a squat and an untranslated row
#[allow(dead_code)]
pub fn sample_wger_page() -> Value {
    json!({
        "count": 3,
        "next": null,
        "previous": null,
        "results": [
            {
                "id": 81,
                "uuid": "c7bbcd43",
                "category": {"id": 8, "name": "Arms"},
                "muscles": [{"id": 1, "name": "Biceps brachii", "name_en": "Biceps"}],
                "muscles_secondary": [],
                "equipment": [{"id": 3, "name": "Dumbbell"}],
                "images": [{"id": 5, "image": "https://wger.de/media/curl.png", "is_main": true}],
                "translations": [
                    {"id": 1, "language": 2, "name": "Dumbbell Curl", "description": "<p>Curl.</p>"}
                ]
            },
            {
                "id": 111,
                "uuid": "a2f5b6ef",
                "category": {"id": 9, "name": "Legs"},
                "muscles": [{"id": 10, "name": "Quadriceps femoris", "name_en": "Quads"}],
                "muscles_secondary": [{"id": 8, "name": "Gluteus maximus", "name_en": "Glutes"}],
                "equipment": [{"id": 1, "name": "Barbell"}],
                "images": [],
                "translations": [
                    {"id": 2, "language": 4, "name": "Kniebeuge", "description": ""},
                    {"id": 3, "language": 2, "name": "Barbell Squat", "description": "Squat."}
                ]
            },
            {
                "id": 999,
                "category": {"id": 10, "name": "Abs"},
                "muscles": [],
                "muscles_secondary": [],
                "equipment": [],
                "images": [],
                "translations": []
            }
        ]
    })
}
