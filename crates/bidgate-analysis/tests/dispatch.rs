//! Dispatcher against an in-process mock workflow webhook.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use bidgate_analysis::{AnalysisError, AnalysisPayload, Dispatcher, Upload};
use bidgate_core::enums::EvidenceCategory;
use bidgate_core::evidence::CategoryCount;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

type Received = Arc<Mutex<Vec<Value>>>;

async fn analyse(State(received): State<Received>, Json(body): Json<Value>) -> Json<Value> {
    received.lock().unwrap().push(body);
    Json(json!([{"success": true, "analysis": {"fit": "strong"}}]))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "workflow crashed")
}

async fn spawn_mock(received: Received) -> (SocketAddr, oneshot::Sender<()>) {
    let app = Router::new()
        .route("/webhook/analyse", post(analyse))
        .route("/webhook/broken", post(broken))
        .with_state(received);
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("local_addr should succeed");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });
    (addr, shutdown_tx)
}

fn payload(file_name: &str, bytes: &[u8]) -> AnalysisPayload {
    AnalysisPayload::build(
        &Upload { file_name, bytes },
        "c1",
        "Library refit",
        vec![CategoryCount {
            category: EvidenceCategory::CaseStudy,
            count: 2,
        }],
        50_000,
    )
    .unwrap()
}

#[tokio::test]
async fn oversized_text_is_forwarded_truncated() {
    let received = Received::default();
    let (addr, _shutdown) = spawn_mock(received.clone()).await;
    let dispatcher =
        Dispatcher::new(&format!("http://{addr}/webhook/analyse"), Duration::from_secs(5)).unwrap();

    let body = "x".repeat(50_123);
    let outcome = dispatcher
        .dispatch(&payload("questions.txt", body.as_bytes()))
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.analysis, json!({"fit": "strong"}));

    let sent = received.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["text"].as_str().map(str::len), Some(50_000));
    assert!(sent[0].get("file_base64").is_none());
    assert_eq!(sent[0]["text_truncated"], true);
    assert_eq!(
        sent[0]["evidence_counts"],
        json!([{"category": "Case Study", "count": 2}])
    );
    assert_eq!(sent[0]["total_evidence"], 2);
}

#[tokio::test]
async fn workflow_failure_surfaces_status_and_body() {
    let (addr, _shutdown) = spawn_mock(Received::default()).await;
    let dispatcher =
        Dispatcher::new(&format!("http://{addr}/webhook/broken"), Duration::from_secs(5)).unwrap();

    let err = dispatcher
        .dispatch(&payload("tender.pdf", b"%PDF"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AnalysisError::Api { status: 502, ref message } if message == "workflow crashed")
    );
}
