//! HTTP surface tests for the simulator service

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use erp_sim::{AppState, Config, api};
use shared::models::{InventorySnapshot, PurchaseOrder};
use tower::ServiceExt;

fn test_router() -> Router {
    let config = Config {
        backfill_days: 90,
        seed: Some(1234),
        ..Config::default()
    };
    let state = AppState::initialize(&config).expect("state init");
    api::create_router(state)
}

async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_reports_backfilled_state() {
    let app = test_router();
    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let health: serde_json::Value = body_json(resp).await;
    assert_eq!(health["status"], "ok");
    assert!(health["snapshots"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn order_feed_respects_since_and_limit() {
    let app = test_router();

    let resp = app
        .clone()
        .oneshot(Request::get("/api/orders").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let all: Vec<PurchaseOrder> = body_json(resp).await;
    assert!(!all.is_empty(), "90-day backfill produced no orders");

    let mid = all[all.len() / 2].created_at;
    let resp = app
        .clone()
        .oneshot(
            Request::get(format!("/api/orders?since={mid}&limit=2"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let filtered: Vec<PurchaseOrder> = body_json(resp).await;
    assert!(filtered.len() <= 2);
    for order in &filtered {
        assert!(order.created_at > mid);
    }
}

#[tokio::test]
async fn snapshot_feed_is_incremental() {
    let app = test_router();

    let resp = app
        .clone()
        .oneshot(Request::get("/api/inventory?limit=10").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let first: Vec<InventorySnapshot> = body_json(resp).await;
    assert_eq!(first.len(), 10);

    let watermark = first.last().unwrap().as_of;
    let resp = app
        .oneshot(
            Request::get(format!("/api/inventory?since={watermark}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let rest: Vec<InventorySnapshot> = body_json(resp).await;
    for snap in &rest {
        assert!(snap.as_of > watermark);
    }
}

#[tokio::test]
async fn subscriber_registration_validates_urls() {
    let app = test_router();

    let resp = app
        .clone()
        .oneshot(
            Request::post("/api/subscribers")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"url":"http://127.0.0.1:9/hook"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ack: serde_json::Value = body_json(resp).await;
    assert_eq!(ack["subscriber_count"], 1);

    let resp = app
        .oneshot(
            Request::post("/api/subscribers")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"url":"ftp://nope"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
