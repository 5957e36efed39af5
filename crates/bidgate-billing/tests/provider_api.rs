//! Billing client against an in-process mock of the provider API.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use bidgate_billing::{BillingError, CheckoutParams, NewCustomer, StripeClient};
use bidgate_core::enums::SubscriptionStatus;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<(String, String, Option<String>)>>>);

impl Seen {
    fn push(&self, uri: &Uri, body: String, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.0.lock().unwrap().push((uri.to_string(), body, auth));
    }

    fn all(&self) -> Vec<(String, String, Option<String>)> {
        self.0.lock().unwrap().clone()
    }
}

async fn customers(State(seen): State<Seen>, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    seen.push(&uri, body, &headers);
    Json(json!({"id": "cus_new", "object": "customer"}))
}

async fn checkout(State(seen): State<Seen>, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    seen.push(&uri, body, &headers);
    Json(json!({"id": "cs_1", "url": "https://checkout.test/cs_1"}))
}

async fn portal(
    State(seen): State<Seen>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    seen.push(&uri, body.clone(), &headers);
    if body.contains("cus_missing") {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"message": "No such customer: 'cus_missing'"}})),
        ));
    }
    Ok(Json(json!({"url": "https://portal.test/session"})))
}

async fn subscriptions(State(seen): State<Seen>, uri: Uri, headers: HeaderMap) -> Json<Value> {
    seen.push(&uri, String::new(), &headers);
    if uri.query().unwrap_or_default().contains("cus_none") {
        Json(json!({"data": []}))
    } else {
        Json(json!({"data": [{"id": "sub_1", "status": "trialing"}]}))
    }
}

async fn spawn_mock(seen: Seen) -> (SocketAddr, oneshot::Sender<()>) {
    let app = Router::new()
        .route("/v1/customers", post(customers))
        .route("/v1/checkout/sessions", post(checkout))
        .route("/v1/billing_portal/sessions", post(portal))
        .route("/v1/subscriptions", get(subscriptions))
        .with_state(seen);
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

fn client(addr: SocketAddr) -> StripeClient {
    StripeClient::new(&format!("http://{addr}"), "sk_test_1", Duration::from_secs(5))
        .expect("client builds")
}

#[tokio::test]
async fn customer_then_checkout() {
    let seen = Seen::default();
    let (addr, _shutdown) = spawn_mock(seen.clone()).await;
    let stripe = client(addr);

    let customer_id = stripe
        .create_customer(&NewCustomer {
            email: "bids@acme.test",
            name: Some("Ada"),
            user_id: "user_1",
            company_name: Some("Acme & Co."),
        })
        .await
        .unwrap();
    assert_eq!(customer_id, "cus_new");

    let url = stripe
        .create_checkout_session(&CheckoutParams {
            customer_id: &customer_id,
            price_id: "price_1",
            trial_days: 14,
            user_id: "user_1",
            success_url: "https://app.test/ok",
            cancel_url: "https://app.test/cancel",
        })
        .await
        .unwrap();
    assert_eq!(url, "https://checkout.test/cs_1");

    let calls = seen.all();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].2.as_deref(), Some("Bearer sk_test_1"));
    assert!(calls[0].1.contains("email=bids%40acme.test"));
    assert!(calls[0].1.contains("metadata%5BuserId%5D=user_1"));
    assert!(calls[0].1.contains("metadata%5BcompanyName%5D=Acme%20%26%20Co."));
    assert!(calls[1].1.contains("customer=cus_new"));
    assert!(calls[1].1.contains("subscription_data%5Btrial_period_days%5D=14"));
}

#[tokio::test]
async fn portal_error_uses_provider_message() {
    let (addr, _shutdown) = spawn_mock(Seen::default()).await;
    let stripe = client(addr);

    let url = stripe
        .create_portal_session("cus_1", "https://app.test/account")
        .await
        .unwrap();
    assert_eq!(url, "https://portal.test/session");

    let err = stripe
        .create_portal_session("cus_missing", "https://app.test/account")
        .await
        .unwrap_err();
    match err {
        BillingError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "No such customer: 'cus_missing'");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn subscription_status_is_fetched_live() {
    let seen = Seen::default();
    let (addr, _shutdown) = spawn_mock(seen.clone()).await;
    let stripe = client(addr);

    assert_eq!(
        stripe.latest_subscription_status("cus_1").await.unwrap(),
        Some(SubscriptionStatus::Trialing)
    );
    assert_eq!(stripe.latest_subscription_status("cus_none").await.unwrap(), None);
    assert_eq!(
        seen.all()[0].0,
        "/v1/subscriptions?customer=cus_1&status=all&limit=1"
    );
}
