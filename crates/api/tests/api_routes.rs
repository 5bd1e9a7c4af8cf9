//! End-to-end route tests over a real temp database

mod support;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use glasline_api::router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use support::{test_context, GATE_PASSWORD};

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request handled");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body read");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request built")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request built")
}

#[tokio::test(flavor = "multi_thread")]
async fn health_is_ok() {
    let (ctx, _dir) = test_context();

    let (status, body) = send(router(ctx), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn availability_known_address() {
    let (ctx, _dir) = test_context();

    let (status, body) = send(
        router(ctx),
        post(
            "/api/availability",
            json!({
                "street": "Gartenweg",
                "house_number": "12",
                "postal_code": "10115",
                "city": "Berlin"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
    assert_eq!(body["building_id"], "B1");
    assert_eq!(body["tariffs"].as_array().map(Vec::len), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn availability_unknown_address_is_negative_not_error() {
    let (ctx, _dir) = test_context();

    let (status, body) = send(
        router(ctx),
        post(
            "/api/availability",
            json!({
                "street": "Nirgendwo",
                "house_number": "1",
                "postal_code": "99999",
                "city": "Berlin"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);
    assert!(body["tariffs"].as_array().is_some_and(Vec::is_empty));
}

#[tokio::test(flavor = "multi_thread")]
async fn tariffs_are_listed() {
    let (ctx, _dir) = test_context();

    let (status, body) = send(router(ctx), get("/api/tariffs")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["slug"], "einfach-100");
}

#[tokio::test(flavor = "multi_thread")]
async fn quote_applies_the_seeded_promotion() {
    let (ctx, _dir) = test_context();

    let (status, body) = send(
        router(ctx),
        post(
            "/api/quote",
            json!({
                "tariff_slug": "einfach-100",
                "building_id": "B1",
                "router_slug": "fritzbox-7590"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // 4.99 router minus the 3.00 global promotion
    assert_eq!(body["router_discount"], "3.00");
    assert_eq!(body["router_price"], "1.99");
    assert_eq!(body["applied_promotions"][0], "Routeraktion");
}

#[tokio::test(flavor = "multi_thread")]
async fn quote_for_unknown_tariff_is_404() {
    let (ctx, _dir) = test_context();

    let (status, _body) = send(
        router(ctx),
        post("/api/quote", json!({ "tariff_slug": "einfach-9000" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_promo_code_reports_unknown() {
    let (ctx, _dir) = test_context();

    let (status, body) =
        send(router(ctx), post("/api/promo-code", json!({ "code": "NOPE" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unknown");
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_is_rejected() {
    let (ctx, _dir) = test_context();

    let (status, _body) =
        send(router(ctx), post("/api/session", json!({ "password": "wrong" }))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn order_flow_end_to_end() {
    let (ctx, _dir) = test_context();

    // Unlock the order flow
    let (status, body) = send(
        router(ctx.clone()),
        post("/api/session", json!({ "password": GATE_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token issued").to_string();

    let submission = json!({
        "tariff_slug": "einfach-100",
        "building_id": "B1",
        "router_slug": "fritzbox-7590",
        "customer": {
            "first_name": "Anna",
            "last_name": "Schmidt",
            "email": "anna.schmidt@example.de",
            "phone": "+49 30 1234567",
            "street": "Gartenweg",
            "house_number": "12",
            "postal_code": "10115",
            "city": "Berlin",
            "customer_number": null
        },
        "accepted_terms": true,
        "accepted_privacy": true
    });

    // Without a token the submission is rejected
    let (status, _body) =
        send(router(ctx.clone()), post("/api/orders", submission.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // With the token it lands in the database
    let request = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(submission.to_string()))
        .expect("request built");
    let (status, body) = send(router(ctx.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    let order_id = body["order_id"].as_str().expect("order id returned");
    let stored = ctx
        .orders
        .find(order_id.parse().expect("valid uuid"))
        .await
        .expect("lookup succeeded");
    assert!(stored.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn order_without_consents_is_rejected() {
    let (ctx, _dir) = test_context();

    let (status, body) = send(
        router(ctx.clone()),
        post("/api/session", json!({ "password": GATE_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token issued").to_string();

    let submission = json!({
        "tariff_slug": "einfach-100",
        "customer": {
            "first_name": "Anna",
            "last_name": "Schmidt",
            "email": "anna.schmidt@example.de",
            "phone": "+49 30 1234567",
            "street": "Gartenweg",
            "house_number": "12",
            "postal_code": "10115",
            "city": "Berlin",
            "customer_number": null
        },
        "accepted_terms": false,
        "accepted_privacy": true
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(submission.to_string()))
        .expect("request built");
    let (status, _body) = send(router(ctx), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
