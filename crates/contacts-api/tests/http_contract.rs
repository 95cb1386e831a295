//! Contract Test: REST API
//!
//! Builds the real router over each store backend (memory and SQLite) and
//! drives it with `tower::ServiceExt::oneshot`.
//!
//! Constraints verified:
//! - Status codes are exactly 200, 201 and 400
//! - Error bodies are `{"error": message}` with the store message verbatim
//! - Update responds with the re-fetched record
//! - Delete of a missing id still succeeds

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use contacts_core::config::ServerConfig;
use contacts_core::{ContactStore, MemoryContactStore, SqliteContactStore};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

/// The router over every store backend, labelled for assertion messages
async fn all_routers() -> Vec<(&'static str, Router, Arc<dyn ContactStore>)> {
    let stores: Vec<(&'static str, Arc<dyn ContactStore>)> = vec![
        ("memory", Arc::new(MemoryContactStore::new())),
        (
            "sqlite",
            Arc::new(SqliteContactStore::in_memory().await.expect("in-memory sqlite opens")),
        ),
    ];

    stores
        .into_iter()
        .map(|(name, store)| {
            let router = contacts_api::router(store.clone(), &ServerConfig::default());
            (name, router, store)
        })
        .collect()
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn ada() -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "phone": "555-0100",
        "email": "ada@example.com",
        "address": "12 St James's Square, London"
    })
}

#[tokio::test]
async fn post_returns_201_with_assigned_fields() {
    for (name, router, _) in all_routers().await {
        let (status, body) = send(&router, Method::POST, "/api/contacts", Some(ada())).await;

        assert_eq!(status, StatusCode::CREATED, "[{name}]");
        assert!(body["contact_id"].as_i64().unwrap() > 0, "[{name}]");
        assert!(body["created_at"].is_string(), "[{name}]");
        assert_eq!(body["first_name"], "Ada", "[{name}]");
        assert_eq!(body["email"], "ada@example.com", "[{name}]");
    }
}

#[tokio::test]
async fn post_duplicate_phone_returns_400_with_store_message() {
    for (name, router, store) in all_routers().await {
        send(&router, Method::POST, "/api/contacts", Some(ada())).await;

        let duplicate = json!({"first_name": "Augusta", "phone": "555-0100"});
        let (status, body) = send(&router, Method::POST, "/api/contacts", Some(duplicate)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "[{name}]");
        assert_eq!(
            body,
            json!({"error": "UNIQUE constraint failed: contacts.phone"}),
            "[{name}]"
        );
        assert_eq!(store.count().await.unwrap(), 1, "[{name}]");
    }
}

#[tokio::test]
async fn post_overlong_name_returns_400_with_check_message() {
    for (name, router, store) in all_routers().await {
        let body = json!({"first_name": "A".repeat(51), "phone": "555-0100"});
        let (status, body) = send(&router, Method::POST, "/api/contacts", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "[{name}]");
        assert_eq!(
            body["error"], "CHECK constraint failed: first_name_length",
            "[{name}]"
        );
        assert_eq!(store.count().await.unwrap(), 0, "[{name}]");
    }
}

#[tokio::test]
async fn post_missing_phone_returns_400() {
    for (name, router, _) in all_routers().await {
        let (status, body) = send(
            &router,
            Method::POST,
            "/api/contacts",
            Some(json!({"first_name": "Ada"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "[{name}]");
        assert_eq!(body["error"], "NOT NULL constraint failed: contacts.phone", "[{name}]");
    }
}

#[tokio::test]
async fn post_malformed_json_returns_400_error_body() {
    for (name, router, _) in all_routers().await {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/contacts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "[{name}]");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string(), "[{name}]");
    }
}

#[tokio::test]
async fn get_lists_newest_first_and_filters_by_q() {
    for (name, router, _) in all_routers().await {
        for (first, phone) in [("Ada", "555-0100"), ("Charles", "555-0101"), ("Grace", "555-0102")] {
            send(
                &router,
                Method::POST,
                "/api/contacts",
                Some(json!({"first_name": first, "phone": phone})),
            )
            .await;
        }

        let (status, body) = send(&router, Method::GET, "/api/contacts", None).await;
        assert_eq!(status, StatusCode::OK, "[{name}]");
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["first_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Grace", "Charles", "Ada"], "[{name}]");

        let (status, body) = send(&router, Method::GET, "/api/contacts?q=CHAR", None).await;
        assert_eq!(status, StatusCode::OK, "[{name}]");
        assert_eq!(body.as_array().unwrap().len(), 1, "[{name}]");
        assert_eq!(body[0]["first_name"], "Charles", "[{name}]");
    }
}

#[tokio::test]
async fn get_with_encoded_query_matches_spaces() {
    for (name, router, _) in all_routers().await {
        send(&router, Method::POST, "/api/contacts", Some(ada())).await;

        let (_, body) = send(&router, Method::GET, "/api/contacts?q=james%27s%20square", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1, "[{name}]");
    }
}

#[tokio::test]
async fn get_with_non_ascii_query_folds_case() {
    for (name, router, _) in all_routers().await {
        send(
            &router,
            Method::POST,
            "/api/contacts",
            Some(json!({"first_name": "Émile", "phone": "555-0100"})),
        )
        .await;

        // "émile", percent-encoded
        let (_, body) = send(&router, Method::GET, "/api/contacts?q=%C3%A9mile", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1, "[{name}]");
    }
}

#[tokio::test]
async fn put_returns_refetched_record() {
    for (name, router, _) in all_routers().await {
        let (_, created) = send(&router, Method::POST, "/api/contacts", Some(ada())).await;
        let id = created["contact_id"].as_i64().unwrap();

        let mut edited = ada();
        edited["address"] = json!("Ockham Park, Surrey");
        let (status, body) =
            send(&router, Method::PUT, &format!("/api/contacts/{id}"), Some(edited)).await;

        assert_eq!(status, StatusCode::OK, "[{name}]");
        assert_eq!(body["contact_id"], id, "[{name}]");
        assert_eq!(body["address"], "Ockham Park, Surrey", "[{name}]");
        assert_eq!(body["phone"], "555-0100", "[{name}]");
        assert_eq!(body["created_at"], created["created_at"], "[{name}]");
    }
}

#[tokio::test]
async fn put_duplicate_email_returns_400() {
    for (name, router, _) in all_routers().await {
        send(&router, Method::POST, "/api/contacts", Some(ada())).await;
        let (_, grace) = send(
            &router,
            Method::POST,
            "/api/contacts",
            Some(json!({"first_name": "Grace", "phone": "555-0102"})),
        )
        .await;
        let id = grace["contact_id"].as_i64().unwrap();

        let (status, body) = send(
            &router,
            Method::PUT,
            &format!("/api/contacts/{id}"),
            Some(json!({"first_name": "Grace", "phone": "555-0102", "email": "ada@example.com"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "[{name}]");
        assert_eq!(body["error"], "UNIQUE constraint failed: contacts.email", "[{name}]");
    }
}

#[tokio::test]
async fn put_unknown_id_is_200_null() {
    for (name, router, store) in all_routers().await {
        let (status, body) = send(&router, Method::PUT, "/api/contacts/77", Some(ada())).await;

        assert_eq!(status, StatusCode::OK, "[{name}]");
        assert_eq!(body, Value::Null, "[{name}]");
        assert_eq!(store.count().await.unwrap(), 0, "[{name}]");
    }
}

#[tokio::test]
async fn delete_returns_success_even_for_missing_id() {
    for (name, router, _) in all_routers().await {
        let (_, created) = send(&router, Method::POST, "/api/contacts", Some(ada())).await;
        let id = created["contact_id"].as_i64().unwrap();

        let (status, body) =
            send(&router, Method::DELETE, &format!("/api/contacts/{id}"), None).await;
        assert_eq!(status, StatusCode::OK, "[{name}]");
        assert_eq!(body, json!({"success": true}), "[{name}]");

        let (_, listed) = send(&router, Method::GET, "/api/contacts", None).await;
        assert!(listed.as_array().unwrap().is_empty(), "[{name}]");

        let (status, body) =
            send(&router, Method::DELETE, &format!("/api/contacts/{id}"), None).await;
        assert_eq!(status, StatusCode::OK, "[{name}]");
        assert_eq!(body, json!({"success": true}), "[{name}]");
    }
}

#[tokio::test]
async fn non_numeric_id_returns_400_error_body() {
    for (name, router, _) in all_routers().await {
        let (status, body) = send(&router, Method::DELETE, "/api/contacts/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "[{name}]");
        assert!(body["error"].is_string(), "[{name}]");
    }
}

#[tokio::test]
async fn cors_preflight_is_open() {
    for (name, router, _) in all_routers().await {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/contacts")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert!(response.status().is_success(), "[{name}]");
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*",
            "[{name}]"
        );
    }
}
