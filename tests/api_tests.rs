use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use soulmate_server::database::schema;
use soulmate_server::web::{app, AppState};

const JWT_SECRET: &str = "integration-test-secret";

async fn test_app() -> (Router, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    schema::init(&pool).await.unwrap();
    let state = AppState {
        pool: pool.clone(),
        jwt_secret: JWT_SECRET.to_string(),
        payment_secret: String::new(),
    };
    (app(state), pool)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn token_for(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/jwt",
        None,
        Some(json!({ "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn make_admin(pool: &SqlitePool, email: &str) {
    sqlx::query("UPDATE accounts SET role = 'admin' WHERE email = ?1")
        .bind(email)
        .execute(pool)
        .await
        .unwrap();
}

fn biodata_body(email: &str, age: i64, biodata_type: &str, division: &str) -> Value {
    json!({
        "email": email,
        "name": format!("owner of {email}"),
        "biodata_type": biodata_type,
        "age": age,
        "division": division,
        "occupation": "engineer",
        "mobile": "01700000000",
        "contact_email": format!("private-{email}"),
    })
}

#[tokio::test]
async fn admin_listing_is_gated_by_role_not_just_token() {
    let (app, pool) = test_app().await;

    // Fresh account defaults to member.
    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": "a@x.com", "name": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["inserted_id"].is_i64());

    // Creating again is a no-op.
    let (_, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": "a@x.com" })),
    )
    .await;
    assert_eq!(body["message"], "user already exists");
    assert!(body["inserted_id"].is_null());

    let token = token_for(&app, "a@x.com").await;

    // No token at all: unauthenticated.
    let (status, _) = send(&app, Method::GET, "/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Valid token, member role: forbidden.
    let (status, _) = send(&app, Method::GET, "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Same call after the role change succeeds; no new token needed since
    // the role is re-read from the store per request.
    make_admin(&pool, "a@x.com").await;
    let (status, body) = send(&app, Method::GET, "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["email"], "a@x.com");
    assert_eq!(list[0]["role"], "admin");
}

#[tokio::test]
async fn admin_flag_is_self_only() {
    let (app, pool) = test_app().await;
    send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": "a@x.com" })),
    )
    .await;
    let token = token_for(&app, "a@x.com").await;

    let (status, body) = send(&app, Method::GET, "/users/admin/a@x.com", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"], false);

    // Asking about someone else is forbidden even with a valid token.
    let (status, _) = send(&app, Method::GET, "/users/admin/b@x.com", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    make_admin(&pool, "a@x.com").await;
    let (_, body) = send(&app, Method::GET, "/users/admin/a@x.com", Some(&token), None).await;
    assert_eq!(body["admin"], true);
}

#[tokio::test]
async fn role_update_goes_through_the_admin_guard() {
    let (app, pool) = test_app().await;
    let (_, created) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": "member@x.com" })),
    )
    .await;
    let member_id = created["inserted_id"].as_i64().unwrap();
    send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": "root@x.com" })),
    )
    .await;
    make_admin(&pool, "root@x.com").await;

    let member_token = token_for(&app, "member@x.com").await;
    let admin_token = token_for(&app, "root@x.com").await;
    let uri = format!("/users/{member_id}");

    let (status, _) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&member_token),
        Some(json!({ "role": "premium" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&admin_token),
        Some(json!({ "role": "premium" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, account) = send(&app, Method::GET, "/users/member@x.com", None, None).await;
    assert_eq!(account["role"], "premium");
}

#[tokio::test]
async fn directory_search_filters_and_counts() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/biodatas",
        None,
        Some(biodata_body("b@x.com", 30, "female", "Dhaka")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], true);
    send(
        &app,
        Method::PUT,
        "/biodatas",
        None,
        Some(biodata_body("c@x.com", 50, "male", "Khulna")),
    )
    .await;

    let (_, hit) = send(
        &app,
        Method::GET,
        "/biodatas?minAge=25&maxAge=35&division=Dhaka",
        None,
        None,
    )
    .await;
    assert_eq!(hit["count"], 1);
    assert_eq!(hit["biodatas"][0]["email"], "b@x.com");
    assert_eq!(hit["biodatas"][0]["biodata_id"], 1);

    let (_, miss) = send(
        &app,
        Method::GET,
        "/biodatas?minAge=25&maxAge=35&division=Dhaka&biodataType=male",
        None,
        None,
    )
    .await;
    assert_eq!(miss["count"], 0);

    // Unfiltered search total equals the count endpoint.
    let (_, all) = send(&app, Method::GET, "/biodatas", None, None).await;
    let (_, count) = send(&app, Method::GET, "/biodata-count", None, None).await;
    assert_eq!(all["count"], count["count"]);
    assert_eq!(all["biodatas"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn biodata_details_needs_auth_and_distinguishes_errors() {
    let (app, _pool) = test_app().await;
    send(
        &app,
        Method::PUT,
        "/biodatas",
        None,
        Some(biodata_body("b@x.com", 30, "female", "Dhaka")),
    )
    .await;

    let (status, _) = send(&app, Method::GET, "/biodata-details/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": "viewer@x.com" })),
    )
    .await;
    let token = token_for(&app, "viewer@x.com").await;

    let (status, _) = send(&app, Method::GET, "/biodata-details/oops", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/biodata-details/99", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/biodata-details/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "b@x.com");
}

#[tokio::test]
async fn contact_request_lifecycle_unlocks_and_revokes() {
    let (app, pool) = test_app().await;
    send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": "root@x.com" })),
    )
    .await;
    make_admin(&pool, "root@x.com").await;
    let admin_token = token_for(&app, "root@x.com").await;
    let payer_token = token_for(&app, "c@x.com").await;

    send(
        &app,
        Method::PUT,
        "/biodatas",
        None,
        Some(biodata_body("target@x.com", 27, "female", "Dhaka")),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/payments",
        None,
        Some(json!({ "email": "c@x.com", "amount": 500, "biodata_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let payment_id = body["inserted_id"].as_i64().unwrap();

    // Admin review surface sees the pending request; members do not.
    let (status, _) = send(&app, Method::GET, "/contact-request", Some(&payer_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, pending) = send(&app, Method::GET, "/contact-request", Some(&admin_token), None).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
    assert_eq!(pending[0]["status"], "pending");

    // Pending: the payer's listing carries no contact fields.
    let (_, before) = send(&app, Method::GET, "/payments/c@x.com", Some(&payer_token), None).await;
    assert!(before[0]["mobile"].is_null());

    let uri = format!("/contact-request/{payment_id}");
    let (status, _) = send(&app, Method::PATCH, &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    // Re-approving succeeds silently.
    let (status, _) = send(&app, Method::PATCH, &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = send(&app, Method::GET, "/payments/c@x.com", Some(&payer_token), None).await;
    assert_eq!(after[0]["status"], "approved");
    assert_eq!(after[0]["mobile"], "01700000000");
    assert_eq!(after[0]["contact_email"], "private-target@x.com");

    // Rejection removes the record; the unlock goes with it.
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, gone) = send(&app, Method::GET, "/payments/c@x.com", Some(&payer_token), None).await;
    assert!(gone.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn premium_listing_and_admin_stats() {
    let (app, pool) = test_app().await;
    send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": "root@x.com" })),
    )
    .await;
    make_admin(&pool, "root@x.com").await;
    let admin_token = token_for(&app, "root@x.com").await;

    for (email, age, biodata_type) in [
        ("p1@x.com", 35, "female"),
        ("p2@x.com", 25, "male"),
        ("m@x.com", 20, "male"),
    ] {
        let (_, created) = send(
            &app,
            Method::POST,
            "/users",
            None,
            Some(json!({ "email": email })),
        )
        .await;
        send(
            &app,
            Method::PUT,
            "/biodatas",
            None,
            Some(biodata_body(email, age, biodata_type, "Dhaka")),
        )
        .await;
        if email.starts_with('p') {
            let id = created["inserted_id"].as_i64().unwrap();
            send(
                &app,
                Method::PATCH,
                &format!("/users/{id}"),
                Some(&admin_token),
                Some(json!({ "role": "premium" })),
            )
            .await;
        }
    }

    // Premium listing is public, age-ascending, and contact-free.
    let (status, listing) = send(&app, Method::GET, "/premium-biodatas", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = listing.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["age"], 25);
    assert_eq!(rows[1]["age"], 35);
    assert!(rows[0].get("mobile").is_none());
    assert!(rows[0].get("contact_email").is_none());

    // make-premium flips the visibility status under the admin guard.
    let (status, _) = send(&app, Method::PATCH, "/biodata/make-premium/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/biodata/make-premium/1",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) = send(&app, Method::GET, "/admin-stats", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_biodatas"], 3);
    assert_eq!(stats["male_count"], 2);
    assert_eq!(stats["female_count"], 1);
    assert_eq!(stats["premium_count"], 1);
    assert_eq!(stats["revenue"], 0);
}

#[tokio::test]
async fn success_stories_list_and_admin_join() {
    let (app, pool) = test_app().await;
    send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": "root@x.com" })),
    )
    .await;
    make_admin(&pool, "root@x.com").await;
    let admin_token = token_for(&app, "root@x.com").await;

    send(
        &app,
        Method::PUT,
        "/biodatas",
        None,
        Some(biodata_body("a@x.com", 30, "female", "Dhaka")),
    )
    .await;
    send(
        &app,
        Method::PUT,
        "/biodatas",
        None,
        Some(biodata_body("b@x.com", 32, "male", "Dhaka")),
    )
    .await;

    for (partner, married_at) in [(2, "2023-05-01"), (7, "2024-01-01")] {
        send(
            &app,
            Method::POST,
            "/success-story",
            None,
            Some(json!({
                "self_biodata_id": 1,
                "partner_biodata_id": partner,
                "story": "found each other here",
                "married_at": married_at,
            })),
        )
        .await;
    }

    // Public listing: newest first, both stories.
    let (_, stories) = send(&app, Method::GET, "/success-story", None, None).await;
    let rows = stories.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["married_at"], "2024-01-01");

    // Admin join drops the story whose partner sequence resolves to nothing.
    let (_, reviewed) = send(&app, Method::GET, "/admin-success-story", Some(&admin_token), None).await;
    let rows = reviewed.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["partner_biodata_id"], 2);
    assert_eq!(rows[0]["self_biodata_type"], "female");
}

#[tokio::test]
async fn favourites_allow_duplicates_and_delete_by_id() {
    let (app, _pool) = test_app().await;

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            Method::POST,
            "/favourites",
            None,
            Some(json!({ "viewer_email": "v@x.com", "biodata_id": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, list) = send(&app, Method::GET, "/favourites/v@x.com", None, None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, _) = send(&app, Method::DELETE, "/favourites/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, "/favourites/1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, Method::GET, "/favourites/v@x.com", None, None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}
