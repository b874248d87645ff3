pub mod error;
pub mod middleware;
pub mod routes;

use axum::extract::FromRef;
use axum::http::HeaderValue;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::web::middleware::auth;
use crate::web::routes::{admin, auth as auth_routes, biodatas, contact_requests, favourites, payments, stories, users};

/// Shared per-process state. The pool is the only shared mutable resource;
/// the secrets are read once at bootstrap and injected from here, never from
/// the environment inside core logic.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt_secret: String,
    pub payment_secret: String,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

async fn root_handler() -> &'static str {
    "Hello from SoulMateConnect Server.."
}

/// Builds the full application router. Admin surfaces are wrapped in the
/// authenticate-then-authorize chain; a failed guard short-circuits before
/// the handler runs.
pub fn app(state: AppState) -> Router {
    let auth_layer = from_fn_with_state(state.clone(), auth::require_auth);
    let admin_layer = from_fn_with_state(state.clone(), auth::require_admin);

    let admin_routes = Router::new()
        .route("/biodatas/status/:id", patch(biodatas::set_status_handler))
        .route("/biodata/make-premium/:id", patch(biodatas::make_premium_handler))
        .route("/contact-request", get(contact_requests::list_pending_handler))
        .route(
            "/contact-request/:id",
            patch(contact_requests::approve_handler).delete(contact_requests::reject_handler),
        )
        .route("/admin-success-story", get(stories::admin_stories_handler))
        .route("/admin-stats", get(admin::admin_stats_handler))
        .route_layer(admin_layer.clone())
        .route_layer(auth_layer.clone());

    let authenticated_routes = Router::new()
        .route("/users/admin/:email", get(users::admin_flag_handler))
        .route("/biodata-details/:id", get(biodatas::details_handler))
        .route("/payments/:email", get(payments::list_payments_handler))
        .route_layer(auth_layer.clone());

    // /users mixes auth levels per method, so the guards go on the method
    // routers instead of a whole sub-router.
    let users_collection = post(users::create_account_handler).merge(
        get(users::list_accounts_handler)
            .route_layer(admin_layer.clone())
            .route_layer(auth_layer.clone()),
    );
    let users_item = get(users::get_account_handler).merge(
        patch(users::update_role_handler)
            .route_layer(admin_layer)
            .route_layer(auth_layer),
    );

    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://localhost:5174"),
        ])
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/jwt", post(auth_routes::issue_token_handler))
        .route("/users", users_collection)
        .route("/users/:email", users_item)
        .route(
            "/biodatas",
            get(biodatas::search_handler).put(biodatas::upsert_handler),
        )
        .route("/biodata-count", get(biodatas::count_handler))
        .route("/premium-biodatas", get(biodatas::premium_handler))
        .route("/biodatas/:email", get(biodatas::by_email_handler))
        .route(
            "/favourites",
            post(favourites::create_handler),
        )
        // GET keys by viewer email, DELETE by row id; the legacy paths share
        // one shape so the parameter name is generic here.
        .route(
            "/favourites/:key",
            get(favourites::list_handler).delete(favourites::delete_handler),
        )
        .route("/create-payment-intent", post(payments::create_intent_handler))
        .route("/payments", post(payments::create_payment_handler))
        .route(
            "/success-story",
            post(stories::create_handler).get(stories::list_handler),
        )
        .merge(admin_routes)
        .merge(authenticated_routes)
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .with_state(state)
}
