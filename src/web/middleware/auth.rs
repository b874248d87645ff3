use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::database::account_repo;
use crate::models::Role;
use crate::services::token_service;
use crate::web::error::ApiError;
use crate::web::AppState;

/// The verified identity of the caller, injected into request extensions by
/// `require_auth` for downstream handlers.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// First guard: a valid bearer token must be present. On success the decoded
/// identity rides along in the request extensions; on failure the protected
/// handler never runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        return ApiError::Unauthenticated.into_response();
    };

    match token_service::verify(&state.jwt_secret, token) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthenticatedUser {
                email: claims.email,
            });
            next.run(request).await
        }
        Err(_) => {
            warn!("token verification failed");
            ApiError::Unauthenticated.into_response()
        }
    }
}

/// Second guard, layered after `require_auth`: the authenticated account must
/// exist and hold the admin role. The role check re-reads the store on every
/// request. The match on `Role` is exhaustive so a new role cannot slip
/// through unhandled.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(user) = request.extensions().get::<AuthenticatedUser>().cloned() else {
        return ApiError::Unauthenticated.into_response();
    };

    let account = match account_repo::find_by_email(&state.pool, &user.email).await {
        Ok(account) => account,
        Err(e) => {
            error!("admin check failed for {}: {}", user.email, e);
            return ApiError::Database(e).into_response();
        }
    };

    let is_admin = match account.map(|a| a.role) {
        Some(Role::Admin) => true,
        Some(Role::Member) | Some(Role::Premium) | None => false,
    };
    if !is_admin {
        return ApiError::Forbidden.into_response();
    }

    next.run(request).await
}
