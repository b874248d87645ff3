use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::database::payment_repo::PaymentWithContactRow;
use crate::services::{contact_service, payment_gateway};
use crate::web::error::ApiError;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateIntentBody {
    /// Price in major units; the gateway wants minor units.
    pub price: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentBody {
    pub email: String,
    pub amount: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub biodata_id: i64,
}

fn default_currency() -> String {
    "usd".to_string()
}

/// POST /create-payment-intent — delegate to the gateway, hand the client
/// secret back for the browser-side confirmation.
pub async fn create_intent_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateIntentBody>,
) -> Result<Json<Value>, ApiError> {
    if body.price <= 0 {
        return Err(ApiError::InvalidArgument(
            "price must be positive".to_string(),
        ));
    }
    let client_secret =
        payment_gateway::create_payment_intent(&state.payment_secret, body.price * 100).await?;
    Ok(Json(json!({ "client_secret": client_secret })))
}

/// POST /payments — the client reports a completed charge; the contact
/// request starts out pending.
pub async fn create_payment_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<CreatePaymentBody>,
) -> Result<Json<Value>, ApiError> {
    let id = contact_service::create_request(
        &pool,
        &body.email,
        body.amount,
        &body.currency,
        body.biodata_id,
    )
    .await?;
    Ok(Json(json!({ "inserted_id": id })))
}

/// GET /payments/:email — the payer's requests; target contact fields are
/// only present on approved ones.
pub async fn list_payments_handler(
    State(pool): State<SqlitePool>,
    Path(email): Path<String>,
) -> Result<Json<Vec<PaymentWithContactRow>>, ApiError> {
    let payments = contact_service::list_for_payer(&pool, &email).await?;
    Ok(Json(payments))
}
