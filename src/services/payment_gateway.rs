use axum::http::StatusCode;
use serde_json::Value;

use crate::web::error::ApiError;

/// Thin adapter over the payment provider's intent API. The provider is an
/// opaque collaborator: we send an amount, we get back a client secret for
/// the browser to complete the charge with. Failures are not retried here.

fn payment_api_base_url() -> String {
    std::env::var("PAYMENT_API_URL").unwrap_or_else(|_| "https://api.stripe.com".to_string())
}

fn connect_failed(url: &str, err: impl ToString) -> ApiError {
    ApiError::Upstream {
        status: StatusCode::BAD_GATEWAY,
        body: Some(serde_json::json!({
            "message": "payment gateway unreachable",
            "detail": err.to_string(),
            "url": url,
        })),
    }
}

/// Create a charge intent for `amount` minor units and return the client
/// secret.
pub async fn create_payment_intent(secret_key: &str, amount: i64) -> Result<String, ApiError> {
    let base = payment_api_base_url();
    let url = format!("{}/v1/payment_intents", base.trim_end_matches('/'));

    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .bearer_auth(secret_key)
        .form(&[
            ("amount", amount.to_string()),
            ("currency", "usd".to_string()),
            ("payment_method_types[]", "card".to_string()),
        ])
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    let status = resp.status();
    let body: Value = resp.json().await.map_err(|e| connect_failed(&url, e))?;
    if !status.is_success() {
        return Err(ApiError::Upstream {
            status,
            body: Some(body),
        });
    }

    body.get("client_secret")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ApiError::Upstream {
            status: StatusCode::BAD_GATEWAY,
            body: Some(serde_json::json!({
                "message": "payment gateway response missing client_secret",
            })),
        })
}
