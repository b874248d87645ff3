use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::net::SocketAddr;

use soulmate_server::database::schema;
use soulmate_server::web::{app, AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Logging
    tracing_subscriber::fmt::init();

    // 2. Database
    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://soulmate.db".to_string());
    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("could not connect to the database");
    schema::init(&pool)
        .await
        .expect("could not initialize the database schema");

    // 3. Secrets. The token secret has no safe default; the payment key may
    // be absent in setups that never hit the gateway.
    let jwt_secret = env::var("ACCESS_TOKEN_SECRET").expect("ACCESS_TOKEN_SECRET must be set");
    let payment_secret = env::var("PAYMENT_SECRET_KEY").unwrap_or_default();

    let state = AppState {
        pool,
        jwt_secret,
        payment_secret,
    };
    let app = app(state);

    // 4. Serve
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("could not parse host/port");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("could not bind the listen address");
    let bound_addr = listener.local_addr().unwrap();
    tracing::info!("SoulMateConnect is running on http://{}", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
