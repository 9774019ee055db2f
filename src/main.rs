use axum::{routing::get, routing::post, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use hydro_api_rust::database::manager::DatabaseManager;
use hydro_api_rust::handlers::{auth, measurements, systems};
use hydro_api_rust::middleware::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = hydro_api_rust::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Hydro API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("HYDRO_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Hydro API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        // Protected resources
        .merge(resource_routes());

    if hydro_api_rust::config::config().security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router {
    Router::new()
        .route("/register/", post(auth::register))
        .route("/token/", post(auth::token_obtain))
        .route("/token/refresh/", post(auth::token_refresh))
}

fn resource_routes() -> Router {
    Router::new()
        .route(
            "/hydroponic/",
            get(systems::collection::list).post(systems::collection::create),
        )
        .route(
            "/hydroponic/:id/",
            get(systems::record::get)
                .put(systems::record::put)
                .patch(systems::record::patch)
                .delete(systems::record::delete),
        )
        .route(
            "/measurement/",
            get(measurements::collection::list).post(measurements::collection::create),
        )
        .route(
            "/measurement/:id/",
            get(measurements::record::get)
                .put(measurements::record::put)
                .patch(measurements::record::patch)
                .delete(measurements::record::delete),
        )
        .layer(axum::middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Hydro API (Rust)",
        "version": version,
        "description": "CRUD API for hydroponic systems and their water-quality measurements",
        "endpoints": {
            "register": "POST /register/ (public)",
            "token": "POST /token/, POST /token/refresh/ (public - token acquisition)",
            "systems": "GET|POST /hydroponic/, GET|PUT|PATCH|DELETE /hydroponic/:id/ (bearer token)",
            "measurements": "GET|POST /measurement/, GET|PUT|PATCH|DELETE /measurement/:id/ (bearer token)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
