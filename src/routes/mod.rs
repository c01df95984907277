// HTTP routes

mod http;

use axum::http::{HeaderValue, Method};
use axum::{Router, routing::get};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::collector::Collector;
use crate::config::AppConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) collector: Collector,
}

pub fn app(collector: Collector, config: &AppConfig) -> Router {
    let state = AppState { collector };
    Router::new()
        .route("/", get(http::root_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/system/info", get(http::system_info_handler))
        .route("/api/system/cpu", get(http::cpu_handler))
        .route("/api/system/memory", get(http::memory_handler))
        .route("/api/system/disk", get(http::disk_handler))
        .route("/api/system/network", get(http::network_handler))
        .layer(cors_layer(&config.server.cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
