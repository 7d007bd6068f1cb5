//! 表存储管理面板服务
//!
//! 提供以下功能：
//! - 侧边栏库表导航菜单
//! - 默认数据库的表列表页面
//! - 后端列表接口的 JSON 代理

pub mod backend;
pub mod handlers;
pub mod menu;
pub mod page;
pub mod routes;
pub mod state;

use axum::{middleware, routing::get, Json, Router};
use common::middleware::request_id::request_id_middleware;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub use state::AppState;

pub const SERVICE_NAME: &str = "dashboard";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "表存储管理面板 API",
        version = "0.1.0",
        description = "库表列表查询接口"
    ),
    paths(
        handlers::list_databases,
        handlers::list_tables,
        handlers::menu,
        handlers::health_check,
    ),
    components(schemas(
        common::models::DatabaseList,
        common::models::TableList,
        common::models::MenuItem,
        handlers::HealthResponse,
    )),
    tags(
        (name = "listing", description = "库表列表端点"),
        (name = "health", description = "健康检查端点")
    )
)]
pub struct ApiDoc;

/// Builds the application router with all middleware attached.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
