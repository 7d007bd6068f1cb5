//! 路由模块

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// 创建页面与 JSON 接口路由
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tables", get(handlers::tables_page))
        .route("/api/databases", get(handlers::list_databases))
        .route("/api/databases/{name}/tables", get(handlers::list_tables))
        .route("/api/menu", get(handlers::menu))
        .route("/api/health", get(handlers::health_check))
}
