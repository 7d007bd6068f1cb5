//! 请求处理模块

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;
use validator::Validate;

use common::errors::AppError;
use common::middleware::RequestId;
use common::models::{DatabaseList, ListTablesPath, MenuItem, TableList};
use common::response::ApiResponse;

use crate::page::{load_menu, load_page, PageQuery, PageRenderer};
use crate::state::AppState;

/// 首页，重定向到表列表页面
pub async fn index() -> Redirect {
    Redirect::to("/tables")
}

/// 表列表页面
pub async fn tables_page(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, PageError> {
    debug!(q = query.search(), offset = query.offset(), "渲染表列表页面");

    let page_error = |error: AppError| PageError {
        error,
        request_id: request_id.clone(),
        renderer: state.renderer.clone(),
    };

    let data = load_page(state.backend.as_ref(), state.default_database())
        .await
        .map_err(page_error)?;
    let html = state.renderer.render_page(&data).map_err(page_error)?;
    Ok(Html(html))
}

/// 列出所有数据库
#[utoipa::path(
    get,
    path = "/api/databases",
    tag = "listing",
    responses(
        (status = 200, description = "数据库列表", body = ApiResponse<DatabaseList>),
        (status = 502, description = "后端服务错误")
    )
)]
pub async fn list_databases(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<DatabaseList>>, AppError> {
    let data = state.backend.list_databases().await?;
    Ok(Json(
        ApiResponse::ok_with_service(data, state.service_name()).with_request_id(request_id.0),
    ))
}

/// 列出指定数据库的所有表
#[utoipa::path(
    get,
    path = "/api/databases/{name}/tables",
    tag = "listing",
    params(
        ("name" = String, Path, description = "数据库名称")
    ),
    responses(
        (status = 200, description = "表列表", body = ApiResponse<TableList>),
        (status = 400, description = "数据库名称无效"),
        (status = 502, description = "后端服务错误")
    )
)]
pub async fn list_tables(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(path): Path<ListTablesPath>,
) -> Result<Json<ApiResponse<TableList>>, AppError> {
    path.validate()?;
    let data = state.backend.list_tables(&path.name).await?;
    Ok(Json(
        ApiResponse::ok_with_service(data, state.service_name()).with_request_id(request_id.0),
    ))
}

/// 获取侧边栏菜单
#[utoipa::path(
    get,
    path = "/api/menu",
    tag = "listing",
    responses(
        (status = 200, description = "侧边栏菜单", body = ApiResponse<Vec<MenuItem>>),
        (status = 502, description = "后端服务错误")
    )
)]
pub async fn menu(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<MenuItem>>>, AppError> {
    let menu = load_menu(state.backend.as_ref()).await?;
    Ok(Json(
        ApiResponse::ok_with_service(menu, state.service_name())
            .with_request_id(request_id.0),
    ))
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.service_name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// 健康检查响应
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 服务名称
    pub service: String,
    /// 服务版本
    pub version: String,
    /// 当前时间戳
    pub timestamp: DateTime<Utc>,
}

/// 页面渲染失败时返回的 HTML 错误页
pub struct PageError {
    error: AppError,
    request_id: RequestId,
    renderer: Arc<PageRenderer>,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        error!(
            code = self.error.code(),
            error = %self.error,
            request_id = %self.request_id,
            "页面渲染失败"
        );

        match self
            .renderer
            .render_error(&self.error, Some(self.request_id.as_str()))
        {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                error!(error = %e, "错误页渲染失败");
                (status, self.error.to_string()).into_response()
            }
        }
    }
}

/// 未匹配路由
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
