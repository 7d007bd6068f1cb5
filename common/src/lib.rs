//! 表存储管理面板公共模块
//!
//! 提供各服务共用的基础设施：
//! - 配置加载
//! - 统一错误类型与响应格式
//! - 请求 ID 中间件
//! - 库表列表与导航菜单模型

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;

pub use errors::{AppError, AppResult};
pub use response::ApiResponse;
