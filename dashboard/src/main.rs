//! 表存储管理面板
//!
//! 服务端渲染的库表导航与表列表页面，数据来自 Infinity HTTP API。

use anyhow::Context;
use common::config::{load_dotenv, AppConfig};
use dashboard::{create_router, AppState, SERVICE_NAME};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    // 初始化日志追踪
    init_tracing();

    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME);

    // 创建应用状态
    let state = AppState::new(config.clone()).context("初始化应用状态失败")?;

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = config.listen_addr();
    info!(
        service = SERVICE_NAME,
        address = %addr,
        backend = %config.backend.base_url,
        default_database = %config.backend.default_database,
        "启动表存储管理面板"
    );

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {}", addr))?;
    axum::serve(listener, app).await.context("服务启动失败")?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
