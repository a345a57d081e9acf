//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use catalog_config::AppConfig;
use catalog_errors::AppResult;
use tracing::info;

use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 1. 加载 .env 与配置
/// 2. 初始化运行时（日志）
/// 3. 创建基础设施资源（数据库连接池、metrics）
/// 4. 调用用户提供的闭包构建路由
/// 5. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use catalog_bootstrap::run_http;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_http("config", |infra| async move {
///         Ok(build_router(infra))
///     }).await
/// }
/// ```
pub async fn run_http<F, Fut>(
    config_dir: &str,
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    // 1. 加载配置
    if dotenvy::dotenv().is_err() {
        eprintln!("No .env file found");
    }
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    // 3. 构建服务地址
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // 4. 创建基础设施
    let infra = Infrastructure::from_config(config).await?;

    // 5. 构建路由
    let app = router_builder(infra).await?;

    info!(%addr, "HTTP server starting");

    // 6. 启动服务器
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");

    Ok(())
}
