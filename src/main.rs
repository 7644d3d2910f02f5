// ==========================================
// 物料库存系统 (MORE) - HTTP 服务主入口
// ==========================================

use anyhow::Context;
use more_inventory::app::{create_router, AppState};
use more_inventory::{logging, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("物料库存系统 MORE");
    tracing::info!("系统版本: {}", more_inventory::VERSION);
    tracing::info!("==================================================");

    let config = ServerConfig::from_env();
    tracing::info!("使用数据文件: {}", config.data_file.display());

    // 创建AppState（数据文件缺失时初始化为空列表）
    let state = AppState::new(&config.data_file)
        .with_context(|| format!("无法初始化数据文件 {}", config.data_file.display()))?;

    if !config.public_dir.is_dir() {
        tracing::warn!("静态目录不存在: {}", config.public_dir.display());
    }

    let app = create_router(state, &config);
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法监听 {}", addr))?;

    tracing::info!("Sistema MORE activo en puerto {}", config.port);
    axum::serve(listener, app).await.context("HTTP 服务异常退出")?;

    Ok(())
}
