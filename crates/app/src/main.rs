use std::sync::Arc;

use tickerlens_api::server::{AppState, start_server};
use tickerlens_chart::service::ChartService;
use tickerlens_feed::yahoo::YahooProvider;
use tickerlens_store::catalog::FileInstrumentCatalog;
use tickerlens_store::holdings::MemoryHoldingStore;
use tracing::info;

mod bootstrap;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 API 层。
///
/// # Logic
/// 1. 加载配置并初始化全局日志。
/// 2. 实例化基础设施层（Feed、Catalog、Holdings）。
/// 3. 构造应用服务层（ChartService）。
/// 4. 启动 HTTP 服务，直到收到退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置并初始化日志
    let config = bootstrap::load_config(bootstrap::CONFIG_FILE)?;
    let _log_guard = bootstrap::init_tracing(&config);
    info!("Tickerlens starting...");

    // 2. 实例化基础设施层
    let feed = Arc::new(YahooProvider::new(&config.feed)?);
    let catalog = Arc::new(FileInstrumentCatalog::load(&config.catalog.path).await?);
    let holdings = Arc::new(MemoryHoldingStore::new());

    // 3. 构造应用服务层
    let chart_service = Arc::new(ChartService::new(feed, config.feed.use_adjusted_close));

    // 4. 启动 API 服务
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        chart_service,
        catalog,
        holdings,
        app_config: Arc::new(config),
    };
    start_server(state, &bind_addr).await?;

    info!("Tickerlens stopped");
    Ok(())
}
