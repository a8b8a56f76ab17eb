//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use tickerlens_chart::service::ChartService;
use tickerlens_core::config::AppConfig;
use tickerlens_core::store::port::{HoldingStore, InstrumentCatalog};

use crate::routes::{catalog, chart, holdings};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 所有字段在服务启动前由 DI 容器注入，生命周期与进程等同。
/// - 持仓只经由 `holdings` 变更，图表计算只读取其快照。
#[derive(Clone)]
pub struct AppState {
    /// 图表编排服务
    pub chart_service: Arc<ChartService>,
    /// 启动时加载的标的目录
    pub catalog: Arc<dyn InstrumentCatalog>,
    /// 持仓存储
    pub holdings: Arc<dyn HoldingStore>,
    /// 全局配置 (默认标的与预设)
    pub app_config: Arc<AppConfig>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tickerlens API",
        version = "0.1.0",
        description = "股票对比与持仓组合曲线的 RESTful API。提供价格、涨跌幅与组合表现三种图表，以及持仓管理。",
        license(name = "MIT")
    ),
    tags(
        (name = "目录 (Catalog)", description = "可选标的列表"),
        (name = "图表 (Chart)", description = "价格、涨跌幅与组合曲线计算"),
        (name = "持仓 (Holdings)", description = "持仓的增删改查")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树 (含 Swagger UI 与 CORS)。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
pub fn build_router(state: AppState) -> Router {
    // 1. 业务路由与自动收集的 OpenAPI Doc
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(catalog::list_catalog))
        .routes(routes!(chart::render_chart))
        .routes(routes!(chart::chart_options))
        .routes(routes!(holdings::get_holdings, holdings::add_holding))
        .routes(routes!(holdings::update_holding, holdings::remove_holding))
        .with_state(state)
        .split_for_parts();

    // 2. 配置 CORS (仪表盘可能由其它来源托管)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 3. 合并 Swagger UI 路由并应用中间件
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 在已绑定的监听器上提供服务，直到收到 Ctrl-C。
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// 绑定端口并启动 HTTP 监听。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
///
/// # Returns
/// 绑定失败或服务异常退出时返回错误。
pub async fn start_server(state: AppState, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(bind_addr).await?;

    tracing::info!("🚀 Tickerlens API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    serve(listener, state).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 无法监听信号时不主动停机
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}
