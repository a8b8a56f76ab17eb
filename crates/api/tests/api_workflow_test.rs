use reqwest::StatusCode;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tickerlens_api::server::{AppState, build_router};
use tickerlens_api::types::{
    ApiErrorResponse, ApiResponse, ChartOptionsResponse, ChartReportResponse, HoldingRequest,
    HoldingResponse, HoldingsSnapshotResponse,
};
use tickerlens_chart::service::ChartService;
use tickerlens_core::config::AppConfig;
use tickerlens_core::test_utils::{StaticMarketProvider, test_start};
use tickerlens_store::catalog::FileInstrumentCatalog;
use tickerlens_store::holdings::MemoryHoldingStore;
use tokio::net::TcpListener;

// 帮助函数：在随机端口启动测试服务器
async fn spawn_test_server() -> anyhow::Result<String> {
    let feed = StaticMarketProvider::new()
        .with_closes("MSFT", test_start(), &[100.0, 110.0, 90.0])
        .with_closes("AAPL", test_start(), &[50.0, 55.0, 45.0])
        .with_closes("META", test_start(), &[200.0, 180.0, 220.0])
        .with_failure("DOWN", "connection reset");

    let state = AppState {
        chart_service: Arc::new(ChartService::new(Arc::new(feed), true)),
        catalog: Arc::new(FileInstrumentCatalog::from_symbols(vec![
            "MSFT".to_string(),
            "AAPL".to_string(),
            "META".to_string(),
        ])),
        holdings: Arc::new(MemoryHoldingStore::new()),
        app_config: Arc::new(AppConfig::default()),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = format!("http://{}", listener.local_addr()?);
    let app = build_router(state);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("test server stopped: {}", e);
        }
    });

    Ok(addr)
}

fn holding_request(symbol: &str, quantity: rust_decimal::Decimal) -> HoldingRequest {
    HoldingRequest {
        symbol: symbol.to_string(),
        quantity,
        cost_basis_per_unit: dec!(100),
    }
}

#[tokio::test]
async fn test_catalog_and_options() -> anyhow::Result<()> {
    let base_url = spawn_test_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/api/v1/catalog", base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: ApiResponse<Vec<String>> = res.json().await?;
    assert_eq!(body.data, Some(vec!["MSFT".into(), "AAPL".into(), "META".into()]));

    let res = client
        .get(format!("{}/api/v1/chart/options", base_url))
        .send()
        .await?;
    let body: ApiResponse<ChartOptionsResponse> = res.json().await?;
    let options = body.data.ok_or_else(|| anyhow::anyhow!("missing options"))?;
    assert_eq!(options.presets.len(), 7);
    assert_eq!(options.modes.len(), 3);

    let res = client
        .get(format!("{}/api-docs/openapi.json", base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_chart_modes_and_invalid_window() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();
    let base_url = spawn_test_server().await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/v1/chart", base_url);

    // ============================================
    // Case 1: 涨跌幅模式，失败标的进入告警
    // ============================================
    let res = client
        .post(&url)
        .json(&serde_json::json!({
            "mode": "percentage_change",
            "preset": "3M",
            "symbols": ["msft", "DOWN", "AAPL"]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: ApiResponse<ChartReportResponse> = res.json().await?;
    let report = body.data.ok_or_else(|| anyhow::anyhow!("missing report"))?;
    assert_eq!(report.window, "lookback 3mo");
    assert_eq!(report.series.len(), 2);
    assert_eq!(report.series[0].name, "MSFT (% Change)");
    assert_eq!(report.series[0].points[0].value, 0.0);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].symbol, "DOWN");
    assert_eq!(report.warnings[0].kind, "NoData");

    // ============================================
    // Case 2: 非法显式窗口 (start > end) 返回 400
    // ============================================
    let res = client
        .post(&url)
        .json(&serde_json::json!({
            "mode": "price",
            "start": "2024-03-10",
            "end": "2024-03-01",
            "symbols": ["MSFT"]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: ApiErrorResponse = res.json().await?;
    assert!(!body.success);

    // ============================================
    // Case 3: 未知预设返回 400
    // ============================================
    let res = client
        .post(&url)
        .json(&serde_json::json!({ "mode": "price", "preset": "2W" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_holdings_workflow_drives_portfolio_chart() -> anyhow::Result<()> {
    let base_url = spawn_test_server().await?;
    let client = reqwest::Client::new();
    let holdings_url = format!("{}/api/v1/holdings", base_url);

    // ============================================
    // Case 1: 新增两个持仓
    // ============================================
    let mut ids = Vec::new();
    for (symbol, quantity) in [("MSFT", dec!(10)), ("META", dec!(5))] {
        let res = client
            .post(&holdings_url)
            .json(&holding_request(symbol, quantity))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body: ApiResponse<HoldingResponse> = res.json().await?;
        let holding = body.data.ok_or_else(|| anyhow::anyhow!("missing holding"))?;
        ids.push(holding.id);
    }

    // ============================================
    // Case 2: 负数量被拒绝，未知 ID 返回 404
    // ============================================
    let res = client
        .post(&holdings_url)
        .json(&holding_request("AAPL", dec!(-1)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .delete(format!("{}/unknown", holdings_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // ============================================
    // Case 3: 组合曲线 (期初市值均为 1000，走势相反)
    // ============================================
    let res = client
        .post(format!("{}/api/v1/chart", base_url))
        .json(&serde_json::json!({ "mode": "portfolio", "preset": "1M" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: ApiResponse<ChartReportResponse> = res.json().await?;
    let report = body.data.ok_or_else(|| anyhow::anyhow!("missing report"))?;
    assert_eq!(report.holdings_version, Some(2));
    let portfolio = report
        .series
        .iter()
        .find(|s| s.name == "Portfolio")
        .ok_or_else(|| anyhow::anyhow!("portfolio series missing"))?;
    assert!(portfolio.points.iter().all(|p| p.value.abs() < 1e-9));
    assert_eq!(report.positions.len(), 2);

    // ============================================
    // Case 4: 编辑后删除，版本号随之递增
    // ============================================
    let res = client
        .put(format!("{}/{}", holdings_url, ids[0]))
        .json(&holding_request("MSFT", dec!(0)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!("{}/{}", holdings_url, ids[1]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(&holdings_url).send().await?;
    let body: ApiResponse<HoldingsSnapshotResponse> = res.json().await?;
    let snapshot = body.data.ok_or_else(|| anyhow::anyhow!("missing snapshot"))?;
    assert_eq!(snapshot.version, 4);
    assert_eq!(snapshot.holdings.len(), 1);
    assert_eq!(snapshot.holdings[0].quantity, "0");

    // ============================================
    // Case 5: 仅剩零数量持仓，组合聚合失败但单标的曲线仍返回
    // ============================================
    let res = client
        .post(format!("{}/api/v1/chart", base_url))
        .json(&serde_json::json!({ "mode": "portfolio" }))
        .send()
        .await?;
    let body: ApiResponse<ChartReportResponse> = res.json().await?;
    let report = body.data.ok_or_else(|| anyhow::anyhow!("missing report"))?;
    assert!(report.portfolio_error.is_some());
    assert_eq!(report.series.len(), 1);
    Ok(())
}
