//! # 图表路由控制器
//!
//! 将请求体解析为领域请求，取持仓快照后交给 `ChartService` 计算。

use axum::Json;
use axum::extract::State;

use tickerlens_core::chart::entity::{ChartMode, ChartRequest, Preset, WindowSelection};
use tickerlens_core::config::ChartConfig;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, ChartOptionsResponse, ChartReportResponse, ChartRequestBody};

/// # Summary
/// 从请求体确定时间窗口。
///
/// # Logic
/// 1. 预设与显式日期同时出现视为非法请求。
/// 2. 显式日期必须成对出现，先后顺序交给窗口解析器校验。
/// 3. 都未提供时回落到配置的默认预设。
fn window_selection(
    body: &ChartRequestBody,
    defaults: &ChartConfig,
) -> Result<WindowSelection, ApiError> {
    match (&body.preset, body.start, body.end) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ApiError::BadRequest(
            "preset and start/end are mutually exclusive".to_string(),
        )),
        (Some(preset), None, None) => preset
            .parse::<Preset>()
            .map(WindowSelection::Preset)
            .map_err(ApiError::BadRequest),
        (None, Some(start), Some(end)) => Ok(WindowSelection::Explicit { start, end }),
        (None, None, None) => Ok(WindowSelection::Preset(defaults.default_preset)),
        (None, _, _) => Err(ApiError::BadRequest(
            "start and end must be provided together".to_string(),
        )),
    }
}

/// 将请求体转换为领域层的图表请求。
pub fn to_chart_request(
    body: ChartRequestBody,
    defaults: &ChartConfig,
) -> Result<ChartRequest, ApiError> {
    let mode = body
        .mode
        .parse::<ChartMode>()
        .map_err(ApiError::BadRequest)?;
    let window = window_selection(&body, defaults)?;
    let symbols = body
        .symbols
        .unwrap_or_else(|| defaults.default_symbols.clone());

    Ok(ChartRequest {
        mode,
        window,
        symbols,
    })
}

/// 计算对比图表
///
/// 单个标的失败不会使请求失败，而是出现在 `warnings` 中；
/// 组合聚合失败时 `portfolio_error` 给出原因，单标的曲线照常返回。
#[utoipa::path(
    post,
    path = "/api/v1/chart",
    tag = "图表 (Chart)",
    request_body = ChartRequestBody,
    responses(
        (status = 200, description = "计算完成", body = ApiResponse<ChartReportResponse>),
        (status = 400, description = "非法模式、预设或时间窗口")
    )
)]
pub async fn render_chart(
    State(state): State<AppState>,
    Json(body): Json<ChartRequestBody>,
) -> Result<Json<ApiResponse<ChartReportResponse>>, ApiError> {
    let request = to_chart_request(body, &state.app_config.chart)?;
    let snapshot = state.holdings.snapshot().await?;

    let report = state.chart_service.render(&request, &snapshot).await?;

    Ok(Json(ApiResponse::ok(report.into())))
}

/// 获取图表可选项
///
/// 返回全部模式、预设以及默认选中的标的与预设。
#[utoipa::path(
    get,
    path = "/api/v1/chart/options",
    tag = "图表 (Chart)",
    responses(
        (status = 200, description = "获取成功", body = ApiResponse<ChartOptionsResponse>)
    )
)]
pub async fn chart_options(State(state): State<AppState>) -> Json<ApiResponse<ChartOptionsResponse>> {
    let chart = &state.app_config.chart;
    Json(ApiResponse::ok(ChartOptionsResponse {
        modes: vec![
            ChartMode::Price,
            ChartMode::PercentageChange,
            ChartMode::Portfolio,
        ],
        presets: Preset::ALL.to_vec(),
        default_preset: chart.default_preset,
        default_symbols: chart.default_symbols.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tickerlens_core::config::AppConfig;

    fn body(mode: &str) -> ChartRequestBody {
        ChartRequestBody {
            mode: mode.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_fill_missing_fields() -> Result<(), ApiError> {
        let config = AppConfig::default();
        let request = to_chart_request(body("price"), &config.chart)?;

        assert_eq!(request.mode, ChartMode::Price);
        assert_eq!(request.window, WindowSelection::Preset(Preset::OneMonth));
        assert_eq!(request.symbols, config.chart.default_symbols);
        Ok(())
    }

    #[test]
    fn test_explicit_window_and_preset_parsing() -> Result<(), ApiError> {
        let config = AppConfig::default();
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default();
        let end = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap_or_default();

        let explicit = ChartRequestBody {
            start: Some(start),
            end: Some(end),
            symbols: Some(vec![]),
            ..body("Percentage Change")
        };
        let request = to_chart_request(explicit, &config.chart)?;
        assert_eq!(request.mode, ChartMode::PercentageChange);
        assert_eq!(request.window, WindowSelection::Explicit { start, end });
        assert!(request.symbols.is_empty());

        let preset = ChartRequestBody {
            preset: Some("5y".to_string()),
            ..body("portfolio")
        };
        let request = to_chart_request(preset, &config.chart)?;
        assert_eq!(request.window, WindowSelection::Preset(Preset::FiveYears));
        Ok(())
    }

    #[test]
    fn test_bad_inputs_are_rejected() {
        let config = AppConfig::default();
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default();

        let cases = [
            body("candles"),
            ChartRequestBody {
                preset: Some("2W".to_string()),
                ..body("price")
            },
            ChartRequestBody {
                start: Some(start),
                ..body("price")
            },
            ChartRequestBody {
                preset: Some("1M".to_string()),
                start: Some(start),
                end: Some(start),
                ..body("price")
            },
        ];
        for case in cases {
            assert!(matches!(
                to_chart_request(case, &config.chart),
                Err(ApiError::BadRequest(_))
            ));
        }
    }
}
