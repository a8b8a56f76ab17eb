use crate::aggregator::{aggregate, single_instrument_curve};
use crate::normalizer::normalize;
use crate::resolver::resolve;
use crate::valuation::summarize_positions;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tickerlens_core::chart::entity::{
    ChartMode, ChartReport, ChartRequest, InstrumentWarning, NamedSeries, NormalizedSeries,
    ResolvedWindow, WarningKind,
};
use tickerlens_core::chart::error::ChartError;
use tickerlens_core::common::{Instrument, normalize_symbol};
use tickerlens_core::market::entity::RawSeries;
use tickerlens_core::market::port::MarketDataProvider;
use tickerlens_core::portfolio::entity::HoldingsSnapshot;
use tracing::{debug, info, warn};

/// 组合曲线的图例名称
pub const PORTFOLIO_SERIES_NAME: &str = "Portfolio";

/// # Summary
/// 图表编排服务：解析窗口、并发抓取、归一化、聚合并产出报告。
///
/// # Invariants
/// - 无内部可变状态，每次请求独立计算。
/// - 单标的失败只产生告警，不影响其它标的。
pub struct ChartService {
    // 行情数据源
    provider: Arc<dyn MarketDataProvider>,
    // 数据源提供复权价时是否优先使用
    use_adjusted_close: bool,
}

impl ChartService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, use_adjusted_close: bool) -> Self {
        Self {
            provider,
            use_adjusted_close,
        }
    }

    /// # Summary
    /// 执行一次图表计算。
    ///
    /// # Logic
    /// 1. 解析窗口，非法窗口直接终止本次请求。
    /// 2. 确定标的集合：组合模式取自持仓快照，其它模式取自请求 (去重保序)。
    /// 3. 并发抓取所有标的，等待全部完成后再进入计算。
    /// 4. 按模式生成价格、涨跌幅或组合曲线，失败标的记为告警。
    ///
    /// # Arguments
    /// * `request`: 图表请求。
    /// * `holdings`: 本次计算使用的持仓快照。
    ///
    /// # Returns
    /// 成功返回 `ChartReport`；仅 `InvalidWindow` 会作为错误返回。
    pub async fn render(
        &self,
        request: &ChartRequest,
        holdings: &HoldingsSnapshot,
    ) -> Result<ChartReport, ChartError> {
        let window = resolve(request.window)?;

        let symbols = match request.mode {
            ChartMode::Portfolio => holdings.symbols(),
            _ => dedup_symbols(&request.symbols),
        };
        info!(
            "Rendering {} chart for {} instruments over {}",
            request.mode,
            symbols.len(),
            window
        );

        let fetched = join_all(symbols.iter().map(|s| self.fetch_raw(s, &window))).await;

        let mut warnings = Vec::new();
        let mut raws = Vec::new();
        for outcome in fetched {
            match outcome {
                Ok(raw) => raws.push(raw),
                Err(warning) => warnings.push(warning),
            }
        }

        let mut report = ChartReport {
            mode: request.mode,
            window,
            series: Vec::new(),
            warnings,
            portfolio_error: None,
            positions: Vec::new(),
            holdings_version: None,
        };

        match request.mode {
            ChartMode::Price => {
                report.series = raws
                    .into_iter()
                    .map(|raw| NamedSeries {
                        name: format!("{} (Price)", raw.symbol),
                        symbol: Some(raw.symbol),
                        points: raw.points,
                    })
                    .collect();
            }
            ChartMode::PercentageChange => {
                report.series = normalize_all(raws, &mut report.warnings)
                    .iter()
                    .map(|(_, normalized)| percentage_series(normalized))
                    .collect();
            }
            ChartMode::Portfolio => {
                render_portfolio(raws, holdings, &mut report);
            }
        }

        for w in &report.warnings {
            warn!("Instrument {} dropped: {}", w.symbol, w.message);
        }
        info!(
            "Chart ready: {} series, {} warnings",
            report.series.len(),
            report.warnings.len()
        );

        Ok(report)
    }

    /// # Summary
    /// 抓取单个标的的原始序列。
    ///
    /// # Logic
    /// 1. 数据源的任何失败 (网络、未知代码、限流) 一律视为 `NoData`。
    /// 2. 抓取成功但序列为空同样视为 `NoData`。
    async fn fetch_raw(
        &self,
        symbol: &str,
        window: &ResolvedWindow,
    ) -> Result<RawSeries, InstrumentWarning> {
        let instrument = Instrument::new(symbol);
        match self.provider.fetch_candles(&instrument, window).await {
            Ok(candles) => {
                let raw =
                    RawSeries::from_candles(&instrument.symbol, &candles, self.use_adjusted_close);
                if raw.is_empty() {
                    return Err(InstrumentWarning {
                        symbol: instrument.symbol.clone(),
                        kind: WarningKind::NoData,
                        message: ChartError::NoData(instrument.symbol).to_string(),
                    });
                }
                debug!("Fetched {} points for {}", raw.len(), instrument.symbol);
                Ok(raw)
            }
            Err(e) => Err(InstrumentWarning {
                symbol: instrument.symbol.clone(),
                kind: WarningKind::NoData,
                message: format!("Error fetching data for {}: {}", instrument.symbol, e),
            }),
        }
    }
}

/// # Summary
/// 组合模式：逐持仓涨跌幅曲线 + 加权组合曲线 + 估值摘要。
///
/// # Logic
/// 1. 归一化失败的标的只产生告警，其持仓不参与加权。
/// 2. 聚合失败 (时间轴不一致、总市值为 0) 时仍返回单标的曲线，并填充 `portfolio_error`。
fn render_portfolio(
    raws: Vec<RawSeries>,
    holdings: &HoldingsSnapshot,
    report: &mut ChartReport,
) {
    report.holdings_version = Some(holdings.version);

    let mut series_by_symbol: HashMap<String, NormalizedSeries> = HashMap::new();
    let mut first_close_by_symbol: HashMap<String, f64> = HashMap::new();
    let mut raw_by_symbol: HashMap<String, RawSeries> = HashMap::new();

    for (raw, normalized) in normalize_all(raws, &mut report.warnings) {
        if let Some(first_close) = raw.first_close() {
            first_close_by_symbol.insert(raw.symbol.clone(), first_close);
        }
        report.series.push(percentage_series(&normalized));
        series_by_symbol.insert(raw.symbol.clone(), normalized);
        raw_by_symbol.insert(raw.symbol.clone(), raw);
    }

    match aggregate(&holdings.holdings, &series_by_symbol, &first_close_by_symbol) {
        Ok(curve) => {
            report.series.push(NamedSeries {
                name: PORTFOLIO_SERIES_NAME.to_string(),
                symbol: None,
                points: curve.points,
            });
            report.positions = summarize_positions(&holdings.holdings, &raw_by_symbol);
        }
        Err(e) => {
            warn!("Portfolio aggregation skipped: {}", e);
            report.portfolio_error = Some(e.to_string());
        }
    }
}

/// 归一化全部原始序列，失败的标的转为告警。
fn normalize_all(
    raws: Vec<RawSeries>,
    warnings: &mut Vec<InstrumentWarning>,
) -> Vec<(RawSeries, NormalizedSeries)> {
    raws.into_iter()
        .filter_map(|raw| match normalize(&raw) {
            Ok(normalized) => Some((raw, normalized)),
            Err(e) => {
                warnings.extend(to_warning(&raw.symbol, &e));
                None
            }
        })
        .collect()
}

/// 单标的涨跌幅图例序列 (退化的单持仓组合)。
fn percentage_series(normalized: &NormalizedSeries) -> NamedSeries {
    NamedSeries {
        name: format!("{} (% Change)", normalized.symbol),
        symbol: Some(normalized.symbol.clone()),
        points: single_instrument_curve(normalized).points,
    }
}

/// # Summary
/// 将单标的错误转为告警。
///
/// # Returns
/// 请求级或组合级错误不属于单标的告警，记录日志后返回 `None`。
fn to_warning(symbol: &str, error: &ChartError) -> Option<InstrumentWarning> {
    let Some(kind) = error.warning_kind() else {
        warn!("Unexpected non-instrument error for {}: {}", symbol, error);
        return None;
    };
    Some(InstrumentWarning {
        symbol: symbol.to_string(),
        kind,
        message: error.to_string(),
    })
}

fn dedup_symbols(symbols: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for s in symbols.iter().map(|s| normalize_symbol(s)) {
        if !s.is_empty() && !out.contains(&s) {
            out.push(s);
        }
    }
    out
}
