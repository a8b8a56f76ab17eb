use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tickerlens_core::chart::entity::ResolvedWindow;
use tickerlens_core::common::Instrument;
use tickerlens_core::config::FeedConfig;
use tickerlens_core::market::entity::Candle;
use tickerlens_core::market::error::MarketError;
use tickerlens_core::market::port::MarketDataProvider;
use tracing::debug;

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// # Summary
/// Yahoo Finance 行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - 固定请求日线 (`interval=1d`)。
#[derive(Clone)]
pub struct YahooProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
}

impl YahooProvider {
    /// # Summary
    /// 创建一个新的 YahooProvider 实例。
    ///
    /// # Logic
    /// 1. 安装 rustls 的 ring 加密后端 (进程内只生效一次)。
    /// 2. 按配置设置超时与伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    /// 3. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `config`: 行情源配置。
    ///
    /// # Returns
    /// 成功返回 YahooProvider，客户端构建失败返回 `MarketError::Network`。
    pub fn new(config: &FeedConfig) -> Result<Self, MarketError> {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed");
        }

        let mut headers = reqwest::header::HeaderMap::new();
        let user_agent = config
            .user_agent
            .parse()
            .map_err(|e| MarketError::Network(format!("invalid user agent: {}", e)))?;
        headers.insert(reqwest::header::USER_AGENT, user_agent);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| MarketError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

/// # Summary
/// Yahoo API 响应顶层结构。
///
/// # Invariants
/// - 映射自 Yahoo v8 chart 接口。
#[derive(Deserialize, Debug)]
struct YahooResponse {
    chart: YahooChart,
}

/// # Summary
/// Yahoo API 图表数据部分。
#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

/// # Summary
/// Yahoo API 错误详情。
#[derive(Deserialize, Debug)]
struct YahooError {
    code: Option<String>,
    description: String,
}

/// # Summary
/// Yahoo API 单个时间序列结果。
///
/// 窗口内无交易时 Yahoo 会省略 `timestamp` 字段。
#[derive(Deserialize, Debug)]
struct YahooResult {
    #[serde(default)]
    meta: YahooMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

/// # Summary
/// Yahoo API 元数据，仅使用交易所时区偏移。
#[derive(Deserialize, Debug, Default)]
struct YahooMeta {
    // 交易所相对 UTC 的偏移秒数 (如纽约冬令时为 -18000)
    #[serde(default)]
    gmtoffset: i64,
}

/// # Summary
/// Yahoo API 指标容器。
#[derive(Deserialize, Debug)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
    // 调整后的价格数据
    adjclose: Option<Vec<YahooAdjClose>>,
}

/// # Summary
/// Yahoo API 调整后价格结构。
#[derive(Deserialize, Debug)]
struct YahooAdjClose {
    // 调整后的收盘价列表
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// # Summary
/// Yahoo API 原始报价数据。
#[derive(Deserialize, Debug, Default)]
struct YahooQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// 闭区间日期 → Yahoo 的 `[period1, period2)` Unix 秒。
fn range_bounds(start: NaiveDate, end: NaiveDate) -> Result<(i64, i64), MarketError> {
    let next_day = end
        .succ_opt()
        .ok_or_else(|| MarketError::Unknown(format!("date out of range: {}", end)))?;
    let midnight = |d: NaiveDate| {
        d.and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .ok_or_else(|| MarketError::Unknown(format!("invalid date: {}", d)))
    };
    Ok((midnight(start)?, midnight(next_day)?))
}

/// # Summary
/// 将日线时间戳折算为所属交易日的 UTC 零点。
///
/// # Logic
/// 1. 加上交易所偏移得到交易所本地时间，取其日期。
/// 2. 返回该日期的 UTC 零点。
///
/// 盘中请求时最后一根日线的时间戳是各标的最近成交时间，
/// 折算后同一交易日的所有标的共享同一时间轴。
fn session_start(ts: i64, gmtoffset: i64) -> Result<DateTime<Utc>, MarketError> {
    let local = ts
        .checked_add(gmtoffset)
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .ok_or_else(|| MarketError::Parse(format!("invalid timestamp {}", ts)))?;
    local
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| MarketError::Parse(format!("invalid session date for {}", ts)))
}

/// 将窗口映射为 Yahoo 查询参数。
fn window_query(window: &ResolvedWindow) -> Result<Vec<(&'static str, String)>, MarketError> {
    let mut query = vec![
        ("interval", "1d".to_string()),
        ("includeAdjustedClose", "true".to_string()),
    ];
    match window {
        ResolvedWindow::Lookback(code) => query.push(("range", code.to_string())),
        ResolvedWindow::Range { start, end } => {
            let (period1, period2) = range_bounds(*start, *end)?;
            query.push(("period1", period1.to_string()));
            query.push(("period2", period2.to_string()));
        }
    }
    Ok(query)
}

/// # Summary
/// 将 Yahoo 响应体转换为 K 线列表。
///
/// # Logic
/// 1. 响应中携带 error 时按 code 映射为 NotFound 或 Unknown。
/// 2. 逐个时间戳合并 OHLCV 与 adjclose。
/// 3. 跳过收盘价为空的行 (停牌或当日未完成的数据)，其余缺失字段以收盘价/0 补齐。
/// 4. 时间统一为交易日的 UTC 零点。
fn candles_from_response(symbol: &str, json: YahooResponse) -> Result<Vec<Candle>, MarketError> {
    if let Some(err) = json.chart.error {
        return match err.code.as_deref() {
            Some("Not Found") => Err(MarketError::NotFound(format!(
                "{}: {}",
                symbol, err.description
            ))),
            _ => Err(MarketError::Unknown(err.description)),
        };
    }

    let result = json
        .chart
        .result
        .and_then(|mut r| r.pop())
        .ok_or_else(|| MarketError::NotFound(symbol.to_string()))?;

    let default_quote = YahooQuote::default();
    let quote = result.indicators.quote.first().unwrap_or(&default_quote);
    let adj_close_list = result
        .indicators
        .adjclose
        .as_ref()
        .and_then(|v| v.first())
        .map(|v| &v.adjclose);

    let mut candles = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let Some(close) = quote.close.get(i).and_then(|x| *x) else {
            continue;
        };
        let time = session_start(ts, result.meta.gmtoffset)?;

        candles.push(Candle {
            time,
            open: quote.open.get(i).and_then(|x| *x).unwrap_or(close),
            high: quote.high.get(i).and_then(|x| *x).unwrap_or(close),
            low: quote.low.get(i).and_then(|x| *x).unwrap_or(close),
            close,
            adj_close: adj_close_list.and_then(|list| list.get(i)).and_then(|x| *x),
            volume: quote.volume.get(i).and_then(|x| *x).unwrap_or(0.0),
        });
    }

    Ok(candles)
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    /// # Summary
    /// 从 Yahoo Finance 抓取日线历史数据。
    ///
    /// # Logic
    /// 1. 回溯窗口映射为 `range`，显式窗口映射为 `period1/period2`。
    /// 2. 发起异步请求，404 视为未知代码，429 视为限流。
    /// 3. 解析嵌套的 JSON 数据并合并 adjclose。
    ///
    /// # Arguments
    /// * `instrument`: 证券实体。
    /// * `window`: 已解析的时间窗口。
    ///
    /// # Returns
    /// 成功返回 K 线列表，失败返回 MarketError。
    async fn fetch_candles(
        &self,
        instrument: &Instrument,
        window: &ResolvedWindow,
    ) -> Result<Vec<Candle>, MarketError> {
        let symbol = &instrument.symbol;
        let url = format!("{}/{}", CHART_URL, symbol);
        let query = window_query(window)?;
        debug!("Requesting {} with {:?}", url, query);

        let resp = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        match resp.status() {
            StatusCode::NOT_FOUND => return Err(MarketError::NotFound(symbol.clone())),
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(MarketError::RateLimited(format!("HTTP 429 for {}", symbol)));
            }
            status if !status.is_success() => {
                return Err(MarketError::Network(format!("HTTP {}", status)));
            }
            _ => {}
        }

        let json: YahooResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        candles_from_response(symbol, json)
    }
}
