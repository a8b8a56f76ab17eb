use crate::common::SeriesPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// # Summary
/// 单根 K 线数据实体，记录特定时段内的行情波动。
///
/// # Invariants
/// - `high` 必须大于或等于 `low`, `open`, `close`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    // K 线开始时间
    pub time: DateTime<Utc>,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
    // 调整后收盘价 (数据源已处理分红、拆股时提供)
    pub adj_close: Option<f64>,
    // 成交量
    pub volume: f64,
}

impl Candle {
    /// # Summary
    /// 选取用于计算的收盘价。
    ///
    /// # Logic
    /// 1. 若要求使用复权价且数据源提供了 `adj_close`，返回复权价。
    /// 2. 否则返回原始收盘价。
    pub fn effective_close(&self, use_adjusted: bool) -> f64 {
        match (use_adjusted, self.adj_close) {
            (true, Some(adj)) => adj,
            _ => self.close,
        }
    }
}

/// # Summary
/// 单个标的在某窗口内的原始收盘价序列。
///
/// # Invariants
/// - `points` 按时间严格递增。
/// - 允许为空 (数据源在该窗口内无数据)。
/// - 仅在单次计算中临时持有，不做缓存。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeries {
    // 标的代码
    pub symbol: String,
    // (时间, 收盘价) 序列
    pub points: Vec<SeriesPoint>,
}

impl RawSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    /// # Summary
    /// 由数据源返回的 K 线构造原始序列。
    ///
    /// # Logic
    /// 1. 按 `use_adjusted` 选取每根 K 线的收盘价。
    /// 2. 丢弃收盘价非有限值 (NaN/Inf) 的 K 线。
    /// 3. 按时间排序并丢弃重复时间戳，保证严格递增。
    ///
    /// # Arguments
    /// * `symbol`: 标的代码。
    /// * `candles`: 数据源返回的 K 线。
    /// * `use_adjusted`: 是否优先使用复权收盘价。
    ///
    /// # Returns
    /// 返回原始序列，可能为空。
    pub fn from_candles(symbol: impl Into<String>, candles: &[Candle], use_adjusted: bool) -> Self {
        let mut points: Vec<SeriesPoint> = candles
            .iter()
            .map(|c| SeriesPoint::new(c.time, c.effective_close(use_adjusted)))
            .filter(|p| p.value.is_finite())
            .collect();
        points.sort_by_key(|p| p.time);
        points.dedup_by_key(|p| p.time);

        Self::new(symbol, points)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 窗口首个观测的收盘价 (即组合权重的锚点价格)。
    pub fn first_close(&self) -> Option<f64> {
        self.points.first().map(|p| p.value)
    }

    /// 窗口最后一个观测的收盘价。
    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }
}
