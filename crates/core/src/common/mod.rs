use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// # Summary
/// 证券标的实体，代表用户选择对比的特定股票或资产。
///
/// # Invariants
/// - `symbol` 必须是数据源可识别的交易代码 (已去除首尾空白并转为大写)。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    // 股票代码 (例如: AAPL, MSFT)
    pub symbol: String,
    // 交易所代码 (可选，例如: NASDAQ)
    pub exchange: Option<String>,
}

impl Instrument {
    /// # Summary
    /// 根据用户输入的代码构造标的。
    ///
    /// # Logic
    /// 1. 去除首尾空白。
    /// 2. 统一转为大写，保证同一标的在各处使用同一个 Key。
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            exchange: None,
        }
    }
}

/// 统一证券代码格式 (trim + 大写)。
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// # Summary
/// 时间序列中的单个观测点。
///
/// # Invariants
/// - 同一序列内 `time` 严格递增。
/// - `value` 的含义由所属序列决定 (收盘价、涨跌幅百分比等)。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    // 观测时间
    pub time: DateTime<Utc>,
    // 观测值
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(time: DateTime<Utc>, value: f64) -> Self {
        Self { time, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_symbol_is_normalized() {
        let instrument = Instrument::new("  msft ");
        assert_eq!(instrument.symbol, "MSFT");
        assert!(instrument.exchange.is_none());
    }
}
