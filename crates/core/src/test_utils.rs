//! 测试辅助：可预设响应的内存行情源。

use crate::chart::entity::ResolvedWindow;
use crate::common::Instrument;
use crate::market::entity::Candle;
use crate::market::error::MarketError;
use crate::market::port::MarketDataProvider;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use dashmap::DashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 预设的单标的响应
#[derive(Debug, Clone)]
enum Canned {
    Candles(Vec<Candle>),
    Failure(String),
}

/// # Summary
/// 返回预设 K 线的行情源，未登记的代码返回 `MarketError::NotFound`。
///
/// # Invariants
/// - 记录调用次数与最近一次请求的窗口，供断言使用。
#[derive(Default)]
pub struct StaticMarketProvider {
    responses: DashMap<String, Canned>,
    calls: AtomicUsize,
    last_window: Mutex<Option<ResolvedWindow>>,
}

impl StaticMarketProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一组日线收盘价，从 `start` 起每天一根。
    pub fn with_closes(self, symbol: &str, start: DateTime<Utc>, closes: &[f64]) -> Self {
        self.responses.insert(
            symbol.to_string(),
            Canned::Candles(daily_candles(start, closes)),
        );
        self
    }

    /// 登记任意 K 线。
    pub fn with_candles(self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.responses
            .insert(symbol.to_string(), Canned::Candles(candles));
        self
    }

    /// 登记一次网络失败。
    pub fn with_failure(self, symbol: &str, message: &str) -> Self {
        self.responses
            .insert(symbol.to_string(), Canned::Failure(message.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_window(&self) -> Option<ResolvedWindow> {
        *self.last_window.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketProvider {
    async fn fetch_candles(
        &self,
        instrument: &Instrument,
        window: &ResolvedWindow,
    ) -> Result<Vec<Candle>, MarketError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_window.lock().unwrap_or_else(|e| e.into_inner()) = Some(*window);

        match self.responses.get(&instrument.symbol).map(|r| r.value().clone()) {
            Some(Canned::Candles(candles)) => Ok(candles),
            Some(Canned::Failure(message)) => Err(MarketError::Network(message)),
            None => Err(MarketError::NotFound(instrument.symbol.clone())),
        }
    }
}

/// 固定的测试起始日 (2024-01-02 UTC)。
pub fn test_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// 由收盘价生成逐日 K 线 (OHLC 取同一价格)。
pub fn daily_candles(start: DateTime<Utc>, closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .zip(0_i64..)
        .map(|(&close, day)| Candle {
            time: start + Duration::days(day),
            open: close,
            high: close,
            low: close,
            close,
            adj_close: None,
            volume: 1000.0,
        })
        .collect()
}
