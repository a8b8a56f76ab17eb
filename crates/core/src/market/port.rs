use crate::chart::entity::ResolvedWindow;
use crate::common::Instrument;
use crate::market::entity::Candle;
use crate::market::error::MarketError;
use async_trait::async_trait;

/// # Summary
/// 市场行情数据提供者接口（原始数据源）。
///
/// # Invariants
/// - 返回的 K 线按时间递增排列。
/// - 对同一窗口、同一交易日历，不同标的的时间轴应一致。
/// - 实现者不得自行重试，失败直接上抛。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// # Summary
    /// 获取特定证券在指定窗口内的日线数据。
    ///
    /// # Logic
    /// 1. 将已解析窗口映射为数据源请求参数 (回溯代码或起止日期)。
    /// 2. 执行网络请求并解析响应数据。
    ///
    /// # Arguments
    /// * `instrument`: 证券身份。
    /// * `window`: 已解析的时间窗口。
    ///
    /// # Returns
    /// 成功返回 K 线列表 (可能为空)，失败返回 MarketError。
    async fn fetch_candles(
        &self,
        instrument: &Instrument,
        window: &ResolvedWindow,
    ) -> Result<Vec<Candle>, MarketError>;
}
