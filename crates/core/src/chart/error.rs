use super::entity::WarningKind;
use chrono::NaiveDate;
use thiserror::Error;

/// # Summary
/// 图表计算域错误枚举，覆盖窗口解析、序列归一化与组合聚合。
///
/// # Invariants
/// - `NoData` 与 `DegenerateAnchor` 属于单标的错误，调用方只剔除该标的。
/// - `InvalidWindow` 终止整个请求。
/// - `MisalignedSeries` 与 `ZeroTotalValue` 只终止组合聚合。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    // 显式窗口起始日期晚于结束日期
    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
    // 数据源在该窗口内无数据或请求失败
    #[error("No data for {0}")]
    NoData(String),
    // 首个收盘价为 0 或非有限值，无法作为锚点
    #[error("Degenerate anchor price for {0}")]
    DegenerateAnchor(String),
    // 参与聚合的序列时间轴不一致
    #[error("Misaligned series for {symbol}: {detail}")]
    MisalignedSeries { symbol: String, detail: String },
    // 组合期初总市值为 0
    #[error("Total portfolio value at window start is zero")]
    ZeroTotalValue,
}

impl ChartError {
    /// # Summary
    /// 单标的错误对应的告警类型。
    ///
    /// # Returns
    /// `NoData` 与 `DegenerateAnchor` 返回对应类型，其余 (请求级或组合级) 返回 `None`。
    pub fn warning_kind(&self) -> Option<WarningKind> {
        match self {
            ChartError::NoData(_) => Some(WarningKind::NoData),
            ChartError::DegenerateAnchor(_) => Some(WarningKind::DegenerateAnchor),
            ChartError::InvalidWindow { .. }
            | ChartError::MisalignedSeries { .. }
            | ChartError::ZeroTotalValue => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_instrument_errors_map_to_warnings() {
        assert_eq!(
            ChartError::NoData("X".into()).warning_kind(),
            Some(WarningKind::NoData)
        );
        assert_eq!(
            ChartError::DegenerateAnchor("X".into()).warning_kind(),
            Some(WarningKind::DegenerateAnchor)
        );
        assert_eq!(ChartError::ZeroTotalValue.warning_kind(), None);
        assert_eq!(
            ChartError::MisalignedSeries {
                symbol: "X".into(),
                detail: "1 points, expected 2".into(),
            }
            .warning_kind(),
            None
        );
    }
}
