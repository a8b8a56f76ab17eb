use tickerlens_core::chart::entity::NormalizedSeries;
use tickerlens_core::chart::error::ChartError;
use tickerlens_core::common::SeriesPoint;
use tickerlens_core::market::entity::RawSeries;

/// 相对锚点价格的涨跌幅 (%)。
fn pct_change(value: f64, anchor: f64) -> f64 {
    (value - anchor) / anchor * 100.0
}

/// # Summary
/// 将原始收盘价序列转换为以窗口首个观测为锚点的涨跌幅序列。
///
/// # Logic
/// 1. 序列为空返回 `NoData`。
/// 2. 首个收盘价为 0 或非有限值返回 `DegenerateAnchor`。
/// 3. 逐点计算 `(close - close0) / close0 * 100`，首点固定为 0。
///
/// 纯函数，不做任何舍入。
///
/// # Arguments
/// * `raw`: 单个标的的原始序列。
///
/// # Returns
/// 成功返回与输入等长、时间戳一致的 `NormalizedSeries`。
pub fn normalize(raw: &RawSeries) -> Result<NormalizedSeries, ChartError> {
    let anchor = raw
        .first_close()
        .ok_or_else(|| ChartError::NoData(raw.symbol.clone()))?;

    if anchor == 0.0 || !anchor.is_finite() {
        return Err(ChartError::DegenerateAnchor(raw.symbol.clone()));
    }

    let points = raw
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let value = if i == 0 { 0.0 } else { pct_change(p.value, anchor) };
            SeriesPoint::new(p.time, value)
        })
        .collect();

    Ok(NormalizedSeries {
        symbol: raw.symbol.clone(),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerlens_core::test_utils::{daily_candles, test_start};

    fn raw(symbol: &str, closes: &[f64]) -> RawSeries {
        RawSeries::from_candles(symbol, &daily_candles(test_start(), closes), false)
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_normalize_anchors_first_point_at_zero() {
        for closes in [
            vec![100.0, 110.0, 90.0],
            vec![0.37, 0.41],
            vec![-12.5, -10.0, -15.0],
            vec![123.456],
        ] {
            let series = normalize(&raw("X", &closes)).unwrap_or_else(|e| panic!("{e}"));
            assert_eq!(series.points[0].value, 0.0);
            assert!(series.points[0].value.is_sign_positive());
        }
    }

    #[test]
    fn test_normalize_known_values() {
        let a = normalize(&raw("A", &[100.0, 110.0, 90.0])).unwrap_or_else(|e| panic!("{e}"));
        assert_close(&a.values(), &[0.0, 10.0, -10.0]);

        let b = normalize(&raw("B", &[50.0, 55.0, 45.0])).unwrap_or_else(|e| panic!("{e}"));
        assert_close(&b.values(), &[0.0, 10.0, -10.0]);
    }

    #[test]
    fn test_normalize_preserves_length_and_timestamps() {
        let source = raw("MSFT", &[10.0, 11.0, 12.0, 9.0, 10.5]);
        let normalized = normalize(&source).unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(normalized.len(), source.len());
        for (n, r) in normalized.points.iter().zip(&source.points) {
            assert_eq!(n.time, r.time);
        }
        assert!(normalized.points.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let source = raw("AMZN", &[181.3, 179.9, 185.07, 0.5]);
        assert_eq!(normalize(&source), normalize(&source));
    }

    #[test]
    fn test_normalize_failures() {
        let empty = RawSeries::new("EMPTY", vec![]);
        assert_eq!(normalize(&empty), Err(ChartError::NoData("EMPTY".into())));

        let zero = raw("ZERO", &[0.0, 1.0]);
        assert_eq!(normalize(&zero), Err(ChartError::DegenerateAnchor("ZERO".into())));

        let inf = RawSeries::new(
            "INF",
            vec![SeriesPoint::new(test_start(), f64::INFINITY)],
        );
        assert_eq!(normalize(&inf), Err(ChartError::DegenerateAnchor("INF".into())));
    }
}
