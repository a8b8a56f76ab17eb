use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;
use tickerlens_core::chart::entity::{NormalizedSeries, PortfolioCurve};
use tickerlens_core::chart::error::ChartError;
use tickerlens_core::common::SeriesPoint;
use tickerlens_core::portfolio::entity::Holding;

/// # Summary
/// 持仓权重：期初市值 `quantity * first_close`。
pub fn weight(quantity: Decimal, first_close: f64) -> f64 {
    quantity.to_f64().unwrap_or(0.0) * first_close
}

/// 参与加权的单个持仓
struct Participant<'a> {
    series: &'a NormalizedSeries,
    weight: f64,
}

/// # Summary
/// 校验所有参与序列与基准时间轴完全一致。
///
/// # Logic
/// 1. 长度不同直接失败，不做截断或补零。
/// 2. 逐点比较时间戳。
fn ensure_aligned(axis: &NormalizedSeries, participants: &[Participant<'_>]) -> Result<(), ChartError> {
    for p in participants {
        if p.series.len() != axis.len() {
            return Err(ChartError::MisalignedSeries {
                symbol: p.series.symbol.clone(),
                detail: format!(
                    "{} points, expected {} (axis of {})",
                    p.series.len(),
                    axis.len(),
                    axis.symbol
                ),
            });
        }
        if let Some((got, want)) = p
            .series
            .points
            .iter()
            .zip(&axis.points)
            .find(|(got, want)| got.time != want.time)
        {
            return Err(ChartError::MisalignedSeries {
                symbol: p.series.symbol.clone(),
                detail: format!("timestamp {} where {} expected", got.time, want.time),
            });
        }
    }
    Ok(())
}

/// # Summary
/// 将多个持仓的涨跌幅序列按期初市值加权合成为组合曲线。
///
/// # Logic
/// 1. 剔除没有归一化序列或首收盘价的持仓 (其标的归一化失败)。
/// 2. 校验参与序列共享同一时间轴，否则返回 `MisalignedSeries`。
/// 3. 计算总权重，`<= 0` 或非有限值返回 `ZeroTotalValue`。
/// 4. 逐点计算 `Σ pct_h[i] * (w_h / Σw)`。
///
/// 先求权重占比再相乘，单一持仓时占比恰为 1，输出与其自身序列逐位相同。
///
/// # Arguments
/// * `holdings`: 持仓快照中的持仓列表，不会被修改。
/// * `series_by_symbol`: 归一化成功的各标的序列。
/// * `first_close_by_symbol`: 各标的窗口首个收盘价。
///
/// # Returns
/// 成功返回新的 `PortfolioCurve`。
pub fn aggregate(
    holdings: &[Holding],
    series_by_symbol: &HashMap<String, NormalizedSeries>,
    first_close_by_symbol: &HashMap<String, f64>,
) -> Result<PortfolioCurve, ChartError> {
    let participants: Vec<Participant<'_>> = holdings
        .iter()
        .filter_map(|h| {
            let series = series_by_symbol.get(&h.symbol)?;
            let first_close = first_close_by_symbol.get(&h.symbol)?;
            Some(Participant {
                series,
                weight: weight(h.quantity, *first_close),
            })
        })
        .collect();

    let Some(axis) = participants.first().map(|p| p.series) else {
        return Err(ChartError::ZeroTotalValue);
    };
    ensure_aligned(axis, &participants)?;

    let total: f64 = participants.iter().map(|p| p.weight).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(ChartError::ZeroTotalValue);
    }

    Ok(weighted_curve(axis, &participants, total))
}

/// # Summary
/// 按预先算好的权重逐点求和：`Σ pct_h[i] * (w_h / total)`。
///
/// 调用方保证参与序列已对齐且 `total > 0`。
fn weighted_curve(
    axis: &NormalizedSeries,
    participants: &[Participant<'_>],
    total: f64,
) -> PortfolioCurve {
    let mut values = vec![0.0_f64; axis.len()];
    for p in participants {
        let share = p.weight / total;
        for (acc, point) in values.iter_mut().zip(&p.series.points) {
            *acc += point.value * share;
        }
    }

    let points = axis
        .points
        .iter()
        .zip(values)
        .map(|(axis_point, value)| SeriesPoint::new(axis_point.time, value))
        .collect();

    PortfolioCurve { points }
}

/// # Summary
/// 单标的涨跌幅曲线：仅含一个单位权重持仓的退化组合。
///
/// 权重与锚点价格的符号无关，负价格标的同样输出其自身序列。
///
/// # Arguments
/// * `series`: 该标的的归一化序列。
pub fn single_instrument_curve(series: &NormalizedSeries) -> PortfolioCurve {
    let participant = Participant {
        series,
        weight: 1.0,
    };
    weighted_curve(series, &[participant], 1.0)
}
