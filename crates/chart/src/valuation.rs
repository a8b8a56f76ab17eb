use crate::aggregator::weight;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::collections::HashMap;
use tickerlens_core::chart::entity::PositionSummary;
use tickerlens_core::market::entity::RawSeries;
use tickerlens_core::portfolio::entity::Holding;

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// # Summary
/// 计算组合模式下每个持仓的估值摘要。
///
/// # Logic
/// 1. 仅处理在 `included` 中出现的标的 (与组合曲线的参与者一致)。
/// 2. 期初市值、期末市值、成本按数量相乘得到，未实现盈亏 = 期末市值 - 成本。
/// 3. 权重占比按期初市值 (与聚合器相同的权重公式) 计算。
///
/// # Arguments
/// * `holdings`: 持仓列表。
/// * `raw_by_symbol`: 参与组合的标的原始序列。
///
/// # Returns
/// 按持仓顺序排列的摘要列表。
pub fn summarize_positions(
    holdings: &[Holding],
    raw_by_symbol: &HashMap<String, RawSeries>,
) -> Vec<PositionSummary> {
    let closes: Vec<(&Holding, f64, f64)> = holdings
        .iter()
        .filter_map(|h| {
            let raw = raw_by_symbol.get(&h.symbol)?;
            Some((h, raw.first_close()?, raw.last_close()?))
        })
        .collect();

    let total: f64 = closes
        .iter()
        .map(|(h, first, _)| weight(h.quantity, *first))
        .sum();

    closes
        .into_iter()
        .map(|(h, first_close, last_close)| {
            let start_value = h.quantity * to_decimal(first_close);
            let market_value = h.quantity * to_decimal(last_close);
            let cost_value = h.quantity * h.cost_basis_per_unit;
            let weight_pct = if total > 0.0 {
                weight(h.quantity, first_close) / total * 100.0
            } else {
                0.0
            };

            PositionSummary {
                symbol: h.symbol.clone(),
                quantity: h.quantity,
                cost_basis_per_unit: h.cost_basis_per_unit,
                first_close,
                last_close,
                start_value,
                market_value,
                cost_value,
                unrealized_pnl: market_value - cost_value,
                weight_pct,
            }
        })
        .collect()
}
