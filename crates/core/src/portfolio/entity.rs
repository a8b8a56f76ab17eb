use crate::common::normalize_symbol;
use crate::store::error::StoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 持仓的会话内唯一标识。
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct HoldingId(pub String);

impl std::fmt::Display for HoldingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// # Summary
/// 用户声明的持仓，参与组合估值。
///
/// # Invariants
/// - `quantity >= 0`，`cost_basis_per_unit >= 0`。
/// - 只通过显式的新增、编辑、删除动作变更，计算过程从不修改持仓。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    // 持仓唯一标识
    pub id: HoldingId,
    // 标的代码
    pub symbol: String,
    // 持有数量
    pub quantity: Decimal,
    // 单位持仓成本
    pub cost_basis_per_unit: Decimal,
}

/// # Summary
/// 新增或编辑持仓时提交的字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingDraft {
    pub symbol: String,
    pub quantity: Decimal,
    pub cost_basis_per_unit: Decimal,
}

impl HoldingDraft {
    /// # Summary
    /// 校验并规范化草稿。
    ///
    /// # Logic
    /// 1. 规范化代码 (trim + 大写)，拒绝空代码。
    /// 2. 拒绝负数量与负成本，除此之外不做其它校验。
    ///
    /// # Returns
    /// 成功返回规范化后的草稿，失败返回 `StoreError::InvalidInput`。
    pub fn validated(self) -> Result<Self, StoreError> {
        let symbol = normalize_symbol(&self.symbol);
        if symbol.is_empty() {
            return Err(StoreError::InvalidInput("symbol must not be empty".into()));
        }
        if self.quantity < Decimal::ZERO {
            return Err(StoreError::InvalidInput(format!(
                "quantity must be >= 0, got {}",
                self.quantity
            )));
        }
        if self.cost_basis_per_unit < Decimal::ZERO {
            return Err(StoreError::InvalidInput(format!(
                "cost basis must be >= 0, got {}",
                self.cost_basis_per_unit
            )));
        }
        Ok(Self { symbol, ..self })
    }
}

/// # Summary
/// 持仓列表的不可变版本化快照，每次计算传入一份。
///
/// # Invariants
/// - `version` 在每次成功的新增、编辑、删除后单调递增。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HoldingsSnapshot {
    pub version: u64,
    pub holdings: Vec<Holding>,
}

impl HoldingsSnapshot {
    /// 快照中出现的标的代码，按首次出现顺序去重。
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = Vec::new();
        for holding in &self.holdings {
            if !symbols.contains(&holding.symbol) {
                symbols.push(holding.symbol.clone());
            }
        }
        symbols
    }
}
