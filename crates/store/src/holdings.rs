use async_trait::async_trait;
use tickerlens_core::portfolio::entity::{Holding, HoldingDraft, HoldingId, HoldingsSnapshot};
use tickerlens_core::store::error::StoreError;
use tickerlens_core::store::port::HoldingStore;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// # Summary
/// 基于内存的会话持仓列表实现。
///
/// 作为 `HoldingStore` 的适配器，进程退出即丢失，不做持久化。
///
/// # Invariants
/// - 所有写操作持有写锁串行执行。
/// - 每次成功写入使 `version` 加一。
pub struct MemoryHoldingStore {
    state: RwLock<HoldingsSnapshot>,
}

impl MemoryHoldingStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HoldingsSnapshot::default()),
        }
    }
}

impl Default for MemoryHoldingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HoldingStore for MemoryHoldingStore {
    async fn add(&self, draft: HoldingDraft) -> Result<Holding, StoreError> {
        let draft = draft.validated()?;
        let holding = Holding {
            id: HoldingId(Uuid::new_v4().to_string()),
            symbol: draft.symbol,
            quantity: draft.quantity,
            cost_basis_per_unit: draft.cost_basis_per_unit,
        };

        let mut state = self.state.write().await;
        state.holdings.push(holding.clone());
        state.version += 1;
        info!("Holding {} added ({})", holding.id, holding.symbol);
        Ok(holding)
    }

    async fn update(&self, id: &HoldingId, draft: HoldingDraft) -> Result<Holding, StoreError> {
        let draft = draft.validated()?;

        let mut state = self.state.write().await;
        let holding = state
            .holdings
            .iter_mut()
            .find(|h| h.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        holding.symbol = draft.symbol;
        holding.quantity = draft.quantity;
        holding.cost_basis_per_unit = draft.cost_basis_per_unit;
        let updated = holding.clone();
        state.version += 1;

        info!("Holding {} updated", id);
        Ok(updated)
    }

    async fn remove(&self, id: &HoldingId) -> Result<Holding, StoreError> {
        let mut state = self.state.write().await;
        let index = state
            .holdings
            .iter()
            .position(|h| h.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = state.holdings.remove(index);
        state.version += 1;

        info!("Holding {} removed", id);
        Ok(removed)
    }

    async fn snapshot(&self) -> Result<HoldingsSnapshot, StoreError> {
        Ok(self.state.read().await.clone())
    }
}
