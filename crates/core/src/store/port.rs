use super::error::StoreError;
use crate::portfolio::entity::{Holding, HoldingDraft, HoldingId, HoldingsSnapshot};
use async_trait::async_trait;

/// # Summary
/// 可选标的目录接口，进程启动时加载一次。
///
/// # Invariants
/// - 保留来源顺序，不去重。
#[async_trait]
pub trait InstrumentCatalog: Send + Sync {
    /// # Summary
    /// 列出全部可选的证券代码。
    ///
    /// # Returns
    /// 按来源顺序返回代码列表。
    async fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// # Summary
/// 会话内持仓列表存储接口。
///
/// # Invariants
/// - 写操作串行执行，每次成功写入使快照版本号递增。
/// - 计算层只读取 `snapshot()` 返回的副本，不持有内部引用。
#[async_trait]
pub trait HoldingStore: Send + Sync {
    /// # Summary
    /// 新增持仓。
    ///
    /// # Logic
    /// 1. 校验草稿 (非负数量与成本)。
    /// 2. 分配新的 `HoldingId` 并追加到列表末尾。
    ///
    /// # Arguments
    /// * `draft`: 持仓字段。
    ///
    /// # Returns
    /// 成功返回新持仓，校验失败返回 `StoreError::InvalidInput`。
    async fn add(&self, draft: HoldingDraft) -> Result<Holding, StoreError>;

    /// # Summary
    /// 编辑已有持仓，保持其在列表中的位置。
    ///
    /// # Returns
    /// 成功返回更新后的持仓，ID 不存在返回 `StoreError::NotFound`。
    async fn update(&self, id: &HoldingId, draft: HoldingDraft) -> Result<Holding, StoreError>;

    /// # Summary
    /// 删除持仓。
    ///
    /// # Returns
    /// 成功返回被删除的持仓，ID 不存在返回 `StoreError::NotFound`。
    async fn remove(&self, id: &HoldingId) -> Result<Holding, StoreError>;

    /// 获取当前持仓列表的版本化快照。
    async fn snapshot(&self) -> Result<HoldingsSnapshot, StoreError>;
}
