use thiserror::Error;

/// # Summary
/// 存储层错误枚举，处理目录加载、持仓读写失败等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// 记录未找到
    #[error("Not found: {0}")]
    NotFound(String),
    /// 输入不合法 (如负数量)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// 初始化存储失败
    #[error("Initialization error: {0}")]
    InitError(String),
    /// 未知或未分类的错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}
