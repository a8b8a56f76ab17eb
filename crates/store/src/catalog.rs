use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tickerlens_core::store::error::StoreError;
use tickerlens_core::store::port::InstrumentCatalog;
use tracing::info;

/// # Summary
/// 基于按行分隔文本文件的标的目录实现。
///
/// # Invariants
/// - 进程启动时加载一次，之后只读。
/// - 保留文件中的顺序与重复项。
pub struct FileInstrumentCatalog {
    // 来源文件路径
    path: PathBuf,
    // 已解析的代码列表
    symbols: Vec<String>,
}

impl FileInstrumentCatalog {
    /// # Summary
    /// 从文件加载标的目录。
    ///
    /// # Logic
    /// 1. 读取整个文件。
    /// 2. 逐行去除首尾空白，跳过空行。
    ///
    /// # Arguments
    /// * `path`: 目录文件路径。
    ///
    /// # Returns
    /// 成功返回目录实例，文件不可读返回 `StoreError::InitError`。
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::InitError(format!("{}: {}", path.display(), e)))?;

        let symbols = parse_lines(&text);
        info!("Loaded {} instruments from {}", symbols.len(), path.display());
        Ok(Self { path, symbols })
    }

    /// 由内存中的代码列表构造 (用于嵌入式目录或测试)。
    pub fn from_symbols(symbols: Vec<String>) -> Self {
        Self {
            path: PathBuf::new(),
            symbols,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// 每行一个代码，保序不去重。
fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl InstrumentCatalog for FileInstrumentCatalog {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.symbols.clone())
    }
}
