use crate::chart::entity::Preset;
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub feed: FeedConfig,
    pub chart: ChartConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    // 按行分隔的标的代码文件
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    // 数据源提供复权价时优先使用
    pub use_adjusted_close: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub default_symbols: Vec<String>,
    pub default_preset: Preset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    // EnvFilter 语法，RUST_LOG 优先
    pub level: String,
    // 设置后按天滚动写入该目录
    pub dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            catalog: CatalogConfig {
                path: "utils/tickers.txt".to_string(),
            },
            feed: FeedConfig {
                timeout_secs: 10,
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
                use_adjusted_close: true,
            },
            chart: ChartConfig {
                default_symbols: ["MSFT", "AMZN", "AAPL", "META", "GOOGL"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                default_preset: Preset::OneMonth,
            },
            log: LogConfig {
                level: "info".to_string(),
                dir: None,
            },
        }
    }
}
