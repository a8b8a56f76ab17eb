//! # 启动引导
//!
//! 配置加载与日志初始化，供 `main` 在组装依赖前调用。

use config::{Config, ConfigError, Environment, File};
use tickerlens_core::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// 默认配置文件 (不含扩展名)
pub const CONFIG_FILE: &str = "config/tickerlens";
/// 环境变量前缀，例如 `TICKERLENS__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "TICKERLENS";

/// # Summary
/// 分层加载应用配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 为底。
/// 2. 叠加可选的配置文件 (toml / yaml / json 均可)。
/// 3. 叠加 `TICKERLENS__` 前缀的环境变量，`__` 分隔层级。
///
/// # Arguments
/// * `file`: 配置文件路径 (不含扩展名)，文件不存在时忽略。
pub fn load_config(file: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("chart.default_symbols")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

/// # Summary
/// 初始化全局 tracing 订阅者。
///
/// # Logic
/// 1. `RUST_LOG` 存在时优先，否则使用配置中的 `log.level`。
/// 2. 配置了 `log.dir` 时额外按天滚动写入文件 (非阻塞写入)。
///
/// # Returns
/// 文件写入的 guard，必须持有到进程结束，否则缓冲日志会丢失。
pub fn init_tracing(config: &AppConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    match &config.log.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "tickerlens.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tickerlens_core::chart::entity::Preset;

    #[test]
    fn test_missing_file_yields_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("absent");
        let config = load_config(&path.to_string_lossy())?;

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.chart.default_symbols.len(), 5);
        assert!(config.log.dir.is_none());
        Ok(())
    }

    #[test]
    fn test_file_overrides_defaults() -> anyhow::Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(
            file,
            r#"
[server]
port = 9100

[chart]
default_symbols = ["NVDA", "TSLA"]
default_preset = "6M"
"#
        )?;
        let path = file.path().with_extension("");
        let config = load_config(&path.to_string_lossy())?;

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.chart.default_symbols, vec!["NVDA", "TSLA"]);
        assert_eq!(config.chart.default_preset, Preset::SixMonths);
        assert!(config.feed.use_adjusted_close);
        Ok(())
    }
}
