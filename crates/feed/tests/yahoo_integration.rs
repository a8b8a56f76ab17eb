use chrono::{Duration as ChronoDuration, Utc};
use tickerlens_core::chart::entity::{LookbackCode, ResolvedWindow};
use tickerlens_core::common::Instrument;
use tickerlens_core::config::AppConfig;
use tickerlens_core::market::port::MarketDataProvider;
use tickerlens_feed::yahoo::YahooProvider;

/// # Summary
/// 雅虎财经回溯窗口抓取的集成测试 (需要外网，默认忽略)。
///
/// # Logic
/// 1. 初始化 YahooProvider。
/// 2. 抓取 AAPL 最近一个月的日线数据。
/// 3. 断言数据非空且时间严格递增。
#[tokio::test]
#[ignore = "requires network access to Yahoo Finance"]
async fn test_yahoo_real_fetch_lookback() -> anyhow::Result<()> {
    let provider = YahooProvider::new(&AppConfig::default().feed)?;
    let instrument = Instrument::new("AAPL");

    let candles = provider
        .fetch_candles(&instrument, &ResolvedWindow::Lookback(LookbackCode::Month1))
        .await?;

    assert!(!candles.is_empty(), "Candles list should not be empty");
    assert!(candles.windows(2).all(|w| w[0].time < w[1].time));

    println!("Successfully fetched {} candles for AAPL", candles.len());
    for candle in candles.iter() {
        println!("{:?}: Close = {}", candle.time, candle.close);
    }
    Ok(())
}

/// # Summary
/// 雅虎财经显式日期窗口抓取的集成测试 (需要外网，默认忽略)。
#[tokio::test]
#[ignore = "requires network access to Yahoo Finance"]
async fn test_yahoo_real_fetch_explicit_range() -> anyhow::Result<()> {
    let provider = YahooProvider::new(&AppConfig::default().feed)?;
    let end = Utc::now().date_naive();
    let start = end - ChronoDuration::days(14);

    let candles = provider
        .fetch_candles(&Instrument::new("MSFT"), &ResolvedWindow::Range { start, end })
        .await?;

    assert!(!candles.is_empty());
    assert!(candles.iter().all(|c| c.close > 0.0));
    Ok(())
}

/// # Summary
/// 不存在的代码应返回错误而非空数据 (需要外网，默认忽略)。
#[tokio::test]
#[ignore = "requires network access to Yahoo Finance"]
async fn test_yahoo_unknown_symbol() -> anyhow::Result<()> {
    let provider = YahooProvider::new(&AppConfig::default().feed)?;

    let result = provider
        .fetch_candles(
            &Instrument::new("THIS-IS-NOT-A-TICKER-42"),
            &ResolvedWindow::Lookback(LookbackCode::Day5),
        )
        .await;

    println!("收到结果: {:?}", result.as_ref().map(|c| c.len()));
    assert!(result.is_err());
    Ok(())
}
