//! # `tickerlens-chart` - 图表计算核心
//!
//! - `resolver`: 用户窗口选择 → 数据源窗口
//! - `normalizer`: 原始收盘价序列 → 涨跌幅序列
//! - `aggregator`: 多个涨跌幅序列 → 按期初市值加权的组合曲线
//! - `valuation`: 组合模式下的持仓估值摘要
//! - `service`: 串联以上步骤并并发抓取行情的编排服务

pub mod aggregator;
pub mod normalizer;
pub mod resolver;
pub mod service;
pub mod valuation;
