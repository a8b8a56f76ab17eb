//! # `tickerlens-api` - HTTP API 层
//!
//! 本 crate 是 Tickerlens 的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自浏览器仪表盘的 HTTP 请求
//! - 将图表请求交给 `ChartService` 计算，持仓读写交给 `HoldingStore`
//! - 将领域模型转换为 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
