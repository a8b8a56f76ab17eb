//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use tickerlens_core::chart::entity::{
    ChartMode, ChartReport, InstrumentWarning, NamedSeries, PositionSummary, Preset, WarningKind,
};
use tickerlens_core::common::SeriesPoint;
use tickerlens_core::portfolio::entity::{Holding, HoldingDraft, HoldingsSnapshot};

// ============================================================
//  图表相关 DTO
// ============================================================

/// 图表计算请求体
///
/// `preset` 与 `start/end` 二选一；都不提供时使用配置中的默认预设。
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ChartRequestBody {
    /// 图表模式 (price / percentage_change / portfolio)
    #[schema(example = "percentage_change")]
    pub mode: String,
    /// 预设时间窗口 (1D, 5D, 1M, 3M, 6M, 1Y, 5Y)
    #[schema(example = "1M")]
    #[serde(default)]
    pub preset: Option<String>,
    /// 显式起始日期 (含)
    #[schema(example = "2024-01-02")]
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// 显式结束日期 (含)
    #[schema(example = "2024-03-28")]
    #[serde(default)]
    pub end: Option<NaiveDate>,
    /// 对比标的，缺省时使用配置中的默认标的；组合模式下忽略
    #[schema(example = json!(["MSFT", "AAPL"]))]
    #[serde(default)]
    pub symbols: Option<Vec<String>>,
}

/// 序列中的单个点
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointResponse {
    /// 时间戳 (ISO 8601)
    #[schema(example = "2024-01-02T14:30:00+00:00")]
    pub time: String,
    /// 数值 (价格或涨跌幅百分比)
    #[schema(example = 2.35)]
    pub value: f64,
}

/// 一条可绘制的曲线
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeriesResponse {
    /// 图例名称
    #[schema(example = "AAPL (% Change)")]
    pub name: String,
    /// 对应标的 (组合曲线为 null)
    #[schema(example = "AAPL")]
    pub symbol: Option<String>,
    pub points: Vec<PointResponse>,
}

/// 被剔除标的的告警
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WarningResponse {
    #[schema(example = "XYZ")]
    pub symbol: String,
    /// 告警类型 (NoData / DegenerateAnchor)
    #[schema(example = "NoData")]
    pub kind: String,
    #[schema(example = "Error fetching data for XYZ: resource not found: XYZ")]
    pub message: String,
}

/// 组合持仓估值摘要
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PositionResponse {
    #[schema(example = "MSFT")]
    pub symbol: String,
    #[schema(example = "10")]
    pub quantity: String,
    #[schema(example = "310.00")]
    pub cost_basis_per_unit: String,
    #[schema(example = 370.6)]
    pub first_close: f64,
    #[schema(example = 402.1)]
    pub last_close: f64,
    #[schema(example = "3706.0")]
    pub start_value: String,
    #[schema(example = "4021.0")]
    pub market_value: String,
    #[schema(example = "3100.00")]
    pub cost_value: String,
    #[schema(example = "921.00")]
    pub unrealized_pnl: String,
    /// 期初市值权重 (%)
    #[schema(example = 48.2)]
    pub weight_pct: f64,
}

/// 图表计算报告
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartReportResponse {
    pub mode: ChartMode,
    /// 生效的时间窗口描述
    #[schema(example = "lookback 1mo")]
    pub window: String,
    pub series: Vec<SeriesResponse>,
    pub warnings: Vec<WarningResponse>,
    /// 组合聚合失败原因 (单标的曲线仍会返回)
    pub portfolio_error: Option<String>,
    pub positions: Vec<PositionResponse>,
    /// 计算所用持仓快照版本
    pub holdings_version: Option<u64>,
}

/// 界面可选项与默认值
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartOptionsResponse {
    pub modes: Vec<ChartMode>,
    pub presets: Vec<Preset>,
    pub default_preset: Preset,
    #[schema(example = json!(["MSFT", "AMZN", "AAPL", "META", "GOOGL"]))]
    pub default_symbols: Vec<String>,
}

// ============================================================
//  持仓相关 DTO
// ============================================================

/// 新增或编辑持仓请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HoldingRequest {
    #[schema(example = "AAPL")]
    pub symbol: String,
    /// 持有数量 (>= 0)
    #[schema(value_type = String, example = "10")]
    pub quantity: Decimal,
    /// 单位成本 (>= 0)
    #[schema(value_type = String, example = "150.25")]
    pub cost_basis_per_unit: Decimal,
}

/// 持仓 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HoldingResponse {
    #[schema(example = "5f0c1d52-8a43-4b7e-9a55-4d0f4f0c8a11")]
    pub id: String,
    #[schema(example = "AAPL")]
    pub symbol: String,
    #[schema(example = "10")]
    pub quantity: String,
    #[schema(example = "150.25")]
    pub cost_basis_per_unit: String,
}

/// 持仓快照 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HoldingsSnapshotResponse {
    /// 每次写入后递增
    #[schema(example = 3)]
    pub version: u64,
    pub holdings: Vec<HoldingResponse>,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// ============================================================
//  领域模型 ↔ DTO 惯用转换 (impl From<T>)
// ============================================================

impl From<SeriesPoint> for PointResponse {
    fn from(p: SeriesPoint) -> Self {
        Self {
            time: p.time.to_rfc3339(),
            value: p.value,
        }
    }
}

impl From<NamedSeries> for SeriesResponse {
    fn from(s: NamedSeries) -> Self {
        Self {
            name: s.name,
            symbol: s.symbol,
            points: s.points.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<InstrumentWarning> for WarningResponse {
    fn from(w: InstrumentWarning) -> Self {
        let kind = match w.kind {
            WarningKind::NoData => "NoData",
            WarningKind::DegenerateAnchor => "DegenerateAnchor",
        };
        Self {
            symbol: w.symbol,
            kind: kind.to_string(),
            message: w.message,
        }
    }
}

impl From<PositionSummary> for PositionResponse {
    fn from(p: PositionSummary) -> Self {
        Self {
            symbol: p.symbol,
            quantity: p.quantity.to_string(),
            cost_basis_per_unit: p.cost_basis_per_unit.to_string(),
            first_close: p.first_close,
            last_close: p.last_close,
            start_value: p.start_value.to_string(),
            market_value: p.market_value.to_string(),
            cost_value: p.cost_value.to_string(),
            unrealized_pnl: p.unrealized_pnl.to_string(),
            weight_pct: p.weight_pct,
        }
    }
}

impl From<ChartReport> for ChartReportResponse {
    fn from(r: ChartReport) -> Self {
        Self {
            mode: r.mode,
            window: r.window.to_string(),
            series: r.series.into_iter().map(Into::into).collect(),
            warnings: r.warnings.into_iter().map(Into::into).collect(),
            portfolio_error: r.portfolio_error,
            positions: r.positions.into_iter().map(Into::into).collect(),
            holdings_version: r.holdings_version,
        }
    }
}

impl From<Holding> for HoldingResponse {
    fn from(h: Holding) -> Self {
        Self {
            id: h.id.0,
            symbol: h.symbol,
            quantity: h.quantity.to_string(),
            cost_basis_per_unit: h.cost_basis_per_unit.to_string(),
        }
    }
}

impl From<HoldingsSnapshot> for HoldingsSnapshotResponse {
    fn from(s: HoldingsSnapshot) -> Self {
        Self {
            version: s.version,
            holdings: s.holdings.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<HoldingRequest> for HoldingDraft {
    fn from(r: HoldingRequest) -> Self {
        Self {
            symbol: r.symbol,
            quantity: r.quantity,
            cost_basis_per_unit: r.cost_basis_per_unit,
        }
    }
}
