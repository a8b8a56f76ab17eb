use crate::common::SeriesPoint;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

// ============================================================
//  时间窗口
// ============================================================

/// # Summary
/// 预设时间窗口，对应界面上的快捷时间刻度。
///
/// # Invariants
/// - 枚举封闭，每个预设在解析器中都有唯一的回溯代码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Preset {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "5D")]
    FiveDays,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
}

impl Preset {
    /// 按界面展示顺序排列的全部预设。
    pub const ALL: [Preset; 7] = [
        Preset::OneDay,
        Preset::FiveDays,
        Preset::OneMonth,
        Preset::ThreeMonths,
        Preset::SixMonths,
        Preset::OneYear,
        Preset::FiveYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::OneDay => "1D",
            Preset::FiveDays => "5D",
            Preset::OneMonth => "1M",
            Preset::ThreeMonths => "3M",
            Preset::SixMonths => "6M",
            Preset::OneYear => "1Y",
            Preset::FiveYears => "5Y",
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str() == upper)
            .ok_or_else(|| format!("Unknown preset: {}", s))
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// # Summary
/// 数据源可识别的回溯周期代码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookbackCode {
    Day1,
    Day5,
    Month1,
    Month3,
    Month6,
    Year1,
    Year5,
}

impl std::fmt::Display for LookbackCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookbackCode::Day1 => write!(f, "1d"),
            LookbackCode::Day5 => write!(f, "5d"),
            LookbackCode::Month1 => write!(f, "1mo"),
            LookbackCode::Month3 => write!(f, "3mo"),
            LookbackCode::Month6 => write!(f, "6mo"),
            LookbackCode::Year1 => write!(f, "1y"),
            LookbackCode::Year5 => write!(f, "5y"),
        }
    }
}

/// # Summary
/// 用户的时间窗口选择 (预设或显式起止日期)。
///
/// # Invariants
/// - 每次计算只有一个生效的窗口。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowSelection {
    // 预设回溯窗口
    Preset(Preset),
    // 显式起止日期 (闭区间)
    Explicit { start: NaiveDate, end: NaiveDate },
}

/// # Summary
/// 解析后可直接交给数据源的具体窗口。
///
/// # Invariants
/// - `Range` 必然满足 `start <= end`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedWindow {
    Lookback(LookbackCode),
    Range { start: NaiveDate, end: NaiveDate },
}

impl std::fmt::Display for ResolvedWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedWindow::Lookback(code) => write!(f, "lookback {}", code),
            ResolvedWindow::Range { start, end } => write!(f, "{}..={}", start, end),
        }
    }
}

// ============================================================
//  计算结果
// ============================================================

/// # Summary
/// 以窗口首个观测为锚点的涨跌幅序列。
///
/// # Invariants
/// - 与源 `RawSeries` 长度、时间戳完全一致。
/// - `points[0].value == 0.0`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    pub symbol: String,
    pub points: Vec<SeriesPoint>,
}

impl NormalizedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// # Summary
/// 按持仓市值加权合成的组合涨跌幅曲线，每次请求重新计算。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioCurve {
    pub points: Vec<SeriesPoint>,
}

impl PortfolioCurve {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

// ============================================================
//  图表请求与报告
// ============================================================

/// # Summary
/// 图表模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChartMode {
    // 绝对价格
    Price,
    // 单标的涨跌幅
    PercentageChange,
    // 持仓组合表现
    Portfolio,
}

impl FromStr for ChartMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(ChartMode::Price),
            "percentage_change" | "percentage change" | "pct" => Ok(ChartMode::PercentageChange),
            "portfolio" => Ok(ChartMode::Portfolio),
            _ => Err(format!("Unknown chart mode: {}", s)),
        }
    }
}

impl std::fmt::Display for ChartMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartMode::Price => write!(f, "Price"),
            ChartMode::PercentageChange => write!(f, "Percentage Change"),
            ChartMode::Portfolio => write!(f, "Portfolio"),
        }
    }
}

/// # Summary
/// 一次图表计算请求。
///
/// # Invariants
/// - `Portfolio` 模式下 `symbols` 被忽略，标的取自持仓快照。
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub mode: ChartMode,
    pub window: WindowSelection,
    pub symbols: Vec<String>,
}

/// 带名称的输出序列，供展示层直接绘制。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    // 图例名称，如 "AAPL (% Change)"
    pub name: String,
    // 对应标的，组合曲线为 None
    pub symbol: Option<String>,
    pub points: Vec<SeriesPoint>,
}

/// 单标的被剔除的原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    NoData,
    DegenerateAnchor,
}

/// # Summary
/// 单标的级别的告警，该标的已从本次图表与组合中剔除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentWarning {
    pub symbol: String,
    pub kind: WarningKind,
    pub message: String,
}

/// # Summary
/// 组合模式下单个持仓的估值摘要。
///
/// # Invariants
/// - 仅包含参与加权的持仓。
/// - `weight_pct` 为该持仓期初市值占组合期初总市值的百分比。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub symbol: String,
    pub quantity: Decimal,
    pub cost_basis_per_unit: Decimal,
    // 窗口首个收盘价
    pub first_close: f64,
    // 窗口最后收盘价
    pub last_close: f64,
    // 期初市值 (quantity * first_close)
    pub start_value: Decimal,
    // 期末市值 (quantity * last_close)
    pub market_value: Decimal,
    // 持仓成本 (quantity * cost_basis_per_unit)
    pub cost_value: Decimal,
    // 未实现盈亏 (market_value - cost_value)
    pub unrealized_pnl: Decimal,
    pub weight_pct: f64,
}

/// # Summary
/// 图表计算报告，展示层据此渲染曲线与告警。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartReport {
    pub mode: ChartMode,
    pub window: ResolvedWindow,
    pub series: Vec<NamedSeries>,
    pub warnings: Vec<InstrumentWarning>,
    // 组合聚合失败时的说明 (单标的曲线仍然返回)
    pub portfolio_error: Option<String>,
    pub positions: Vec<PositionSummary>,
    // 计算所用持仓快照的版本号
    pub holdings_version: Option<u64>,
}
