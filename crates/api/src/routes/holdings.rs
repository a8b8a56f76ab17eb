//! # 持仓路由控制器
//!
//! 持仓列表的增删改查。每次成功写入都会使快照版本号递增，
//! 前端据此判断组合曲线是否需要重新计算。

use axum::Json;
use axum::extract::{Path, State};

use tickerlens_core::portfolio::entity::HoldingId;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, HoldingRequest, HoldingResponse, HoldingsSnapshotResponse};

/// 获取当前持仓快照
#[utoipa::path(
    get,
    path = "/api/v1/holdings",
    tag = "持仓 (Holdings)",
    responses(
        (status = 200, description = "获取成功", body = ApiResponse<HoldingsSnapshotResponse>)
    )
)]
pub async fn get_holdings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HoldingsSnapshotResponse>>, ApiError> {
    let snapshot = state.holdings.snapshot().await?;
    Ok(Json(ApiResponse::ok(snapshot.into())))
}

/// 新增持仓
#[utoipa::path(
    post,
    path = "/api/v1/holdings",
    tag = "持仓 (Holdings)",
    request_body = HoldingRequest,
    responses(
        (status = 200, description = "新增成功", body = ApiResponse<HoldingResponse>),
        (status = 400, description = "代码为空或数量、成本为负")
    )
)]
pub async fn add_holding(
    State(state): State<AppState>,
    Json(req): Json<HoldingRequest>,
) -> Result<Json<ApiResponse<HoldingResponse>>, ApiError> {
    let holding = state.holdings.add(req.into()).await?;
    Ok(Json(ApiResponse::ok(holding.into())))
}

/// 编辑持仓
#[utoipa::path(
    put,
    path = "/api/v1/holdings/{id}",
    tag = "持仓 (Holdings)",
    params(
        ("id" = String, Path, description = "持仓 ID")
    ),
    request_body = HoldingRequest,
    responses(
        (status = 200, description = "编辑成功", body = ApiResponse<HoldingResponse>),
        (status = 400, description = "代码为空或数量、成本为负"),
        (status = 404, description = "持仓不存在")
    )
)]
pub async fn update_holding(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<HoldingRequest>,
) -> Result<Json<ApiResponse<HoldingResponse>>, ApiError> {
    let holding = state.holdings.update(&HoldingId(id), req.into()).await?;
    Ok(Json(ApiResponse::ok(holding.into())))
}

/// 删除持仓
#[utoipa::path(
    delete,
    path = "/api/v1/holdings/{id}",
    tag = "持仓 (Holdings)",
    params(
        ("id" = String, Path, description = "持仓 ID")
    ),
    responses(
        (status = 200, description = "删除成功，返回被删除的持仓", body = ApiResponse<HoldingResponse>),
        (status = 404, description = "持仓不存在")
    )
)]
pub async fn remove_holding(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<HoldingResponse>>, ApiError> {
    let holding = state.holdings.remove(&HoldingId(id)).await?;
    Ok(Json(ApiResponse::ok(holding.into())))
}
