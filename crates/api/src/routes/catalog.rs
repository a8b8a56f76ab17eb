//! # 标的目录路由控制器
//!
//! 提供启动时加载的可选标的列表，供前端多选框使用。

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::ApiResponse;

/// 获取可选标的列表
///
/// 顺序与目录文件一致，重复项原样保留。
#[utoipa::path(
    get,
    path = "/api/v1/catalog",
    tag = "目录 (Catalog)",
    responses(
        (status = 200, description = "获取成功", body = ApiResponse<Vec<String>>),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn list_catalog(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let symbols = state.catalog.list().await?;
    Ok(Json(ApiResponse::ok(symbols)))
}
