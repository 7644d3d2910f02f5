use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::{ApiError, ApiResult};
use crate::app::state::AppState;
use crate::domain::material::{MaterialPatch, MaterialRecord, NewMaterial};

use super::common::{error_with_message, parse_id, run_blocking};

// ==========================================
// 物料相关路由
// ==========================================

/// 新建成功响应
#[derive(Debug, Serialize)]
pub(super) struct CreatedResponse {
    pub success: bool,
    pub item: MaterialRecord,
}

/// 通用成功响应
#[derive(Debug, Serialize)]
pub(super) struct SuccessResponse {
    pub success: bool,
}

const SUCCESS: SuccessResponse = SuccessResponse { success: true };

/// 删除未知 id 时的前端提示
const DELETE_NOT_FOUND_MESSAGE: &str = "No encontrado";

/// GET /api/materiales
pub(super) async fn list_materials(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<MaterialRecord>>> {
    let material_api = state.material_api.clone();
    let records = run_blocking(move || Ok(material_api.list_materials())).await?;
    Ok(Json(records))
}

/// POST /api/materiales
pub(super) async fn create_material(
    State(state): State<AppState>,
    Json(new): Json<NewMaterial>,
) -> ApiResult<Json<CreatedResponse>> {
    let material_api = state.material_api.clone();
    let item = run_blocking(move || material_api.create_material(new)).await?;
    tracing::info!(id = item.id, "新建物料");
    Ok(Json(CreatedResponse {
        success: true,
        item,
    }))
}

/// GET /api/materiales/:id
pub(super) async fn get_material(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MaterialRecord>> {
    let id = parse_id(&raw_id)?;
    let material_api = state.material_api.clone();
    let record = run_blocking(move || material_api.get_material(id)).await?;
    Ok(Json(record))
}

/// PUT /api/materiales/:id
pub(super) async fn update_material(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(patch): Json<MaterialPatch>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = parse_id(&raw_id)?;
    let material_api = state.material_api.clone();
    run_blocking(move || material_api.update_material(id, patch)).await?;
    tracing::info!(id = id, "更新物料");
    Ok(Json(SUCCESS))
}

/// DELETE /api/materiales/:id
pub(super) async fn delete_material(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let result = match parse_id(&raw_id) {
        Ok(id) => {
            let material_api = state.material_api.clone();
            run_blocking(move || material_api.delete_material(id)).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            tracing::info!(id = %raw_id, "删除物料");
            Json(SUCCESS).into_response()
        }
        Err(err @ ApiError::NotFound(_)) => error_with_message(&err, DELETE_NOT_FOUND_MESSAGE),
        Err(err) => err.into_response(),
    }
}
