use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::api::ApiResult;
use crate::app::state::AppState;
use crate::exporter::ExportFormat;

use super::common::run_blocking;

// ==========================================
// 导出路由
// ==========================================

#[derive(Debug, Default, Deserialize)]
pub(super) struct ExportParams {
    /// xlsx（缺省）或 csv
    pub formato: Option<String>,
}

/// GET /api/exportar
pub(super) async fn export_materials(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let format = ExportFormat::from_param(params.formato.as_deref());
    let export_api = state.export_api.clone();
    let file = run_blocking(move || export_api.export_materials(format)).await?;

    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}
