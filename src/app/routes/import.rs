use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::ApiError;
use crate::app::state::AppState;

use super::common::{error_code, error_with_message, run_blocking, status_code};

// ==========================================
// 导入路由
// ==========================================

/// 上传字段名
pub(super) const UPLOAD_FIELD: &str = "file";

const MISSING_FILE_MESSAGE: &str = "Falta archivo";
const IMPORT_FAILED_MESSAGE: &str = "Error procesando Excel";

/// 导入失败响应（debugKeys 携带失败原因）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ImportFailureResponse {
    pub success: bool,
    pub code: &'static str,
    pub message: &'static str,
    pub debug_keys: String,
}

struct Upload {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

/// 读取 multipart 中名为 file 的字段；其余字段忽略
async fn read_upload(mut multipart: Multipart) -> Result<Option<Upload>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::MalformedInput(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::MalformedInput(e.to_string()))?;
        return Ok(Some(Upload {
            file_name,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

fn import_failure(err: ApiError) -> Response {
    tracing::error!(error = %err, "导入失败");
    let body = ImportFailureResponse {
        success: false,
        code: error_code(&err),
        message: IMPORT_FAILED_MESSAGE,
        debug_keys: err.to_string(),
    };
    (status_code(&err), Json(body)).into_response()
}

/// POST /api/importar
pub(super) async fn import_materials(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let missing_file =
        || error_with_message(&ApiError::ValidationError(String::new()), MISSING_FILE_MESSAGE);

    let upload = match multipart {
        Ok(multipart) => match read_upload(multipart).await {
            Ok(Some(upload)) => upload,
            Ok(None) => return missing_file(),
            Err(err) => return import_failure(err),
        },
        Err(rejection) => {
            tracing::warn!(error = %rejection, "请求不是 multipart 上传");
            return missing_file();
        }
    };

    tracing::info!(
        file_name = upload.file_name.as_deref().unwrap_or("-"),
        size = upload.bytes.len(),
        "收到导入文件"
    );

    let import_api = state.import_api.clone();
    let result = run_blocking(move || {
        import_api.import_materials(upload.file_name.as_deref(), &upload.bytes)
    })
    .await;

    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => import_failure(err),
    }
}
