use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::{ApiError, ApiResult};
use crate::domain::material::parse_leading_int;

// ==========================================
// 公共工具：错误映射、阻塞任务、路径参数
// ==========================================

/// 错误响应（返回给前端）
#[derive(Debug, Clone, Serialize)]
pub(super) struct ErrorResponse {
    /// 前端统一以 success 判定
    pub success: bool,

    /// 错误代码
    pub code: &'static str,

    /// 错误消息
    pub message: String,
}

pub(super) fn error_code(err: &ApiError) -> &'static str {
    match err {
        ApiError::ValidationError(_) => "VALIDATION_ERROR",
        ApiError::NotFound(_) => "NOT_FOUND",
        ApiError::MalformedInput(_) => "MALFORMED_INPUT",
        ApiError::ExportError(_) => "EXPORT_ERROR",
        ApiError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        ApiError::InternalError(_) => "INTERNAL_ERROR",
    }
}

pub(super) fn status_code(err: &ApiError) -> StatusCode {
    match err {
        ApiError::ValidationError(_) | ApiError::MalformedInput(_) => StatusCode::BAD_REQUEST,
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::ExportError(_)
        | ApiError::StorageUnavailable(_)
        | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 以指定消息输出错误（覆盖 ApiError 自身的文本）
pub(super) fn error_with_message(err: &ApiError, message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        success: false,
        code: error_code(err),
        message: message.into(),
    };
    (status_code(err), Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if status_code(&self).is_server_error() {
            tracing::error!(error = %self, "请求处理失败");
        }
        let message = self.to_string();
        error_with_message(&self, message)
    }
}

/// 在阻塞线程池执行同步 API 调用（文件读写、表格编解码）
pub(super) async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::InternalError(format!("任务执行失败: {}", e)))?
}

/// 解析路径中的 id（前导整数，其余忽略；无法解析视为未知 id）
pub(super) fn parse_id(raw: &str) -> ApiResult<u64> {
    parse_leading_int(raw)
        .and_then(|id| u64::try_from(id).ok())
        .ok_or_else(|| ApiError::NotFound(format!("MaterialRecord(id={})不存在", raw)))
}
