// ==========================================
// 物料库存系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，把仓储/导入/导出错误转换为
//       调用方可区分的业务错误（未找到 ≠ 文件无法解析）
// ==========================================

use crate::exporter::error::ExportError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 导入导出错误
    // ==========================================
    /// 上传内容无法解析为行
    #[error("文件解析失败: {0}")]
    MalformedInput(String),

    #[error("文件导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 存储错误
    // ==========================================
    #[error("存储不可用: {0}")]
    StorageUnavailable(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::StorageUnavailable { .. } | RepositoryError::SerializationError(_) => {
                ApiError::StorageUnavailable(err.to_string())
            }
            RepositoryError::IdExhausted { .. } => ApiError::InternalError(err.to_string()),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Storage(repo_err) => repo_err.into(),
            other => ApiError::MalformedInput(other.to_string()),
        }
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
