// ==========================================
// 物料库存系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("id 已耗尽: 当前最大 id={max_id}")]
    IdExhausted { max_id: u64 },

    // ===== 存储错误 =====
    #[error("存储不可用 ({path}): {message}")]
    StorageUnavailable { path: String, message: String },

    #[error("序列化失败: {0}")]
    SerializationError(String),
}

impl RepositoryError {
    pub(crate) fn material_not_found(id: u64) -> Self {
        RepositoryError::NotFound {
            entity: "MaterialRecord".to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn storage(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        RepositoryError::StorageUnavailable {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
