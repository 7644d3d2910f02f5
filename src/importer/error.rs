// ==========================================
// 物料库存系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 行级拒绝不是错误，只影响计数
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 落库错误 =====
    #[error("数据保存失败: {0}")]
    Storage(#[from] RepositoryError),
}

impl ImportError {
    /// 文件本身无法解析为行（结构性失败）
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ImportError::ExcelParseError(_) | ImportError::CsvParseError(_)
        )
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
