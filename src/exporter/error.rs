// ==========================================
// 物料库存系统 - 导出模块错误类型
// ==========================================

use thiserror::Error;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Excel 生成失败: {0}")]
    XlsxWriteError(String),

    #[error("CSV 生成失败: {0}")]
    CsvWriteError(String),
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::XlsxWriteError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
