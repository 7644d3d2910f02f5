// ==========================================
// 物料库存系统 - 导出层
// ==========================================
// 职责: 物料记录 → 交换表格（投影 + 编码）
// ==========================================

pub mod error;
pub mod projector;
pub mod sheet_writer;

// 重导出核心类型
pub use error::{ExportError, ExportResult};
pub use projector::{project, ExportRow, EXPORT_HEADERS};
pub use sheet_writer::{encode, ExportFormat, SHEET_NAME};
