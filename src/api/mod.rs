// ==========================================
// 物料库存系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 HTTP 路由调用
// ==========================================

pub mod error;
pub mod export_api;
pub mod import_api;
pub mod material_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use export_api::{ExportApi, ExportFile};
pub use import_api::{ImportApi, ImportApiResponse};
pub use material_api::MaterialApi;
