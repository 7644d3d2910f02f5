// ==========================================
// 物料库存系统 - 应用层
// ==========================================
// 职责: HTTP 集成,连接前端与后端
// ==========================================

pub mod routes;
pub mod state;

// 重导出
pub use routes::create_router;
pub use state::AppState;
