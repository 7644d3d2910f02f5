// ==========================================
// 物料库存系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 记录身份（id 分配）与持久化
// ==========================================

pub mod error;
pub mod material_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use material_repo::{allocate_ids, next_id, MaterialRepository};
