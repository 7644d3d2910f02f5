// ==========================================
// 物料库存系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含导入导出逻辑
// ==========================================

pub mod material;
pub mod types;

// 重导出核心类型
pub use material::{MaterialPatch, MaterialRecord, NewMaterial, DEFAULT_UNIDAD};
pub use types::Ubicacion;
