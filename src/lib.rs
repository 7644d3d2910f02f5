// ==========================================
// 物料库存系统 (MORE) - 核心库
// ==========================================
// 技术栈: axum + Rust + JSON 文件存储
// 系统定位: 单仓库物料台账（录入 / 表格导入 / 表格导出）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - JSON 文件存储
pub mod repository;

// 导入层 - 外部表格
pub mod importer;

// 导出层 - 表格生成
pub mod exporter;

// 配置层 - 环境变量
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::Ubicacion;

// 领域实体
pub use domain::{MaterialPatch, MaterialRecord, NewMaterial};

// API
pub use api::{ExportApi, ImportApi, MaterialApi};

// 应用
pub use app::{create_router, AppState};
pub use config::ServerConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称（用于导出文件名）
pub const APP_NAME: &str = "MORE";
