// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供临时数据文件、API 实例与 HTTP 路由
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use axum::Router;
use more_inventory::api::{ApiResult, ExportApi, ImportApi, MaterialApi};
use more_inventory::app::{create_router, AppState};
use more_inventory::config::ServerConfig;
use more_inventory::domain::material::{MaterialRecord, NewMaterial};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 数据文件位于临时目录中，env 被 drop 时一并清理
pub struct ApiTestEnv {
    temp_dir: TempDir,
    pub data_path: PathBuf,
    pub state: AppState,
    pub material_api: Arc<MaterialApi>,
    pub import_api: Arc<ImportApi>,
    pub export_api: Arc<ExportApi>,
}

impl ApiTestEnv {
    /// 创建测试环境（空库存）
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let data_path = temp_dir.path().join("data").join("materiales.json");
        let state = AppState::new(&data_path)?;

        Ok(Self {
            temp_dir,
            data_path,
            material_api: state.material_api.clone(),
            import_api: state.import_api.clone(),
            export_api: state.export_api.clone(),
            state,
        })
    }

    /// 按顺序新建物料
    pub fn prepare_materials(&self, materials: Vec<NewMaterial>) -> ApiResult<Vec<MaterialRecord>> {
        materials
            .into_iter()
            .map(|m| self.material_api.create_material(m))
            .collect()
    }

    /// 直接覆盖数据文件内容（模拟手工编辑 / 历史数据）
    pub fn write_raw(&self, content: &str) {
        std::fs::write(&self.data_path, content).expect("无法写入数据文件");
    }

    /// 读取数据文件原文
    pub fn read_raw(&self) -> String {
        std::fs::read_to_string(&self.data_path).expect("无法读取数据文件")
    }

    /// 服务配置（静态目录位于临时目录）
    pub fn config(&self) -> ServerConfig {
        ServerConfig {
            data_file: self.data_path.clone(),
            public_dir: self.temp_dir.path().join("public"),
            ..ServerConfig::default()
        }
    }

    /// 在静态目录中放置一个文件
    pub fn write_public_file(&self, name: &str, content: &str) {
        let dir = self.temp_dir.path().join("public");
        std::fs::create_dir_all(&dir).expect("无法创建静态目录");
        std::fs::write(dir.join(name), content).expect("无法写入静态文件");
    }

    /// HTTP 路由
    pub fn router(&self) -> Router {
        create_router(self.state.clone(), &self.config())
    }
}
