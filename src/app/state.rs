// ==========================================
// 物料库存系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{ExportApi, ImportApi, MaterialApi};
use crate::repository::{MaterialRepository, RepositoryResult};

/// 应用状态
///
/// 包含所有API实例，作为 axum 路由的共享状态（克隆只复制 Arc）
#[derive(Clone)]
pub struct AppState {
    /// 数据文件路径
    pub data_path: PathBuf,

    /// 物料API
    pub material_api: Arc<MaterialApi>,

    /// 物料导入API
    pub import_api: Arc<ImportApi>,

    /// 物料导出API
    pub export_api: Arc<ExportApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - data_path: 物料记录文件路径（不存在时创建目录并写入空列表）
    ///
    /// # 说明
    /// 三个API共享同一个仓储实例，从而共享同一把写锁
    pub fn new(data_path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let data_path = data_path.as_ref().to_path_buf();
        tracing::info!("初始化AppState，数据文件: {}", data_path.display());

        let material_repo = Arc::new(MaterialRepository::open(&data_path)?);

        Ok(Self {
            data_path,
            material_api: Arc::new(MaterialApi::new(material_repo.clone())),
            import_api: Arc::new(ImportApi::new(material_repo.clone())),
            export_api: Arc::new(ExportApi::new(material_repo)),
        })
    }
}
