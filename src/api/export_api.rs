// ==========================================
// 物料库存系统 - 物料导出 API
// ==========================================

use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiResult;
use crate::exporter::{encode, project, ExportFormat};
use crate::repository::MaterialRepository;

/// 导出文件
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// 建议文件名（带系统名）
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// 导出API
pub struct ExportApi {
    material_repo: Arc<MaterialRepository>,
}

impl ExportApi {
    /// 创建新的ExportApi实例
    pub fn new(material_repo: Arc<MaterialRepository>) -> Self {
        Self { material_repo }
    }

    /// 导出全部物料
    pub fn export_materials(&self, format: ExportFormat) -> ApiResult<ExportFile> {
        let records = self.material_repo.load();
        let rows = project(&records);
        let bytes = encode(&rows, format)?;

        info!(rows = rows.len(), format = format.extension(), "导出完成");
        Ok(ExportFile {
            file_name: format!("Inventario_{}.{}", crate::APP_NAME, format.extension()),
            content_type: format.content_type(),
            bytes,
        })
    }
}
