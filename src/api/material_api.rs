// ==========================================
// 物料库存系统 - 物料 API
// ==========================================
// 职责: 物料记录的查询、新建、部分更新、删除
// ==========================================

use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::material::{MaterialPatch, MaterialRecord, NewMaterial};
use crate::repository::MaterialRepository;

// ==========================================
// MaterialApi - 物料 API
// ==========================================

/// 物料API
///
/// 职责：
/// 1. 物料查询（全量，保持仓储顺序）
/// 2. 新建前的名称校验
/// 3. 部分更新与删除（未知 id → NotFound）
pub struct MaterialApi {
    material_repo: Arc<MaterialRepository>,
}

impl MaterialApi {
    /// 创建新的MaterialApi实例
    pub fn new(material_repo: Arc<MaterialRepository>) -> Self {
        Self { material_repo }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询全部物料
    pub fn list_materials(&self) -> Vec<MaterialRecord> {
        let records = self.material_repo.load();
        debug!(count = records.len(), "查询物料列表");
        records
    }

    /// 按 id 查询物料
    pub fn get_material(&self, id: u64) -> ApiResult<MaterialRecord> {
        self.material_repo
            .find_by_id(id)
            .ok_or_else(|| ApiError::NotFound(format!("MaterialRecord(id={})不存在", id)))
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 新建物料
    ///
    /// # 返回
    /// - Ok(MaterialRecord): 已分配 id 的新记录
    /// - Err(ApiError::ValidationError): 名称为空，未触达仓储
    pub fn create_material(&self, new: NewMaterial) -> ApiResult<MaterialRecord> {
        if !new.has_name() {
            warn!("新建物料被拒绝: nombre 为空");
            return Err(ApiError::ValidationError("nombre 不能为空".to_string()));
        }
        Ok(self.material_repo.insert(new)?)
    }

    /// 部分更新物料
    pub fn update_material(&self, id: u64, patch: MaterialPatch) -> ApiResult<MaterialRecord> {
        Ok(self.material_repo.update(id, patch)?)
    }

    /// 删除物料
    pub fn delete_material(&self, id: u64) -> ApiResult<()> {
        self.material_repo.delete(id)?;
        Ok(())
    }
}
