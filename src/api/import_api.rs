// ==========================================
// 物料库存系统 - 物料导入 API
// ==========================================
// 职责: 封装批量导入，输出前端约定的响应结构
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::api::error::ApiResult;
use crate::importer::MaterialImporter;
use crate::repository::MaterialRepository;

/// 导入API响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportApiResponse {
    pub success: bool,
    /// 接受并落库的行数
    pub count: usize,
    /// 首行标准列名（", " 连接，无数据行为 "Ninguna"）
    pub debug_keys: String,
    /// 被拒绝行的表格行号
    pub rejected_rows: Vec<usize>,
}

/// 导入API
pub struct ImportApi {
    importer: MaterialImporter,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(material_repo: Arc<MaterialRepository>) -> Self {
        Self {
            importer: MaterialImporter::with_default_mapping(material_repo),
        }
    }

    /// 导入上传的表格文件
    ///
    /// # 参数
    /// - file_name: 上传时的文件名（可缺省）
    /// - bytes: 文件内容
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 结构性成功（count 可以为 0）
    /// - Err(ApiError::MalformedInput): 文件无法解析，仓储未修改
    pub fn import_materials(
        &self,
        file_name: Option<&str>,
        bytes: &[u8],
    ) -> ApiResult<ImportApiResponse> {
        let outcome = self.importer.import_file(file_name, bytes).map_err(|e| {
            error!(error = %e, "导入失败");
            e
        })?;

        info!(count = outcome.count, "导入成功");
        Ok(ImportApiResponse {
            success: true,
            count: outcome.count,
            debug_keys: outcome.debug_keys(),
            rejected_rows: outcome.rejected_rows,
        })
    }
}
