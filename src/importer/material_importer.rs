// ==========================================
// 物料库存系统 - 物料导入器（导入对账）
// ==========================================
// 流程: 解析 → 表头规范化 → 字段映射/拒绝 → 分配 id → 一次性落库
// 红线: 结构性解析失败时不修改仓储；行级拒绝静默，只体现在计数
// ==========================================

use crate::domain::material::MaterialRecord;
use crate::importer::cell::RawRow;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{FieldMapper as FieldMapperImpl, NormalizedRow};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::material_importer_trait::FieldMapper;
use crate::repository::{allocate_ids, MaterialRepository};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, Span};
use uuid::Uuid;

/// 无数据行时的诊断占位
pub const NO_KEYS_PLACEHOLDER: &str = "Ninguna";

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    /// 接受并落库的行数
    pub count: usize,
    /// 首行出现的标准列名记号（诊断用，不参与控制流）
    pub first_row_keys: Vec<String>,
    /// 被拒绝行的表格行号（表头为第 1 行）
    pub rejected_rows: Vec<usize>,
    /// 新记录的 id（按输入顺序）
    pub assigned_ids: Vec<u64>,
}

impl ImportOutcome {
    /// 诊断文本：记号以 ", " 连接，无数据行时为 "Ninguna"
    pub fn debug_keys(&self) -> String {
        if self.first_row_keys.is_empty() {
            NO_KEYS_PLACEHOLDER.to_string()
        } else {
            self.first_row_keys.join(", ")
        }
    }
}

// ==========================================
// MaterialImporter - 物料导入器
// ==========================================
pub struct MaterialImporter {
    repo: Arc<MaterialRepository>,
    file_parser: UniversalFileParser,
    field_mapper: Box<dyn FieldMapper>,
}

impl MaterialImporter {
    /// 创建导入器
    ///
    /// # 参数
    /// - repo: 物料记录仓储
    /// - field_mapper: 字段映射器
    pub fn new(repo: Arc<MaterialRepository>, field_mapper: Box<dyn FieldMapper>) -> Self {
        Self {
            repo,
            file_parser: UniversalFileParser,
            field_mapper,
        }
    }

    /// 使用标准字段映射创建导入器
    pub fn with_default_mapping(repo: Arc<MaterialRepository>) -> Self {
        Self::new(repo, Box::new(FieldMapperImpl))
    }

    /// 从上传文件导入
    ///
    /// # 参数
    /// - file_name: 原始文件名（用于区分 CSV，可缺省）
    /// - bytes: 文件内容
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 导入结果（计数 + 诊断信息）
    /// - Err: 文件无法解析为行，或落库失败
    #[instrument(skip(self, bytes), fields(batch_id = tracing::field::Empty, size = bytes.len()))]
    pub fn import_file(&self, file_name: Option<&str>, bytes: &[u8]) -> ImportResult<ImportOutcome> {
        let batch_id = Uuid::new_v4().to_string();
        Span::current().record("batch_id", batch_id.as_str());
        let start_time = Instant::now();

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let rows = self.file_parser.parse(file_name, bytes)?;
        info!(total_rows = rows.len(), "文件解析完成");

        let outcome = self.import_rows(rows)?;

        info!(
            accepted = outcome.count,
            rejected = outcome.rejected_rows.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "导入完成"
        );
        Ok(outcome)
    }

    /// 导入已抽取的原始行
    pub fn import_rows(&self, rows: Vec<RawRow>) -> ImportResult<ImportOutcome> {
        // === 步骤 2: 表头规范化 ===
        let normalized: Vec<(usize, NormalizedRow)> = rows
            .iter()
            .map(|row| (row.row_number, NormalizedRow::from_raw(row)))
            .collect();
        let first_row_keys = normalized
            .first()
            .map(|(_, row)| row.tokens().to_vec())
            .unwrap_or_default();

        // === 步骤 3: 字段映射与拒绝 ===
        let mut accepted = Vec::new();
        let mut rejected_rows = Vec::new();
        for (row_number, row) in &normalized {
            match self.field_mapper.map_to_new_material(row) {
                Some(material) => accepted.push(material),
                None => {
                    debug!(row_number = row_number, "缺少名称，跳过该行");
                    rejected_rows.push(*row_number);
                }
            }
        }

        if accepted.is_empty() {
            return Ok(ImportOutcome {
                count: 0,
                first_row_keys,
                rejected_rows,
                assigned_ids: Vec::new(),
            });
        }

        // === 步骤 4: 分配 id 并一次性落库 ===
        let assigned_ids = self.repo.mutate(|records| {
            let first_id = allocate_ids(records, accepted.len())?;
            let mut ids = Vec::with_capacity(accepted.len());
            for (offset, material) in accepted.into_iter().enumerate() {
                // allocate_ids 已保证 first_id + (len - 1) 不溢出
                let id = first_id + offset as u64;
                records.push(MaterialRecord::from_new(id, material));
                ids.push(id);
            }
            Ok(ids)
        })?;

        Ok(ImportOutcome {
            count: assigned_ids.len(),
            first_row_keys,
            rejected_rows,
            assigned_ids,
        })
    }
}
