// ==========================================
// 物料库存系统 - 导入组件 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::material::NewMaterial;
use crate::importer::cell::RawRow;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::NormalizedRow;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 表格抽取（阶段 0）
// 实现者: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    /// 解析上传内容为原始行（首个工作表，首行为表头）
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 数据行（已跳过整行空白），缺失单元格为 Empty
    /// - Err: 内容无法解析为行（结构性失败）
    fn parse_to_raw_rows(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射（阶段 2）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 将规范化后的行映射为新建载荷
    ///
    /// # 返回
    /// - Some(NewMaterial): 行被接受
    /// - None: 名称缺失，行被拒绝
    fn map_to_new_material(&self, row: &NormalizedRow) -> Option<NewMaterial>;
}
