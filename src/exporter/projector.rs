// ==========================================
// 物料库存系统 - 导出投影
// ==========================================
// 职责: 物料记录 → 交换表格行（固定列顺序，字段原样输出）
// ==========================================

use crate::domain::material::MaterialRecord;
use serde::Serialize;

/// 交换表格列顺序
pub const EXPORT_HEADERS: [&str; 8] = [
    "ID",
    "NOMBRE",
    "MARCA",
    "DESCRIPCION",
    "UNIDAD",
    "UBICACION",
    "SALDO",
    "NOTAS",
];

/// 导出行（字段顺序即列顺序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct ExportRow {
    pub id: u64,
    pub nombre: String,
    pub marca: String,
    pub descripcion: String,
    pub unidad: String,
    pub ubicacion: String,
    pub saldo: i64,
    pub notas: String,
}

impl From<&MaterialRecord> for ExportRow {
    fn from(record: &MaterialRecord) -> Self {
        Self {
            id: record.id,
            nombre: record.nombre.clone(),
            marca: record.marca.clone(),
            descripcion: record.descripcion.clone(),
            unidad: record.unidad.clone(),
            ubicacion: record.ubicacion.to_string(),
            saldo: record.saldo,
            notas: record.notas.clone(),
        }
    }
}

/// 每条记录一行，保持仓储顺序，不做过滤
pub fn project(records: &[MaterialRecord]) -> Vec<ExportRow> {
    records.iter().map(ExportRow::from).collect()
}
