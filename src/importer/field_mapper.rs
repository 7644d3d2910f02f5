// ==========================================
// 物料库存系统 - 字段映射器实现
// ==========================================
// 职责: 标准列名记号 → 实体字段（含别名回退与缺省值）
// 拒绝规则: NOMBRE 与 MATERIAL 均为空 → 拒绝该行（唯一拒绝规则）
// ==========================================

use crate::domain::material::{NewMaterial, DEFAULT_UNIDAD};
use crate::domain::types::Ubicacion;
use crate::importer::cell::{CellValue, RawRow};
use crate::importer::header_normalizer::normalize_header;
use crate::importer::material_importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

// ==========================================
// 标准列名记号
// ==========================================
pub mod tokens {
    pub const NOMBRE: &str = "NOMBRE";
    pub const MATERIAL: &str = "MATERIAL";
    pub const MARCA: &str = "MARCA";
    pub const DESCRIPCION: &str = "DESCRIPCION";
    pub const DESC: &str = "DESC";
    pub const UNIDAD: &str = "UNIDAD";
    pub const UND: &str = "UND";
    pub const UBICACION: &str = "UBICACION";
    pub const SALDO: &str = "SALDO";
    pub const NOTAS: &str = "NOTAS";
}

// ==========================================
// NormalizedRow - 规范化后的行
// ==========================================
/// 以标准记号为键的行；两个原始列名规范化后相同时，后出现者覆盖
#[derive(Debug, Clone, Default)]
pub struct NormalizedRow {
    tokens: Vec<String>,
    values: HashMap<String, CellValue>,
}

impl NormalizedRow {
    pub fn from_raw(row: &RawRow) -> Self {
        let mut normalized = NormalizedRow::default();
        for (label, value) in &row.cells {
            let token = normalize_header(label);
            if !normalized.values.contains_key(&token) {
                normalized.tokens.push(token.clone());
            }
            normalized.values.insert(token, value.clone());
        }
        normalized
    }

    /// 出现过的记号（按首次出现顺序）
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn get(&self, token: &str) -> Option<&CellValue> {
        self.values.get(token)
    }

    /// 依次尝试别名，返回第一个有值的文本（纯空白也算有值）
    fn text(&self, aliases: &[&str]) -> Option<String> {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .find_map(CellValue::present_text)
    }
}

// ==========================================
// FieldMapper 实现
// ==========================================
pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_new_material(&self, row: &NormalizedRow) -> Option<NewMaterial> {
        let nombre = row.text(&[tokens::NOMBRE, tokens::MATERIAL])?;

        Some(NewMaterial {
            nombre,
            marca: row.text(&[tokens::MARCA]).unwrap_or_default(),
            descripcion: row
                .text(&[tokens::DESCRIPCION, tokens::DESC])
                .unwrap_or_default(),
            unidad: row
                .text(&[tokens::UNIDAD, tokens::UND])
                .unwrap_or_else(|| DEFAULT_UNIDAD.to_string()),
            ubicacion: self.resolve_ubicacion(row),
            saldo: row
                .get(tokens::SALDO)
                .and_then(CellValue::as_int)
                .unwrap_or(0),
            notas: row.text(&[tokens::NOTAS]).unwrap_or_default(),
        })
    }
}

impl FieldMapper {
    /// 仅文本单元格参与 MUEBLE 判定，数值/空值一律 Suelto
    fn resolve_ubicacion(&self, row: &NormalizedRow) -> Ubicacion {
        match row.get(tokens::UBICACION) {
            Some(CellValue::Text(s)) => Ubicacion::from_text(s),
            _ => Ubicacion::Suelto,
        }
    }
}
