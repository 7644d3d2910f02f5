// ==========================================
// 物料库存系统 - 物料实体定义
// ==========================================
// 职责: MaterialRecord（持久化实体）、NewMaterial（新建载荷）、
//       MaterialPatch（部分更新载荷）
// 字段名: 与数据文件 / HTTP JSON 完全一致（西班牙语原名）
// ==========================================

use crate::domain::types::Ubicacion;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 单位缺省值
pub const DEFAULT_UNIDAD: &str = "UND";

// ==========================================
// MaterialRecord - 物料记录
// ==========================================
/// 库存中的一条物料记录
///
/// id 由仓储分配（当前最大 id + 1），分配后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub id: u64,
    #[serde(default, deserialize_with = "de_text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "de_text")]
    pub marca: String,
    #[serde(default, deserialize_with = "de_text")]
    pub descripcion: String,
    #[serde(default = "default_unidad", deserialize_with = "de_unidad")]
    pub unidad: String,
    #[serde(default)]
    pub ubicacion: Ubicacion,
    #[serde(default, deserialize_with = "de_saldo")]
    pub saldo: i64,
    #[serde(default, deserialize_with = "de_text")]
    pub notas: String,
}

impl MaterialRecord {
    /// 由新建载荷 + 已分配 id 构造记录
    pub fn from_new(id: u64, new: NewMaterial) -> Self {
        Self {
            id,
            nombre: new.nombre,
            marca: new.marca,
            descripcion: new.descripcion,
            unidad: new.unidad,
            ubicacion: new.ubicacion,
            saldo: new.saldo,
            notas: new.notas,
        }
    }

    /// 浅覆盖合并：补丁中出现的字段覆盖原值，未出现的保持不变（id 永不修改）
    pub fn apply_patch(&mut self, patch: MaterialPatch) {
        if let Some(v) = patch.nombre {
            self.nombre = v;
        }
        if let Some(v) = patch.marca {
            self.marca = v;
        }
        if let Some(v) = patch.descripcion {
            self.descripcion = v;
        }
        // 空单位与新建、加载一致，回落为 UND
        if let Some(v) = patch.unidad {
            self.unidad = if v.is_empty() { default_unidad() } else { v };
        }
        if let Some(v) = patch.ubicacion {
            self.ubicacion = v;
        }
        if let Some(v) = patch.saldo {
            self.saldo = v;
        }
        if let Some(v) = patch.notas {
            self.notas = v;
        }
    }
}

// ==========================================
// NewMaterial - 新建载荷
// ==========================================
/// 新建物料的输入（请求体中的 id 会被忽略）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewMaterial {
    #[serde(default, deserialize_with = "de_text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "de_text")]
    pub marca: String,
    #[serde(default, deserialize_with = "de_text")]
    pub descripcion: String,
    #[serde(default = "default_unidad", deserialize_with = "de_unidad")]
    pub unidad: String,
    #[serde(default)]
    pub ubicacion: Ubicacion,
    #[serde(default, deserialize_with = "de_saldo")]
    pub saldo: i64,
    #[serde(default, deserialize_with = "de_text")]
    pub notas: String,
}

impl NewMaterial {
    /// 仅有名称、其余取缺省值
    pub fn named(nombre: impl Into<String>) -> Self {
        Self {
            nombre: nombre.into(),
            marca: String::new(),
            descripcion: String::new(),
            unidad: DEFAULT_UNIDAD.to_string(),
            ubicacion: Ubicacion::Suelto,
            saldo: 0,
            notas: String::new(),
        }
    }

    /// 名称是否有效（去空白后非空）
    pub fn has_name(&self) -> bool {
        !self.nombre.trim().is_empty()
    }
}

// ==========================================
// MaterialPatch - 部分更新载荷
// ==========================================
/// 部分更新：None 表示"未指定，保持原值"
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MaterialPatch {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub marca: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub descripcion: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub unidad: Option<String>,
    #[serde(default, deserialize_with = "de_opt_ubicacion")]
    pub ubicacion: Option<Ubicacion>,
    #[serde(default, deserialize_with = "de_opt_saldo")]
    pub saldo: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub notas: Option<String>,
}

impl MaterialPatch {
    /// 补丁是否试图把名称清空
    pub fn clears_name(&self) -> bool {
        matches!(&self.nombre, Some(n) if n.trim().is_empty())
    }
}

// ==========================================
// 数值解析
// ==========================================

/// 按"前导整数"规则解析库存数量
///
/// 跳过前导空白，接受可选符号和连续数字，其后内容忽略；
/// 无数字时返回 None（"12 cajas" → 12，"abc" → None）
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // 超出 i64 范围时饱和
    let magnitude = digits[..end].parse::<i128>().unwrap_or(i128::MAX);
    let value = if negative { -magnitude } else { magnitude };
    Some(value.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
}

/// 浮点数截断为整数（NaN / 无穷 → None）
pub fn truncate_number(n: f64) -> Option<i64> {
    if n.is_finite() {
        Some(n.trunc() as i64)
    } else {
        None
    }
}

/// 数值按表格习惯转文本：整数不带小数点
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// ==========================================
// 宽松反序列化辅助
// ==========================================
// 历史数据与前端表单中，同一字段可能是字符串、数字或 null

fn default_unidad() -> String {
    DEFAULT_UNIDAD.to_string()
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) => format_number(f),
            None => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn value_to_saldo(value: Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_number)),
        Value::String(s) => parse_leading_int(&s),
        _ => None,
    }
}

fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value).unwrap_or_default())
}

fn de_unidad<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default_unidad))
}

fn de_saldo<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_saldo(value).unwrap_or(0))
}

fn de_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value))
}

fn de_opt_ubicacion<'de, D>(deserializer: D) -> Result<Option<Ubicacion>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(Ubicacion::from_text(&s)),
        _ => Some(Ubicacion::Suelto),
    })
}

fn de_opt_saldo<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(value_to_saldo(other).unwrap_or(0)),
    })
}
