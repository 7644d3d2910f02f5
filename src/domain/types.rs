// ==========================================
// 物料库存系统 - 领域类型定义
// ==========================================
// 职责: 存放位置枚举及其文本判定规则
// ==========================================

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ==========================================
// 存放位置 (Ubicacion)
// ==========================================
// 序列化格式: "Mueble" / "Suelto"（与数据文件、导出表格一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Ubicacion {
    Mueble, // 柜内
    #[default]
    Suelto, // 散放
}

impl Ubicacion {
    /// 按文本判定位置：大写后包含 "MUEBLE" 即为 Mueble，其余一律 Suelto
    pub fn from_text(text: &str) -> Self {
        if text.to_uppercase().contains("MUEBLE") {
            Ubicacion::Mueble
        } else {
            Ubicacion::Suelto
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ubicacion::Mueble => "Mueble",
            Ubicacion::Suelto => "Suelto",
        }
    }
}

impl fmt::Display for Ubicacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// 宽松反序列化：前端/历史数据可能传入任意文本或 null
impl<'de> Deserialize<'de> for Ubicacion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(serde_json::Value::String(s)) => Ubicacion::from_text(&s),
            _ => Ubicacion::Suelto,
        })
    }
}
