// ==========================================
// 物料库存系统 - 表格单元格值
// ==========================================
// 职责: 在解析边界把动态单元格统一为固定变体
//       Text | Number | Empty，导入后续步骤只接触该类型
// ==========================================

use crate::domain::material::{format_number, parse_leading_int, truncate_number};

/// 单元格值
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// 空白判定：Empty 或去空白后为空的文本（只用于整行跳过）
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 有值时转文本（仅 Empty 与空字符串视为无值；纯空白文本照常保留）
    pub fn present_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.is_empty() => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
        }
    }

    /// 按整数解析：数值截断，文本取前导整数
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Number(n) => truncate_number(*n),
            CellValue::Text(s) => parse_leading_int(s),
            CellValue::Empty => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// 原始行：保持列顺序的 (原始列名, 单元格值) 列表
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 表格中的行号（表头为第 1 行）
    pub row_number: usize,
    pub cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new(row_number: usize, cells: Vec<(String, CellValue)>) -> Self {
        Self { row_number, cells }
    }

    /// 是否整行为空
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_blank())
    }
}
