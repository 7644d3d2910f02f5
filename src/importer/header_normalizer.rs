// ==========================================
// 物料库存系统 - 表头规范化
// ==========================================
// 规则: TRIM → 大写 → NFD 分解 → 丢弃组合附加符号
// 例: " Descripción " → "DESCRIPCION"
// ==========================================

use std::ops::RangeInclusive;
use unicode_normalization::UnicodeNormalization;

/// 组合附加符号区块 (Combining Diacritical Marks)
const COMBINING_DIACRITICS: RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// 将任意列名规范化为标准列名记号（纯函数，对任意输入有定义）
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .nfd()
        .filter(|c| !COMBINING_DIACRITICS.contains(c))
        .collect()
}
