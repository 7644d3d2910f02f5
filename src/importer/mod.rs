// ==========================================
// 物料库存系统 - 导入层
// ==========================================
// 职责: 外部表格 → 标准物料记录
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod cell;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod header_normalizer;
pub mod material_importer;
pub mod material_importer_trait;

// 重导出核心类型
pub use cell::{CellValue, RawRow};
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper as FieldMapperImpl, NormalizedRow};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use header_normalizer::normalize_header;
pub use material_importer::{ImportOutcome, MaterialImporter};

// 重导出 Trait 接口
pub use material_importer_trait::{FieldMapper, FileParser};
