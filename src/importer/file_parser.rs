// ==========================================
// 物料库存系统 - 文件解析器实现
// ==========================================
// 阶段 0: 上传内容 → 原始行
// 支持: Excel (.xlsx/.xls/.xlsb/.ods，按内容自动识别) / CSV (.csv)
// 约定: 仅读首个工作表；首行为表头；空表头记为 __EMPTY、__EMPTY_1 …
//       缺失单元格补 Empty；整行空白跳过
// ==========================================

use crate::importer::cell::{CellValue, RawRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::material_importer_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ==========================================
// 表头处理
// ==========================================

/// 为空表头与重复表头生成唯一列名
fn label_headers<I>(raw_headers: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut empty_count = 0usize;
    let mut labels = Vec::new();

    for raw in raw_headers {
        let base = if raw.trim().is_empty() {
            let label = if empty_count == 0 {
                "__EMPTY".to_string()
            } else {
                format!("__EMPTY_{}", empty_count)
            };
            empty_count += 1;
            label
        } else {
            raw
        };

        let label = match seen.get_mut(&base) {
            Some(count) => {
                *count += 1;
                format!("{}_{}", base, count)
            }
            None => base.clone(),
        };
        seen.entry(base).or_insert(0);
        labels.push(label);
    }

    labels
}

/// 按表头补齐一行（缺失单元格为 Empty）
fn build_row(row_number: usize, headers: &[String], values: Vec<CellValue>) -> RawRow {
    let mut values = values.into_iter();
    let cells = headers
        .iter()
        .map(|h| (h.clone(), values.next().unwrap_or(CellValue::Empty)))
        .collect();
    RawRow::new(row_number, cells)
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_rows(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        // 读取表头（非 UTF-8 文件按有损转换处理）
        let headers = label_headers(
            reader
                .byte_headers()?
                .iter()
                .map(|h| String::from_utf8_lossy(h).to_string()),
        );
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::new();
        for (idx, result) in reader.byte_records().enumerate() {
            let record = result?;
            let values = record
                .iter()
                .map(|v| CellValue::from(String::from_utf8_lossy(v).as_ref()))
                .collect();
            let row = build_row(idx + 2, &headers, values);

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    fn cell_value(cell: &Data) -> CellValue {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) => CellValue::from(s.as_str()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.as_str()),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_rows(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        if bytes.is_empty() {
            return Err(ImportError::ExcelParseError("文件内容为空".to_string()));
        }

        // 按内容自动识别 xlsx / xls / xlsb / ods
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 区域起点（calamine 会裁掉前导空行）
        let first_row = range.start().map_or(0, |(row, _)| row as usize);

        // 提取表头（第一行）；无表头视为无数据
        let mut rows = range.rows();
        let header_row = match rows.next() {
            Some(header_row) => header_row,
            None => return Ok(Vec::new()),
        };
        let headers = label_headers(header_row.iter().map(|cell| cell.to_string()));

        // 读取数据行
        let mut records = Vec::new();
        for (idx, data_row) in rows.enumerate() {
            let values = data_row.iter().map(Self::cell_value).collect();
            let row = build_row(first_row + idx + 2, &headers, values);

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }
            records.push(row);
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据文件名选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 文件名以 .csv 结尾时按 CSV 解析，其余一律交给 Excel 自动识别
    pub fn parser_for(&self, file_name: Option<&str>) -> Box<dyn FileParser> {
        let is_csv = file_name
            .map(|name| name.trim().to_lowercase().ends_with(".csv"))
            .unwrap_or(false);

        if is_csv {
            Box::new(CsvParser)
        } else {
            Box::new(ExcelParser)
        }
    }

    pub fn parse(&self, file_name: Option<&str>, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        self.parser_for(file_name).parse_to_raw_rows(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn xlsx_bytes(rows: &[Vec<&str>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_label_headers() {
        let labels = label_headers(vec![
            "Nombre".to_string(),
            "".to_string(),
            "Nombre".to_string(),
            " ".to_string(),
        ]);
        assert_eq!(labels, vec!["Nombre", "__EMPTY", "Nombre_1", "__EMPTY_1"]);
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let csv = "Nombre,Saldo,Ubicación\nTaladro,10,Mueble 2\nCable,,\n";
        let rows = CsvParser.parse_to_raw_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(
            rows[0].cells[0],
            ("Nombre".to_string(), CellValue::Text("Taladro".to_string()))
        );
        assert_eq!(rows[1].cells[1], ("Saldo".to_string(), CellValue::Empty));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows_and_pad() {
        let csv = "\u{feff}Nombre,Marca\nA,X\n,\nB\n";
        let rows = CsvParser.parse_to_raw_rows(csv.as_bytes()).unwrap();

        // 应跳过空行，短行补 Empty
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells[0].0, "Nombre");
        assert_eq!(rows[1].row_number, 4);
        assert_eq!(rows[1].cells[1], ("Marca".to_string(), CellValue::Empty));
    }

    #[test]
    fn test_excel_parser_first_sheet() {
        let bytes = xlsx_bytes(&[
            vec!["Nombre", "Saldo"],
            vec!["Taladro", "10"],
            vec!["", ""],
            vec!["Cable", ""],
        ]);
        let rows = ExcelParser.parse_to_raw_rows(&bytes).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[1].row_number, 4);
        assert_eq!(rows[1].cells[1], ("Saldo".to_string(), CellValue::Empty));
    }

    #[test]
    fn test_excel_parser_header_only() {
        let bytes = xlsx_bytes(&[vec!["Nombre", "Saldo"]]);
        let rows = ExcelParser.parse_to_raw_rows(&bytes).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_excel_parser_rejects_garbage() {
        let result = ExcelParser.parse_to_raw_rows(b"this is not a spreadsheet");
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));

        let result = ExcelParser.parse_to_raw_rows(&[]);
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    #[test]
    fn test_universal_parser_dispatch() {
        let parser = UniversalFileParser;
        let rows = parser
            .parse(Some("inventario.CSV"), b"Nombre\nTaladro\n")
            .unwrap();
        assert_eq!(rows.len(), 1);

        let result = parser.parse(Some("inventario.xlsx"), b"Nombre\nTaladro\n");
        assert!(result.is_err());
    }
}
