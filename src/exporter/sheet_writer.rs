// ==========================================
// 物料库存系统 - 表格编码器
// ==========================================
// 职责: 导出行 → 文件字节
// 格式: xlsx（单工作表 "Inventario"）/ csv（UTF-8，首行为表头）
// ==========================================

use crate::exporter::error::{ExportError, ExportResult};
use crate::exporter::projector::{ExportRow, EXPORT_HEADERS};
use csv::WriterBuilder;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

/// 导出工作表名
pub const SHEET_NAME: &str = "Inventario";

/// f64 可精确表示的最大整数（2^53 - 1）
const MAX_EXACT_INTEGER: u128 = (1 << 53) - 1;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// 按查询参数解析（大小写不敏感），未知值回落 xlsx
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("csv") => ExportFormat::Csv,
            _ => ExportFormat::Xlsx,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

/// 按格式编码
pub fn encode(rows: &[ExportRow], format: ExportFormat) -> ExportResult<Vec<u8>> {
    match format {
        ExportFormat::Xlsx => write_xlsx(rows),
        ExportFormat::Csv => write_csv(rows),
    }
}

fn write_text(sheet: &mut Worksheet, row: u32, col: u16, value: &str) -> Result<(), XlsxError> {
    // 空字符串不落单元格，读取侧同样视为空
    if !value.is_empty() {
        sheet.write_string(row, col, value)?;
    }
    Ok(())
}

/// 整数单元格：f64 可精确表示时写数值，否则写文本，保证读回不失真
fn write_integer(sheet: &mut Worksheet, row: u32, col: u16, value: i128) -> Result<(), XlsxError> {
    if value.unsigned_abs() <= MAX_EXACT_INTEGER {
        sheet.write_number(row, col, value as f64)?;
    } else {
        sheet.write_string(row, col, value.to_string())?;
    }
    Ok(())
}

/// 生成 xlsx：表头一行 + 每条记录一行；ID、SALDO 为整数单元格
pub fn write_xlsx(rows: &[ExportRow]) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (idx, export_row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        write_integer(sheet, r, 0, i128::from(export_row.id))?;
        write_text(sheet, r, 1, &export_row.nombre)?;
        write_text(sheet, r, 2, &export_row.marca)?;
        write_text(sheet, r, 3, &export_row.descripcion)?;
        write_text(sheet, r, 4, &export_row.unidad)?;
        write_text(sheet, r, 5, &export_row.ubicacion)?;
        write_integer(sheet, r, 6, i128::from(export_row.saldo))?;
        write_text(sheet, r, 7, &export_row.notas)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// 生成 csv：表头一行 + 每条记录一行
pub fn write_csv(rows: &[ExportRow]) -> ExportResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::CsvWriteError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_auto_from_rs, Data, Reader};
    use std::io::Cursor;

    fn sample_rows() -> Vec<ExportRow> {
        vec![ExportRow {
            id: 4,
            nombre: "Taladro".to_string(),
            marca: "Bosch".to_string(),
            descripcion: String::new(),
            unidad: "UND".to_string(),
            ubicacion: "Mueble".to_string(),
            saldo: 10,
            notas: "revisar".to_string(),
        }]
    }

    #[test]
    fn test_format_from_param() {
        assert_eq!(ExportFormat::from_param(None), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::from_param(Some("CSV")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_param(Some("pdf")), ExportFormat::Xlsx);
    }

    #[test]
    fn test_xlsx_sheet_name_and_layout() {
        let bytes = write_xlsx(&sample_rows()).unwrap();

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Inventario".to_string()]);

        let range = workbook.worksheet_range("Inventario").unwrap();
        let header: Vec<String> = range.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
        assert_eq!(header, EXPORT_HEADERS.to_vec());

        assert_eq!(range.get_value((1, 0)), Some(&Data::Float(4.0)));
        assert_eq!(range.get_value((1, 1)), Some(&Data::String("Taladro".to_string())));
        assert_eq!(range.get_value((1, 6)), Some(&Data::Float(10.0)));
    }

    #[test]
    fn test_xlsx_large_integers_written_as_text() {
        let mut rows = sample_rows();
        rows[0].id = u64::MAX;
        rows[0].saldo = i64::MIN;
        rows.push(ExportRow {
            id: (1 << 53) - 1,
            saldo: (1 << 53) + 1,
            ..sample_rows().remove(0)
        });

        let bytes = write_xlsx(&rows).unwrap();
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range("Inventario").unwrap();

        assert_eq!(
            range.get_value((1, 0)),
            Some(&Data::String("18446744073709551615".to_string()))
        );
        assert_eq!(
            range.get_value((1, 6)),
            Some(&Data::String("-9223372036854775808".to_string()))
        );
        assert_eq!(
            range.get_value((2, 0)),
            Some(&Data::Float(9007199254740991.0))
        );
        assert_eq!(
            range.get_value((2, 6)),
            Some(&Data::String("9007199254740993".to_string()))
        );
    }

    #[test]
    fn test_xlsx_empty_store_has_header_only() {
        let bytes = write_xlsx(&[]).unwrap();
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range("Inventario").unwrap();
        assert_eq!(range.rows().count(), 1);
    }

    #[test]
    fn test_csv_layout() {
        let bytes = write_csv(&sample_rows()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("ID,NOMBRE,MARCA,DESCRIPCION,UNIDAD,UBICACION,SALDO,NOTAS")
        );
        assert_eq!(lines.next(), Some("4,Taladro,Bosch,,UND,Mueble,10,revisar"));
        assert_eq!(lines.next(), None);
    }
}
