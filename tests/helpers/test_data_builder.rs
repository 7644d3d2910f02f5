// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use more_inventory::domain::material::NewMaterial;
use more_inventory::domain::types::Ubicacion;
use rust_xlsxwriter::{Workbook, Worksheet};

// ==========================================
// NewMaterial 构建器
// ==========================================

pub struct MaterialBuilder {
    material: NewMaterial,
}

impl MaterialBuilder {
    pub fn new(nombre: &str) -> Self {
        Self {
            material: NewMaterial::named(nombre),
        }
    }

    pub fn marca(mut self, marca: &str) -> Self {
        self.material.marca = marca.to_string();
        self
    }

    pub fn descripcion(mut self, descripcion: &str) -> Self {
        self.material.descripcion = descripcion.to_string();
        self
    }

    pub fn unidad(mut self, unidad: &str) -> Self {
        self.material.unidad = unidad.to_string();
        self
    }

    pub fn mueble(mut self) -> Self {
        self.material.ubicacion = Ubicacion::Mueble;
        self
    }

    pub fn saldo(mut self, saldo: i64) -> Self {
        self.material.saldo = saldo;
        self
    }

    pub fn notas(mut self, notas: &str) -> Self {
        self.material.notas = notas.to_string();
        self
    }

    pub fn build(self) -> NewMaterial {
        self.material
    }
}

// ==========================================
// 表格夹具
// ==========================================

/// 生成只含文本单元格的 xlsx（空字符串不写入）
pub fn xlsx_bytes(rows: &[Vec<&str>]) -> Vec<u8> {
    xlsx_bytes_with(|sheet| {
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
    })
}

/// 自定义写入首个工作表
pub fn xlsx_bytes_with<F>(fill: F) -> Vec<u8>
where
    F: FnOnce(&mut Worksheet),
{
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    fill(sheet);
    workbook.save_to_buffer().unwrap()
}
