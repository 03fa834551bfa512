//! XLSX 导出。
//!
//! 工作簿 sheet 顺序固定：
//! - Статистика（汇总统计）
//! - Holding Registers / Input Registers（每类一张，5 列）
//!
//! 数据行按段分组（段起始地址 → 地址 → 位），每段前插入一行合并的分隔行。

use std::path::Path;

use chrono::Utc;
use log::debug;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use thiserror::Error;

use super::{sha256_digest_prefixed, write_bytes_atomic};
use crate::domain::{DataType, MapStatistics, RegisterClass, RegisterMap, RegisterRecord};
use crate::ports::{ExportSummary, MapExporter};

pub const STATISTICS_SHEET_NAME: &str = "Статистика";

pub const HEADERS_REGISTERS: [&str; 5] = ["Адрес", "Тип данных", "Переменная PLC", "Описание", "Секция"];

const COLOR_HEADER: u32 = 0xD9D9D9;
const COLOR_BOOL: u32 = 0xDAEEF3;
const COLOR_REAL: u32 = 0xD9EAD3;
const COLOR_INT: u32 = 0xFFF2CC;
const COLOR_SECTION: u32 = 0xF2F2F2;

const MIN_COLUMN_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 60;

const NO_SECTION_LABEL: &str = "(без секции)";

#[derive(Debug, Error)]
pub enum ExportXlsxError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn sheet_name(class: RegisterClass) -> &'static str {
    match class {
        RegisterClass::Holding => "Holding Registers",
        RegisterClass::Input => "Input Registers",
    }
}

fn fill_color(data_type: DataType) -> u32 {
    match data_type {
        DataType::Bool => COLOR_BOOL,
        DataType::Real => COLOR_REAL,
        DataType::Int => COLOR_INT,
    }
}

/// 构建工作簿并返回 xlsx 字节
pub fn render_xlsx(map: &RegisterMap) -> Result<Vec<u8>, ExportXlsxError> {
    let mut workbook = Workbook::new();
    let statistics = MapStatistics::from_map(map);

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(STATISTICS_SHEET_NAME)?;
        write_statistics(sheet, &statistics)?;
    }

    for class in RegisterClass::ALL {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(class))?;
        write_register_sheet(sheet, map, class)?;
    }

    Ok(workbook.save_to_buffer()?)
}

pub fn export_map_xlsx(map: &RegisterMap, out_path: &Path) -> Result<ExportSummary, ExportXlsxError> {
    let bytes = render_xlsx(map)?;
    write_bytes_atomic(out_path, &bytes)?;
    debug!("wrote {} registers to {}", map.registers.len(), out_path.display());
    Ok(ExportSummary {
        out_path: out_path.to_path_buf(),
        rows: map.registers.len(),
        digest: sha256_digest_prefixed(&bytes),
        generated_at_utc: Utc::now(),
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

impl MapExporter for XlsxExporter {
    fn export(&self, map: &RegisterMap, out_path: &Path) -> anyhow::Result<ExportSummary> {
        Ok(export_map_xlsx(map, out_path)?)
    }

    fn format_name(&self) -> &'static str {
        "xlsx"
    }
}

/// 段起始地址 → 段名 → 地址 → 位；无段记录排在最前
fn records_by_section(map: &RegisterMap, class: RegisterClass) -> Vec<&RegisterRecord> {
    let mut records: Vec<&RegisterRecord> = map.registers_of(class).collect();
    records.sort_by_cached_key(|r| {
        let start = map.find_section(class, &r.section_name).map(|s| s.start);
        (start, r.section_name.clone(), r.address, r.bit_index)
    });
    records
}

fn write_register_sheet(
    sheet: &mut Worksheet,
    map: &RegisterMap,
    class: RegisterClass,
) -> Result<(), XlsxError> {
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(COLOR_HEADER))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let section_format = Format::new()
        .set_bold()
        .set_font_size(10)
        .set_background_color(Color::RGB(COLOR_SECTION));

    for (col, header) in HEADERS_REGISTERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let mut widths: Vec<usize> = HEADERS_REGISTERS.iter().map(|h| h.chars().count()).collect();
    let mut current_section: Option<&str> = None;
    let mut row: u32 = 1;

    for record in records_by_section(map, class) {
        if current_section != Some(record.section_name.as_str()) {
            current_section = Some(record.section_name.as_str());
            let name = if record.section_name.is_empty() {
                NO_SECTION_LABEL
            } else {
                record.section_name.as_str()
            };
            let last_col = (HEADERS_REGISTERS.len() - 1) as u16;
            sheet.merge_range(row, 0, row, last_col, &format!("▼ {name}"), &section_format)?;
            row += 1;
        }

        let row_format = Format::new()
            .set_background_color(Color::RGB(fill_color(record.data_type)))
            .set_border(FormatBorder::Thin)
            .set_text_wrap();
        let cells = [
            record.display_address(),
            record.data_type.as_str().to_string(),
            record.variable_name.clone(),
            record.description.clone(),
            record.section_name.clone(),
        ];
        for (col, value) in cells.iter().enumerate() {
            sheet.write_string_with_format(row, col as u16, value, &row_format)?;
            widths[col] = widths[col].max(value.chars().count());
        }
        row += 1;
    }

    for (col, width) in widths.iter().enumerate() {
        let width = (width + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        sheet.set_column_width(col as u16, width as f64)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    sheet.autofilter(0, 0, row.saturating_sub(1), (HEADERS_REGISTERS.len() - 1) as u16)?;
    Ok(())
}

fn write_statistics(sheet: &mut Worksheet, stats: &MapStatistics) -> Result<(), XlsxError> {
    let title_format = Format::new().set_bold().set_font_size(14);
    let bold = Format::new().set_bold();

    sheet.write_string_with_format(0, 0, "Статистика Modbus регистров", &title_format)?;

    sheet.write_string_with_format(2, 0, "Общая статистика:", &bold)?;
    sheet.write_string(3, 0, "Всего регистров:")?;
    sheet.write_number(3, 1, stats.total_registers as f64)?;
    sheet.write_string(4, 0, "Всего секций:")?;
    sheet.write_number(4, 1, stats.total_sections as f64)?;
    sheet.write_string(5, 0, "Покрытие описаниями:")?;
    sheet.write_string(5, 1, &format!("{:.1}%", stats.coverage.percent()))?;

    let mut row: u32 = 7;
    sheet.write_string_with_format(row, 0, "Регистры по классам:", &bold)?;
    row += 1;
    for (class, count) in &stats.by_class {
        sheet.write_string(row, 0, &format!("{}:", sheet_name(*class)))?;
        sheet.write_number(row, 1, *count as f64)?;
        row += 1;
    }

    row += 1;
    sheet.write_string_with_format(row, 0, "Регистры по типам данных:", &bold)?;
    row += 1;
    for (data_type, count) in &stats.by_data_type {
        sheet.write_string(row, 0, &format!("{}:", data_type))?;
        sheet.write_number(row, 1, *count as f64)?;
        row += 1;
    }

    row += 1;
    sheet.write_string_with_format(row, 0, "Топ-10 секций по количеству регистров:", &bold)?;
    row += 1;
    for section in &stats.top_sections {
        let name = if section.name.is_empty() {
            NO_SECTION_LABEL
        } else {
            section.name.as_str()
        };
        sheet.write_string(row, 0, name)?;
        sheet.write_number(row, 1, section.count as f64)?;
        row += 1;
    }

    sheet.set_column_width(0, 45)?;
    sheet.set_column_width(1, 12)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Section;

    fn record(address: u32, bit: Option<u8>, data_type: DataType, section: &str) -> RegisterRecord {
        RegisterRecord {
            class: RegisterClass::Holding,
            address,
            bit_index: bit,
            data_type,
            variable_name: format!("var{address}"),
            section_name: section.to_string(),
            description: String::new(),
        }
    }

    fn section(name: &str, start: u32, end: u32) -> Section {
        Section {
            class: RegisterClass::Holding,
            name: name.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn rows_are_grouped_by_section_start() {
        let map = RegisterMap {
            sections: vec![section("Conveyors", 200, 210), section("Bunkers", 10, 19)],
            registers: vec![
                record(201, Some(0), DataType::Bool, "Conveyors"),
                record(12, None, DataType::Real, "Bunkers"),
                record(3, None, DataType::Int, ""),
                record(10, None, DataType::Int, "Bunkers"),
            ],
        };
        let order: Vec<u32> = records_by_section(&map, RegisterClass::Holding)
            .iter()
            .map(|r| r.address)
            .collect();
        assert_eq!(order, vec![3, 10, 12, 201]);
    }

    #[test]
    fn fill_color_follows_data_type() {
        assert_eq!(fill_color(DataType::Bool), COLOR_BOOL);
        assert_eq!(fill_color(DataType::Real), COLOR_REAL);
        assert_eq!(fill_color(DataType::Int), COLOR_INT);
    }

    #[test]
    fn workbook_renders_as_zip_container() {
        let map = RegisterMap {
            sections: vec![section("Conveyors", 200, 210)],
            registers: vec![record(200, Some(3), DataType::Bool, "Conveyors")],
        };
        let bytes = render_xlsx(&map).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn exporter_writes_workbook_and_summary() {
        let dir = std::env::temp_dir().join(format!("modbus-map-{}", uuid::Uuid::new_v4()));
        let out_path = dir.join("modbus_map.xlsx");
        let map = RegisterMap {
            sections: Vec::new(),
            registers: vec![record(1, None, DataType::Int, "")],
        };
        let summary = XlsxExporter.export(&map, &out_path).unwrap();

        assert!(out_path.exists());
        assert_eq!(summary.rows, 1);
        assert!(summary.digest.starts_with("sha256:"));
        assert_eq!(XlsxExporter.format_name(), "xlsx");
        let _ = std::fs::remove_dir_all(dir);
    }
}
