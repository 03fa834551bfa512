//! `modbus_map.json` 导出。
//!
//! 布局与历史工具一致：
//! `{ "holding_registers": { "description", "registers": [...] }, "input_registers": {...} }`，
//! 每条记录 `{section, address, data_type, variable, description}`，地址为展示格式。

use std::path::Path;

use chrono::Utc;
use log::debug;
use serde::Serialize;
use thiserror::Error;

use super::{records_by_address, sha256_digest_prefixed, write_bytes_atomic};
use crate::domain::{RegisterClass, RegisterMap, RegisterRecord};
use crate::ports::{ExportSummary, MapExporter};

#[derive(Debug, Error)]
pub enum ExportJsonError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct JsonMapV1<'a> {
    holding_registers: JsonClassV1<'a>,
    input_registers: JsonClassV1<'a>,
}

#[derive(Debug, Serialize)]
struct JsonClassV1<'a> {
    description: &'static str,
    registers: Vec<JsonRegisterV1<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonRegisterV1<'a> {
    section: &'a str,
    address: String,
    data_type: &'static str,
    variable: &'a str,
    description: &'a str,
}

impl<'a> From<&'a RegisterRecord> for JsonRegisterV1<'a> {
    fn from(record: &'a RegisterRecord) -> Self {
        Self {
            section: &record.section_name,
            address: record.display_address(),
            data_type: record.data_type.as_str(),
            variable: &record.variable_name,
            description: &record.description,
        }
    }
}

fn class_entry(map: &RegisterMap, class: RegisterClass) -> JsonClassV1<'_> {
    JsonClassV1 {
        description: class.label(),
        registers: records_by_address(map, class)
            .into_iter()
            .map(JsonRegisterV1::from)
            .collect(),
    }
}

/// 渲染为 JSON 文本（2 空格缩进，非 ASCII 原样输出）
pub fn render_json(map: &RegisterMap) -> Result<String, ExportJsonError> {
    let doc = JsonMapV1 {
        holding_registers: class_entry(map, RegisterClass::Holding),
        input_registers: class_entry(map, RegisterClass::Input),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn export_map_json(map: &RegisterMap, out_path: &Path) -> Result<ExportSummary, ExportJsonError> {
    let text = render_json(map)?;
    write_bytes_atomic(out_path, text.as_bytes())?;
    debug!("wrote {} registers to {}", map.registers.len(), out_path.display());
    Ok(ExportSummary {
        out_path: out_path.to_path_buf(),
        rows: map.registers.len(),
        digest: sha256_digest_prefixed(text.as_bytes()),
        generated_at_utc: Utc::now(),
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl MapExporter for JsonExporter {
    fn export(&self, map: &RegisterMap, out_path: &Path) -> anyhow::Result<ExportSummary> {
        Ok(export_map_json(map, out_path)?)
    }

    fn format_name(&self) -> &'static str {
        "json"
    }
}
