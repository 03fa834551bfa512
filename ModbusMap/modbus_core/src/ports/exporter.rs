use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::RegisterMap;

/// 导出结果摘要（可追溯：输出路径 + 内容摘要 + 生成时间）
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub out_path: PathBuf,
    pub rows: usize,
    /// `sha256:<hex>`
    pub digest: String,
    pub generated_at_utc: DateTime<Utc>,
}

/// 寄存器表导出端口
pub trait MapExporter {
    /// 把寄存器表写入 `out_path`
    fn export(&self, map: &RegisterMap, out_path: &Path) -> Result<ExportSummary>;
    /// 格式名称，同时作为默认文件扩展名
    fn format_name(&self) -> &'static str;
}
