use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::RegisterClass;

/// ST 源文件解析配置
/// 说明：集中管理“规则参数”（分区标记、缓冲区命名约定），避免散落在扫描逻辑中。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StSourceConfig {
    /// Holding 分区标记（`// === <marker>`），按顺序尝试
    pub holding_markers: Vec<String>,
    /// Input 分区标记
    pub input_markers: Vec<String>,
    /// 函数结束标记；分区最远延伸到这里
    pub end_marker: String,
    /// Holding 缓冲区标识符需包含的子串（区分大小写）
    pub holding_buffer_marker: String,
    /// Input 缓冲区标识符需包含的子串（区分大小写）
    pub input_buffer_marker: String,
    /// 模块子段头的关键字（`Module DI1 (100-115): ...`）
    pub module_keywords: Vec<String>,
}

impl Default for StSourceConfig {
    fn default() -> Self {
        Self {
            holding_markers: vec![
                "HOLDING РЕГИСТРЫ".to_string(),
                "HOLDING REGISTERS".to_string(),
            ],
            input_markers: vec![
                "INPUT РЕГИСТРЫ".to_string(),
                "INPUT REGISTERS".to_string(),
            ],
            end_marker: "END_FUNCTION".to_string(),
            holding_buffer_marker: "Holding".to_string(),
            input_buffer_marker: "Input".to_string(),
            module_keywords: vec!["Module".to_string(), "Модуль".to_string()],
        }
    }
}

impl StSourceConfig {
    /// 从 JSON 文件加载；文件不存在时返回默认配置
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source config file from: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse source config JSON from: {}", path.display()))?;
        Ok(config)
    }

    pub fn markers_for(&self, class: RegisterClass) -> &[String] {
        match class {
            RegisterClass::Holding => &self.holding_markers,
            RegisterClass::Input => &self.input_markers,
        }
    }

    pub fn buffer_marker_for(&self, class: RegisterClass) -> &str {
        match class {
            RegisterClass::Holding => &self.holding_buffer_marker,
            RegisterClass::Input => &self.input_buffer_marker,
        }
    }
}
