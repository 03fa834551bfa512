//! 变量描述：静态查找表 + 回退解析链。
//!
//! 查找表不可变，显式传入解析器；内置表进程内只构建一次。

mod builtin;
pub mod resolver;
pub mod rules;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use resolver::{resolve, DescriptionResolver};
pub use rules::{Candidates, StructuralRule, Trigger};

/// 名称 → 描述文本
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptionTable {
    entries: HashMap<String, String>,
}

impl DescriptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 进程级内置表（首次访问时构建）
    pub fn builtin() -> &'static DescriptionTable {
        static BUILTIN: OnceLock<DescriptionTable> = OnceLock::new();
        BUILTIN.get_or_init(|| Self::from_pairs(builtin::BUILTIN_DESCRIPTIONS.iter().copied()))
    }

    /// 从 JSON 对象文件加载（`{"rWeight": "..."}`）
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| {
            format!("Failed to read description table from: {}", path.display())
        })?;
        let table: Self = serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse description table JSON from: {}", path.display())
        })?;
        Ok(table)
    }

    /// 以 `self` 为底，叠加 `overrides`（同名键以 overrides 为准）
    pub fn layered(&self, overrides: &DescriptionTable) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(
            overrides
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_shared_and_populated() {
        let a = DescriptionTable::builtin();
        let b = DescriptionTable::builtin();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.get("xHLA"), Some("Световая сигнализация"));
        assert_eq!(a.len(), builtin::BUILTIN_DESCRIPTIONS.len());
    }

    #[test]
    fn layered_table_prefers_overrides() {
        let base = DescriptionTable::from_pairs([("rWeight", "old"), ("xHLA", "light")]);
        let overrides = DescriptionTable::from_pairs([("rWeight", "new"), ("extra", "x")]);
        let merged = base.layered(&overrides);
        assert_eq!(merged.get("rWeight"), Some("new"));
        assert_eq!(merged.get("xHLA"), Some("light"));
        assert_eq!(merged.get("extra"), Some("x"));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn table_reads_plain_json_object() {
        let table: DescriptionTable =
            serde_json::from_str(r#"{ "cmdReset": "Сброс ошибок" }"#).unwrap();
        assert!(table.contains("cmdReset"));
        assert!(!table.is_empty());
    }

    fn temp_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("modbus-map-table-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn table_file_is_loaded_and_layered() {
        let dir = temp_dir();
        let path = dir.join("descriptions.json");
        fs::write(&path, r#"{ "rWeight": "Весы (кг)", "xNew": "Новый сигнал" }"#).unwrap();

        let overrides = DescriptionTable::load_from_file(&path).unwrap();
        assert_eq!(overrides.len(), 2);
        let merged = DescriptionTable::builtin().layered(&overrides);
        assert_eq!(merged.get("rWeight"), Some("Весы (кг)"));
        assert_eq!(merged.get("xHLA"), Some("Световая сигнализация"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn malformed_table_file_fails_with_path() {
        let dir = temp_dir();
        let path = dir.join("descriptions.json");
        fs::write(&path, r#"["rWeight"]"#).unwrap();

        let err = DescriptionTable::load_from_file(&path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Failed to parse description table JSON"));
        assert!(message.contains(&path.display().to_string()));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_table_file_is_an_error_with_path() {
        let err = DescriptionTable::load_from_file(Path::new("no/such/descriptions.json"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("no/such/descriptions.json"));
    }
}
