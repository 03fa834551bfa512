//! 寄存器表导出适配器（JSON / XLSX）。

pub mod json;
pub mod xlsx;

use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::domain::{RegisterClass, RegisterMap, RegisterRecord};

pub use json::{ExportJsonError, JsonExporter};
pub use xlsx::{ExportXlsxError, XlsxExporter};

/// `sha256:<hex>`
pub(crate) fn sha256_digest_prefixed(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for b in digest {
        hex.push_str(&format!("{:02x}", b));
    }
    format!("sha256:{hex}")
}

/// 先写临时文件再 rename，避免留下半截输出
pub(crate) fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp = staging_path(path);
    std::fs::write(&tmp, bytes)?;
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    std::fs::rename(tmp, path)?;
    Ok(())
}

/// `modbus_map.json` → `modbus_map.json.tmp`，不同格式的输出互不冲突
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// 某类别的记录，按 (地址, 位) 排序
pub(crate) fn records_by_address(map: &RegisterMap, class: RegisterClass) -> Vec<&RegisterRecord> {
    let mut records: Vec<&RegisterRecord> = map.registers_of(class).collect();
    records.sort_by_key(|r| (r.address, r.bit_index));
    records
}
