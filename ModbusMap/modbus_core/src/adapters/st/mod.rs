//! IEC 61131-3 ST 源文件适配器（`FC_ModbusToSCADA.st` 形式）。
//!
//! 流程：按类别标记切分分区 → 逐行段头识别 → 语句解析 → 类别判定。
//! 无法识别的行直接跳过，不做语法校验；本层不产生错误。

mod class_matcher;
mod config;
mod decode;
mod region;
mod scan;
mod sections;
mod statement;

use log::debug;

use crate::domain::{RegisterClass, RegisterMap, RegisterRecord};
use crate::ports::RegisterMapSource;

pub use class_matcher::matches_class;
pub use config::StSourceConfig;
pub use decode::decode_source;
pub use region::extract_region;
pub use sections::{parse_header, SectionHeader, SectionTracker};
pub use statement::{parse_statement, AccessKind, RegisterStatement};

/// ST 源解析器：无内部状态，每次调用返回新的结果
#[derive(Debug, Clone, Default)]
pub struct StSourceParser {
    config: StSourceConfig,
}

impl StSourceParser {
    pub fn new(config: StSourceConfig) -> Self {
        Self { config }
    }
}

impl RegisterMapSource for StSourceParser {
    fn parse(&self, text: &str) -> RegisterMap {
        parse_source(text, &self.config)
    }

    fn source_kind(&self) -> &'static str {
        "iec61131-st"
    }
}

/// 整个源文件：依次解析 Holding / Input 分区并合并
pub fn parse_source(text: &str, config: &StSourceConfig) -> RegisterMap {
    let mut map = RegisterMap::default();
    for class in RegisterClass::ALL {
        let Some(region) = extract_region(text, config.markers_for(class), &config.end_marker)
        else {
            debug!("no {} region found", class);
            continue;
        };
        let part = parse_region(region, class, config);
        debug!(
            "{}: {} sections, {} registers",
            class,
            part.sections.len(),
            part.registers.len()
        );
        map.sections.extend(part.sections);
        map.registers.extend(part.registers);
    }
    map
}

/// 单个分区：段头优先（命中后不再做语句解析），其余行交给语句解析器
pub fn parse_region(text: &str, class: RegisterClass, config: &StSourceConfig) -> RegisterMap {
    let mut tracker = SectionTracker::new(class, &config.module_keywords);
    let mut registers = Vec::new();

    for line in text.lines() {
        if tracker.observe(line) {
            continue;
        }
        let Some(stmt) = parse_statement(line) else {
            continue;
        };
        if !matches_class(&stmt.buffer, class, config) {
            debug!(
                "skip {:?} access to '{}' in {} pass",
                stmt.kind, stmt.buffer, class
            );
            continue;
        }
        registers.push(RegisterRecord {
            class,
            address: stmt.address,
            bit_index: stmt.bit_index,
            data_type: stmt.kind.data_type(),
            variable_name: stmt.variable,
            section_name: tracker.current_section().to_string(),
            description: String::new(),
        });
    }

    RegisterMap {
        sections: tracker.into_sections(),
        registers,
    }
}
