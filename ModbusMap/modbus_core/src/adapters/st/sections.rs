//! 段头识别与当前段状态跟踪。
//!
//! 三种段头按优先级尝试（越具体越靠前），否则通用模式会误吞具体模式：
//! 1. `// DI MODULES MAPPING (0-99)`
//! 2. `// Module DI1 (100-115): Input channel block`
//! 3. `// Conveyors (200-210)`

use std::collections::HashMap;

use log::{debug, warn};

use super::scan::{comment_body, skip_ws, skip_ws1, take_digits, take_range};
use crate::domain::{RegisterClass, Section};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionHeader {
    /// 顶层硬件模块映射：`<KIND> MODULES MAPPING (<start>-<end>)`
    ModuleMapping { kind: String, start: u32, end: u32 },
    /// 模块实例：`<keyword> <KIND><N> (<start>-<end>): <描述>`
    ModuleInstance {
        keyword: String,
        kind: String,
        number: String,
        description: String,
        start: u32,
        end: u32,
    },
    /// 通用设备段：`<标题> (<start>-<end>)`
    Equipment { title: String, start: u32, end: u32 },
}

impl SectionHeader {
    pub fn name(&self) -> String {
        match self {
            SectionHeader::ModuleMapping { kind, .. } => format!("{kind} MODULES MAPPING"),
            SectionHeader::ModuleInstance {
                keyword,
                kind,
                number,
                description,
                ..
            } => format!("{keyword} {kind}{number}: {description}"),
            SectionHeader::Equipment { title, .. } => title.clone(),
        }
    }

    pub fn range(&self) -> (u32, u32) {
        match self {
            SectionHeader::ModuleMapping { start, end, .. }
            | SectionHeader::ModuleInstance { start, end, .. }
            | SectionHeader::Equipment { start, end, .. } => (*start, *end),
        }
    }
}

/// 按优先级识别一行段头；非段头返回 None
pub fn parse_header(line: &str, module_keywords: &[String]) -> Option<SectionHeader> {
    let body = comment_body(line)?;
    parse_module_mapping(body)
        .or_else(|| parse_module_instance(body, module_keywords))
        .or_else(|| parse_equipment(body))
}

fn take_upper(text: &str) -> Option<(&str, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some(text.split_at(end))
}

fn parse_module_mapping(body: &str) -> Option<SectionHeader> {
    let (kind, rest) = take_upper(body)?;
    let rest = skip_ws1(rest)?.strip_prefix("MODULES")?;
    let rest = skip_ws1(rest)?.strip_prefix("MAPPING")?;
    let ((start, end), _) = take_range(skip_ws(rest))?;
    Some(SectionHeader::ModuleMapping {
        kind: kind.to_string(),
        start,
        end,
    })
}

fn parse_module_instance(body: &str, module_keywords: &[String]) -> Option<SectionHeader> {
    let (keyword, rest) = module_keywords
        .iter()
        .filter(|k| !k.is_empty())
        .find_map(|k| body.strip_prefix(k.as_str()).map(|rest| (k, rest)))?;
    let (kind, rest) = take_upper(skip_ws1(rest)?)?;
    let (number, rest) = take_digits(rest)?;
    let ((start, end), rest) = take_range(skip_ws(rest))?;
    let description = skip_ws(rest.strip_prefix(':')?).trim_end();
    if description.is_empty() {
        return None;
    }
    Some(SectionHeader::ModuleInstance {
        keyword: keyword.clone(),
        kind: kind.to_string(),
        number: number.to_string(),
        description: description.to_string(),
        start,
        end,
    })
}

fn parse_equipment(body: &str) -> Option<SectionHeader> {
    body.char_indices()
        .filter(|(idx, c)| *c == '(' && *idx > 0)
        .find_map(|(idx, _)| {
            let ((start, end), _) = take_range(&body[idx..])?;
            let title = body[..idx].trim_end();
            (!title.is_empty()).then(|| SectionHeader::Equipment {
                title: title.to_string(),
                start,
                end,
            })
        })
}

/// 单个类别分区内的段状态。
/// 每个分区新建一个实例，因此“当前段”不会跨分区泄漏。
#[derive(Debug)]
pub struct SectionTracker<'a> {
    class: RegisterClass,
    module_keywords: &'a [String],
    current: String,
    sections: Vec<Section>,
    index: HashMap<String, usize>,
}

impl<'a> SectionTracker<'a> {
    pub fn new(class: RegisterClass, module_keywords: &'a [String]) -> Self {
        Self {
            class,
            module_keywords,
            current: String::new(),
            sections: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// 尝试把该行当作段头处理；是段头时返回 true（调用方不再做语句解析）
    pub fn observe(&mut self, line: &str) -> bool {
        let Some(header) = parse_header(line, self.module_keywords) else {
            return false;
        };
        let name = header.name();
        let (start, end) = header.range();
        self.declare(&name, start, end);
        self.current = name;
        true
    }

    /// 同名段首次声明生效，重复声明只切换当前段
    fn declare(&mut self, name: &str, start: u32, end: u32) {
        if let Some(&idx) = self.index.get(name) {
            let existing = &self.sections[idx];
            if (existing.start, existing.end) != (start, end) {
                warn!(
                    "section '{}' ({}) redeclared with range {}-{}, keeping {}-{}",
                    name, self.class, start, end, existing.start, existing.end
                );
            }
            return;
        }
        if end > u32::from(u16::MAX) {
            warn!(
                "section '{}' ({}) range {}-{} is beyond the Modbus address space",
                name, self.class, start, end
            );
        }
        debug!("section '{}' ({}) {}-{}", name, self.class, start, end);
        self.index.insert(name.to_string(), self.sections.len());
        self.sections.push(Section {
            class: self.class,
            name: name.to_string(),
            start,
            end,
        });
    }

    pub fn current_section(&self) -> &str {
        &self.current
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        vec!["Module".to_string(), "Модуль".to_string()]
    }

    #[test]
    fn module_mapping_header_has_highest_priority() {
        let header = parse_header("// DI MODULES MAPPING (0-99)", &keywords()).unwrap();
        assert_eq!(header.name(), "DI MODULES MAPPING");
        assert_eq!(header.range(), (0, 99));
    }

    #[test]
    fn module_instance_wins_over_generic_header() {
        let header =
            parse_header("// Module DI1 (100-115): Input channel block", &keywords()).unwrap();
        assert!(matches!(header, SectionHeader::ModuleInstance { .. }));
        assert_eq!(header.name(), "Module DI1: Input channel block");
        assert_eq!(header.range(), (100, 115));
    }

    #[test]
    fn cyrillic_module_keyword_is_accepted() {
        let header =
            parse_header("// Модуль DO2 (120-127): Выходы шкафа  \r", &keywords()).unwrap();
        assert_eq!(header.name(), "Модуль DO2: Выходы шкафа");
    }

    #[test]
    fn generic_header_takes_text_before_first_range() {
        let header = parse_header("// Bunker 1 (vibro) (300-349) spare", &keywords()).unwrap();
        assert_eq!(header.name(), "Bunker 1 (vibro)");
        assert_eq!(header.range(), (300, 349));
    }

    #[test]
    fn plain_comments_are_not_headers() {
        assert_eq!(parse_header("// just a note", &keywords()), None);
        assert_eq!(parse_header("//Conveyors (1-2)", &keywords()), None);
        assert_eq!(parse_header("// (1-2)", &keywords()), None);
        assert_eq!(parse_header("x := 1; // Conveyors (1-2)", &keywords()), None);
    }

    #[test]
    fn redeclared_section_is_recorded_once_and_first_range_wins() {
        let kw = keywords();
        let mut tracker = SectionTracker::new(RegisterClass::Holding, &kw);
        assert!(tracker.observe("// Conveyors (200-210)"));
        assert!(tracker.observe("// Bunkers (0-99)"));
        assert_eq!(tracker.current_section(), "Bunkers");
        assert!(tracker.observe("// Conveyors (200-210)"));
        assert!(tracker.observe("// Conveyors (500-510)"));
        assert_eq!(tracker.current_section(), "Conveyors");

        let sections = tracker.into_sections();
        assert_eq!(sections.len(), 2);
        assert_eq!((sections[0].start, sections[0].end), (200, 210));
    }

    #[test]
    fn non_header_lines_leave_state_untouched() {
        let kw = keywords();
        let mut tracker = SectionTracker::new(RegisterClass::Input, &kw);
        assert!(!tracker.observe("FC_ModbusReadInt(pRegisters := ADR(aInput));"));
        assert_eq!(tracker.current_section(), "");
    }
}
