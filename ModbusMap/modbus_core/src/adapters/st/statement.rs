//! 寄存器访问语句解析。
//!
//! 语法形如：
//! `FC_ModbusWriteBool(pRegisters := ADR(aHoldingRegisters), iRegisterIndex := 200, iBitIndex := 3, xValue := stConveyor.xHLA);`
//!
//! 三种访问（Bool/Real/Int）文本上非常相似，按固定顺序逐一尝试，首个命中即返回。

use log::{debug, warn};

use super::scan::{find_binding, find_int_binding, skip_ws, take_ident};
use crate::domain::DataType;

const CALL_PREFIX: &str = "FC_Modbus";
const DIRECTIONS: [&str; 2] = ["Read", "Write"];
const BUFFER_PARAM: &str = "pRegisters";
const ADDRESS_PARAM: &str = "iRegisterIndex";
const VALUE_OPERATORS: [&str; 2] = ["=>", ":="];
const MAX_BIT_INDEX: u8 = 15;

/// 访问类型：每个变体自带所需字段集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Bool,
    Real,
    Int,
}

impl AccessKind {
    /// 尝试顺序（互斥）
    pub const ORDERED: [AccessKind; 3] = [AccessKind::Bool, AccessKind::Real, AccessKind::Int];

    fn call_suffix(self) -> &'static str {
        match self {
            AccessKind::Bool => "Bool",
            AccessKind::Real => "Real",
            AccessKind::Int => "Int",
        }
    }

    /// 位索引参数；只有 Bool 需要
    fn bit_index_param(self) -> Option<&'static str> {
        match self {
            AccessKind::Bool => Some("iBitIndex"),
            AccessKind::Real | AccessKind::Int => None,
        }
    }

    fn value_param(self) -> &'static str {
        match self {
            AccessKind::Bool => "xValue",
            AccessKind::Real => "rValue",
            AccessKind::Int => "nValue",
        }
    }

    pub fn data_type(self) -> DataType {
        match self {
            AccessKind::Bool => DataType::Bool,
            AccessKind::Real => DataType::Real,
            AccessKind::Int => DataType::Int,
        }
    }

    /// 按本类型语法提取一条语句；任一必需字段缺失即不匹配
    fn extract(self, line: &str) -> Option<RegisterStatement> {
        let (buffer, rest) = self.locate_call(line)?;

        let (digits, rest) = find_int_binding(rest, ADDRESS_PARAM)?;
        let Ok(address) = digits.parse::<u32>() else {
            debug!("register index {} out of range: {}", digits, line.trim());
            return None;
        };
        if address > u32::from(u16::MAX) {
            warn!("register index {} is beyond the Modbus address space: {}", address, line.trim());
        }

        let (bit_index, rest) = match self.bit_index_param() {
            Some(param) => {
                let (digits, rest) = find_int_binding(rest, param)?;
                match digits.parse::<u8>() {
                    Ok(bit) if bit <= MAX_BIT_INDEX => (Some(bit), rest),
                    _ => {
                        debug!("bit index {} out of range: {}", digits, line.trim());
                        return None;
                    }
                }
            }
            None => (None, rest),
        };

        let value = find_binding(rest, self.value_param(), &VALUE_OPERATORS)?;
        let variable = take_variable(value)?;

        Some(RegisterStatement {
            kind: self,
            buffer: buffer.to_string(),
            address,
            bit_index,
            variable,
        })
    }

    /// 定位 `FC_Modbus(Read|Write)<Suffix>(pRegisters := ADR(<ident>)`，
    /// 返回缓冲区标识符与其后的文本
    fn locate_call(self, line: &str) -> Option<(&str, &str)> {
        let mut from = 0;
        while let Some(pos) = line[from..].find(CALL_PREFIX) {
            let after = &line[from + pos + CALL_PREFIX.len()..];
            if let Some(found) = self.call_head(after) {
                return Some(found);
            }
            from += pos + CALL_PREFIX.len();
        }
        None
    }

    fn call_head(self, text: &str) -> Option<(&str, &str)> {
        let rest = DIRECTIONS.iter().find_map(|d| text.strip_prefix(*d))?;
        let rest = rest.strip_prefix(self.call_suffix())?.strip_prefix('(')?;
        let rest = skip_ws(rest).strip_prefix(BUFFER_PARAM)?;
        let rest = skip_ws(rest).strip_prefix(":=")?;
        let rest = skip_ws(rest).strip_prefix("ADR(")?;
        let (buffer, rest) = take_ident(rest)?;
        let rest = rest.strip_prefix(')')?;
        Some((buffer, rest))
    }
}

/// 取到第一个 `)` 为止的变量表达式，并去掉结尾的 `)`/`;`
fn take_variable(text: &str) -> Option<String> {
    let text = skip_ws(text);
    let close = text.find(')')?;
    let variable = text[..close]
        .trim()
        .trim_end_matches(|c: char| c == ')' || c == ';');
    if variable.is_empty() {
        return None;
    }
    Some(variable.to_string())
}

/// 一条已识别的寄存器访问语句（尚未判定类别）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterStatement {
    pub kind: AccessKind,
    /// `ADR(...)` 中的缓冲区标识符，用于类别判定
    pub buffer: String,
    pub address: u32,
    pub bit_index: Option<u8>,
    pub variable: String,
}

/// 单一入口：按 Bool → Real → Int 顺序尝试；不匹配的行返回 None（不是错误）
pub fn parse_statement(line: &str) -> Option<RegisterStatement> {
    AccessKind::ORDERED
        .iter()
        .find_map(|kind| kind.extract(line))
}
