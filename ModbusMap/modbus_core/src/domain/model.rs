//! 寄存器表数据模型。
//!
//! 约束：
//! - 记录的存储主键为 `(class, address, bit_index)`；本层不做去重。
//! - `bit_index` 仅在 `DataType::Bool` 时存在。
//! - 一次解析产生一个新的 `RegisterMap`，不跨调用保留状态。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 寄存器类别：Holding（SCADA → PLC 可写）/ Input（PLC → SCADA 只读）。
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegisterClass {
    #[serde(rename = "holding_registers")]
    Holding,
    #[serde(rename = "input_registers")]
    Input,
}

impl RegisterClass {
    /// 解析顺序固定：先 Holding 后 Input。
    pub const ALL: [RegisterClass; 2] = [RegisterClass::Holding, RegisterClass::Input];

    /// 导出时使用的稳定键名
    pub fn key(self) -> &'static str {
        match self {
            RegisterClass::Holding => "holding_registers",
            RegisterClass::Input => "input_registers",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RegisterClass::Holding => "Holding Registers (SCADA → PLC)",
            RegisterClass::Input => "Input Registers (PLC → SCADA)",
        }
    }
}

impl fmt::Display for RegisterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    Bool,
    Real,
    Int,
}

impl DataType {
    /// 值占用的连续寄存器数量
    pub fn register_count(self) -> u16 {
        match self {
            DataType::Bool => 1,
            DataType::Real => 2,
            DataType::Int => 1,
        }
    }

    /// 是否携带位索引（0..=15）
    pub fn has_bit_index(self) -> bool {
        matches!(self, DataType::Bool)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Bool => "BOOL",
            DataType::Real => "REAL",
            DataType::Int => "INT",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 段（section）：同一寄存器类别内按名称唯一，地址区间为闭区间。
/// 区间是否重叠、是否超出 Modbus 地址空间都不做校验，按源文件声明原样透传。
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub class: RegisterClass,
    pub name: String,
    pub start: u32,
    pub end: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRecord {
    pub class: RegisterClass,
    pub address: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_index: Option<u8>,
    pub data_type: DataType,
    /// 原始变量路径，如 `stBunker[1].rWeight`
    pub variable_name: String,
    /// 所属段名；段头出现之前的语句为空字符串
    pub section_name: String,
    /// 解析后的描述；未命中时为空
    #[serde(default)]
    pub description: String,
}

impl RegisterRecord {
    /// 下游存储的主键
    pub fn key(&self) -> (RegisterClass, u32, Option<u8>) {
        (self.class, self.address, self.bit_index)
    }

    /// 显示地址：BOOL 为 `addr.bit`，双寄存器类型为 `addr-addr+1`，其余为 `addr`。
    pub fn display_address(&self) -> String {
        match (self.data_type, self.bit_index) {
            (DataType::Bool, Some(bit)) => format!("{}.{}", self.address, bit),
            (data_type, _) if data_type.register_count() == 2 => {
                format!("{}-{}", self.address, u64::from(self.address) + 1)
            }
            _ => self.address.to_string(),
        }
    }
}

/// 一次解析的完整输出：段表 + 寄存器记录。
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterMap {
    pub sections: Vec<Section>,
    pub registers: Vec<RegisterRecord>,
}

impl RegisterMap {
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    pub fn registers_of(&self, class: RegisterClass) -> impl Iterator<Item = &RegisterRecord> {
        self.registers.iter().filter(move |r| r.class == class)
    }

    pub fn sections_of(&self, class: RegisterClass) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.class == class)
    }

    pub fn find_section(&self, class: RegisterClass, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.class == class && s.name == name)
    }
}
