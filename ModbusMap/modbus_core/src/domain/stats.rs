//! 寄存器表统计：总数 / 按类别 / 按数据类型 / Top 段 / 描述覆盖率。

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::model::{DataType, RegisterClass, RegisterMap, RegisterRecord};

/// Top 段列表的长度上限
pub const TOP_SECTIONS_LIMIT: usize = 10;

/// 描述解析覆盖率。未命中不是错误，只在这里汇总给调用方。
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CoverageReport {
    pub resolved: usize,
    pub unresolved: usize,
    /// 未命中的变量路径（按出现顺序）
    pub unresolved_variables: Vec<String>,
}

impl CoverageReport {
    /// 只有记录可用时按描述是否非空估算；解析时的准确结果见 `DescriptionResolver::annotate`
    pub fn from_records(records: &[RegisterRecord]) -> Self {
        let mut report = Self::default();
        for record in records {
            report.record(&record.variable_name, !record.description.is_empty());
        }
        report
    }

    pub fn record(&mut self, variable_name: &str, resolved: bool) {
        if resolved {
            self.resolved += 1;
        } else {
            self.unresolved += 1;
            self.unresolved_variables.push(variable_name.to_string());
        }
    }

    pub fn total(&self) -> usize {
        self.resolved + self.unresolved
    }

    /// 覆盖率百分比；没有记录时为 0
    pub fn percent(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.resolved as f64 * 100.0 / self.total() as f64
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionCount {
    pub name: String,
    pub count: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MapStatistics {
    pub total_registers: usize,
    /// 被寄存器实际引用的段数量
    pub total_sections: usize,
    pub by_class: BTreeMap<RegisterClass, usize>,
    /// 按数量降序；数量相同按类型名排序
    pub by_data_type: Vec<(DataType, usize)>,
    pub top_sections: Vec<SectionCount>,
    pub coverage: CoverageReport,
}

impl MapStatistics {
    pub fn from_map(map: &RegisterMap) -> Self {
        let mut by_class: BTreeMap<RegisterClass, usize> = BTreeMap::new();
        let mut by_type: HashMap<DataType, usize> = HashMap::new();
        let mut by_section: HashMap<&str, usize> = HashMap::new();
        let mut referenced: HashSet<(RegisterClass, &str)> = HashSet::new();

        for record in &map.registers {
            *by_class.entry(record.class).or_insert(0) += 1;
            *by_type.entry(record.data_type).or_insert(0) += 1;
            // 段名跨类别合并计数（与历史报表一致）
            *by_section.entry(record.section_name.as_str()).or_insert(0) += 1;
            referenced.insert((record.class, record.section_name.as_str()));
        }

        let mut by_data_type: Vec<(DataType, usize)> = by_type.into_iter().collect();
        by_data_type.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut top_sections: Vec<SectionCount> = by_section
            .into_iter()
            .map(|(name, count)| SectionCount {
                name: name.to_string(),
                count,
            })
            .collect();
        top_sections.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        top_sections.truncate(TOP_SECTIONS_LIMIT);

        Self {
            total_registers: map.registers.len(),
            total_sections: referenced.len(),
            by_class,
            by_data_type,
            top_sections,
            coverage: CoverageReport::from_records(&map.registers),
        }
    }
}
