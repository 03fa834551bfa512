//! 变量路径 → 描述。
//!
//! 路径由 `.` 字段访问与 `[i]` 数组下标组成，先把下标规整为 `.` 分量，然后依次尝试：
//! 1. 整路径精确匹配
//! 2. 后缀匹配（从最具体到最不具体，如 `VFD.qrOutFrequency` 先于 `qrOutFrequency`）
//! 3. 仅最后一个分量
//! 4. 结构化规则链（见 [`super::rules`]）
//!
//! 全部未命中返回 None，调用方写入空描述。

use log::debug;

use super::rules::{StructuralRule, DEFAULT_RULES};
use super::DescriptionTable;
use crate::domain::{CoverageReport, RegisterRecord};

#[derive(Debug, Clone)]
pub struct DescriptionResolver {
    rules: Vec<StructuralRule>,
}

impl Default for DescriptionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

impl DescriptionResolver {
    pub fn new(rules: Vec<StructuralRule>) -> Self {
        Self { rules }
    }

    /// 在规则链末尾追加一条规则
    pub fn with_rule(mut self, rule: StructuralRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[StructuralRule] {
        &self.rules
    }

    pub fn resolve<'t>(&self, path: &str, table: &'t DescriptionTable) -> Option<&'t str> {
        resolve_with_rules(path, table, &self.rules)
    }

    /// 为记录填充描述，返回覆盖率统计
    pub fn annotate(&self, records: &mut [RegisterRecord], table: &DescriptionTable) -> CoverageReport {
        let mut report = CoverageReport::default();
        for record in records.iter_mut() {
            let resolved = self.resolve(&record.variable_name, table);
            if resolved.is_none() {
                debug!("no description for '{}'", record.variable_name);
            }
            record.description = resolved.unwrap_or_default().to_string();
            report.record(&record.variable_name, resolved.is_some());
        }
        report
    }
}

/// 使用默认规则链解析
pub fn resolve<'t>(path: &str, table: &'t DescriptionTable) -> Option<&'t str> {
    resolve_with_rules(path, table, DEFAULT_RULES)
}

fn resolve_with_rules<'t>(
    path: &str,
    table: &'t DescriptionTable,
    rules: &[StructuralRule],
) -> Option<&'t str> {
    if let Some(text) = table.get(path) {
        return Some(text);
    }

    let normalized = normalize(path);
    let parts: Vec<&str> = normalized.split('.').collect();

    // 后缀匹配：i = 0 即规整后的整路径
    for i in 0..parts.len() {
        if let Some(text) = table.get(&parts[i..].join(".")) {
            return Some(text);
        }
    }

    if let Some(text) = parts.last().and_then(|last| table.get(last)) {
        return Some(text);
    }

    rules
        .iter()
        .find_map(|rule| rule.apply(path, &parts, table))
}

/// `a[1].b` → `a.1.b`
fn normalize(path: &str) -> String {
    path.replace('[', ".").replace(']', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptions::rules::{Candidates, Trigger};
    use crate::domain::{DataType, RegisterClass};

    fn builtin() -> &'static DescriptionTable {
        DescriptionTable::builtin()
    }

    #[test]
    fn normalize_turns_brackets_into_components() {
        assert_eq!(normalize("stBunker[1].rWeight"), "stBunker.1.rWeight");
        assert_eq!(normalize("a[1][2]"), "a.1.2");
    }

    #[test]
    fn bunker_weight_resolves_via_suffix() {
        let table = DescriptionTable::from_pairs([("rWeight", "Весы бункера")]);
        assert_eq!(resolve("stBunker[1].rWeight", &table), Some("Весы бункера"));
    }

    #[test]
    fn vfd_output_frequency_resolves() {
        let table = DescriptionTable::from_pairs([("qrOutFrequency", "Выходная частота")]);
        assert_eq!(
            resolve("stBunker[1].MotorVibFeeder[1].VFD.qrOutFrequency", &table),
            Some("Выходная частота")
        );
    }

    #[test]
    fn vfd_rule_handles_nested_field_after_drive() {
        // 最后一个分量不在表中，靠 VFD 规则取其后的字段
        let table = DescriptionTable::from_pairs([("wMotorCurrent", "Ток")]);
        assert_eq!(
            resolve("stDumper.MotorConveyor[1].VFD.wMotorCurrent.raw", &table),
            Some("Ток")
        );
    }

    #[test]
    fn unknown_variable_is_absent() {
        assert_eq!(resolve("stSomeUnknownVariable.xSomeField", builtin()), None);
        assert_eq!(
            resolve("stSomeUnknownVariable.xSomeField", &DescriptionTable::new()),
            None
        );
    }

    #[test]
    fn exact_match_beats_suffix() {
        let table = DescriptionTable::from_pairs([
            ("stBunker[1].rWeight", "exact"),
            ("rWeight", "suffix"),
        ]);
        assert_eq!(resolve("stBunker[1].rWeight", &table), Some("exact"));
    }

    #[test]
    fn more_specific_suffix_wins() {
        let table = DescriptionTable::from_pairs([
            ("VFD.qrOutFrequency", "drive output"),
            ("qrOutFrequency", "output"),
        ]);
        assert_eq!(
            resolve("stBunker[1].MotorVibFeeder[1].VFD.qrOutFrequency", &table),
            Some("drive output")
        );
    }

    #[test]
    fn builtin_table_covers_historical_paths() {
        let cases = [
            ("SIMULATION", "Режим симуляции"),
            ("stBunker[2].rProportionActual", "Пропорция от веса"),
            (
                "stBunker[1].fbStateHatch.qxSignal",
                "Положение люка (1 - закрыт , 0 - открыт )",
            ),
            ("stBunker[2].MotorVibFeeder[1].VFD.rActualFrequency", "Текущая частота ЧРП"),
            (
                "stBunker[1].MotorVibFeeder[1].rTempBearing[1]",
                "Температура подшипникового узла (в °C)",
            ),
            ("stCommands.cmdResetAll.ixSignal", "Сброс всех ошибок"),
            ("stCommonSignals.fbEmergencyStopBtn.qxSignal", "Кнопка \"Аварийная остановка\""),
            ("stDumper.cmdStartConveyor.ixSignal", "Команда пуска конвейера"),
            ("stConveyor.xHLA", "Световая сигнализация"),
            ("BUNKER_2_TEMP_BEARING_2_POINTS.HH_Value", "Уставка High-High"),
            ("PRESTART_ALARM_DUMPER_SETTINGS.OPTION_ENABLE", "Опция на включение ППЗ в алгоритм"),
        ];
        for (path, expected) in cases {
            assert_eq!(resolve(path, builtin()), Some(expected), "path {path}");
        }
    }

    #[test]
    fn appended_rule_runs_after_defaults() {
        let table = DescriptionTable::from_pairs([("fbPressure", "Давление")]);
        let path = "stPump.fbPressure.qxSignal";
        assert_eq!(resolve(path, &table), None);

        let resolver = DescriptionResolver::default().with_rule(StructuralRule {
            name: "pump",
            trigger: Trigger::HasComponent(&["stPump"]),
            candidates: Candidates::Prefixed(&["fb"]),
        });
        assert_eq!(resolver.rules().len(), DEFAULT_RULES.len() + 1);
        assert_eq!(resolver.resolve(path, &table), Some("Давление"));
    }

    #[test]
    fn empty_table_entry_counts_as_resolved() {
        let table = DescriptionTable::from_pairs([("xSpare", "")]);
        let mut records = vec![RegisterRecord {
            class: RegisterClass::Input,
            address: 5,
            bit_index: Some(0),
            data_type: DataType::Bool,
            variable_name: "stConveyor.xSpare".to_string(),
            section_name: String::new(),
            description: "stale".to_string(),
        }];

        let report = DescriptionResolver::default().annotate(&mut records, &table);
        assert_eq!(records[0].description, "");
        assert_eq!(report.resolved, 1);
        assert_eq!(report.unresolved, 0);
        assert!(report.unresolved_variables.is_empty());
    }

    #[test]
    fn annotate_fills_descriptions_and_reports_coverage() {
        let mut records = vec![
            RegisterRecord {
                class: RegisterClass::Holding,
                address: 200,
                bit_index: Some(3),
                data_type: DataType::Bool,
                variable_name: "stConveyor.xHLA".to_string(),
                section_name: "Conveyors".to_string(),
                description: String::new(),
            },
            RegisterRecord {
                class: RegisterClass::Holding,
                address: 201,
                bit_index: Some(0),
                data_type: DataType::Bool,
                variable_name: "stSomeUnknownVariable.xSomeField".to_string(),
                section_name: "Conveyors".to_string(),
                description: "stale".to_string(),
            },
        ];

        let report = DescriptionResolver::default().annotate(&mut records, builtin());
        assert_eq!(records[0].description, "Световая сигнализация");
        assert_eq!(records[1].description, "");
        assert_eq!(report.resolved, 1);
        assert_eq!(
            report.unresolved_variables,
            vec!["stSomeUnknownVariable.xSomeField".to_string()]
        );
    }
}
