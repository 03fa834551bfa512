//! 结构化回退规则：触发条件 + 候选键集合，按列表顺序求值。
//!
//! 多条规则的触发条件有重叠（例如 `stBunker` 路径同时满足通用 conveyor 规则），
//! 靠顺序消歧：更具体的规则必须排在前面。新规则追加到列表末尾即可。

use super::DescriptionTable;

/// 规则触发条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// 任一 token 是路径分量
    HasComponent(&'static [&'static str]),
    /// 所有 token 都是路径分量
    HasAllComponents(&'static [&'static str]),
    /// 原始路径包含任一子串
    PathContains(&'static [&'static str]),
}

impl Trigger {
    fn matches(&self, path: &str, parts: &[&str]) -> bool {
        match self {
            Trigger::HasComponent(tokens) => tokens.iter().any(|t| parts.contains(t)),
            Trigger::HasAllComponents(tokens) => tokens.iter().all(|t| parts.contains(t)),
            Trigger::PathContains(needles) => needles.iter().any(|n| path.contains(n)),
        }
    }
}

/// 候选键的选取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidates {
    /// 紧跟在首个 token 分量之后的字段
    FieldAfter(&'static str),
    /// 固定优先级的键列表；键必须同时是路径分量
    Keys(&'static [&'static str]),
    /// 带任一前缀的路径分量，按路径顺序
    Prefixed(&'static [&'static str]),
    /// 任意路径分量，按路径顺序
    AnyComponent,
}

impl Candidates {
    fn lookup<'t>(&self, parts: &[&str], table: &'t DescriptionTable) -> Option<&'t str> {
        match self {
            Candidates::FieldAfter(token) => {
                let idx = parts.iter().position(|p| p == token)?;
                table.get(parts.get(idx + 1)?)
            }
            Candidates::Keys(keys) => keys
                .iter()
                .filter(|key| parts.contains(key))
                .find_map(|key| table.get(key)),
            Candidates::Prefixed(prefixes) => parts
                .iter()
                .filter(|part| prefixes.iter().any(|prefix| part.starts_with(prefix)))
                .find_map(|part| table.get(part)),
            Candidates::AnyComponent => parts.iter().find_map(|part| table.get(part)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralRule {
    pub name: &'static str,
    pub trigger: Trigger,
    pub candidates: Candidates,
}

impl StructuralRule {
    /// 触发且命中时返回描述
    pub fn apply<'t>(
        &self,
        path: &str,
        parts: &[&str],
        table: &'t DescriptionTable,
    ) -> Option<&'t str> {
        if !self.trigger.matches(path, parts) {
            return None;
        }
        self.candidates.lookup(parts, table)
    }
}

const SETTINGS_KEYS: &[&str] = &[
    "OPTION_ENABLE",
    "TIME_ACTIVE",
    "TIME_PAUSE_VIBRATOR",
    "TIME_PAUSE_FB",
    "TIME_FIRST_SIGNAL",
    "TIME_FIRST_SIGNAL_PAUSE",
    "TIME_SECOND_SIGNAL",
    "TIME_SECOND_SIGNAL_PAUSE",
];

/// 默认规则链（顺序即优先级）
pub const DEFAULT_RULES: &[StructuralRule] = &[
    // MotorVibFeeder[N].VFD.qrOutFrequency
    StructuralRule {
        name: "vfd-field",
        trigger: Trigger::HasComponent(&["VFD"]),
        candidates: Candidates::FieldAfter("VFD"),
    },
    // MotorVibFeeder[N].rTempBearing[N]
    StructuralRule {
        name: "bearing-temperature",
        trigger: Trigger::HasAllComponents(&["MotorVibFeeder", "rTempBearing"]),
        candidates: Candidates::Keys(&["rTempBearing"]),
    },
    // BUNKER_1_TEMP_BEARING_1_POINTS.LL_Value
    StructuralRule {
        name: "alarm-setpoint",
        trigger: Trigger::PathContains(&["_POINTS"]),
        candidates: Candidates::Keys(&["LL_Value", "L_Value", "H_Value", "HH_Value"]),
    },
    // BUNKER_1_VIBRATOR_SETTINGS.TIME_ACTIVE
    StructuralRule {
        name: "settings",
        trigger: Trigger::PathContains(&["_SETTINGS", "VIBRATOR_SETTINGS", "PNEUMO_SETTINGS"]),
        candidates: Candidates::Keys(SETTINGS_KEYS),
    },
    // stCommands.cmdResetAll.ixSignal
    StructuralRule {
        name: "command",
        trigger: Trigger::HasComponent(&["stCommands"]),
        candidates: Candidates::Prefixed(&["cmd"]),
    },
    // stCommonSignals.fbQF1.qxSignal
    StructuralRule {
        name: "common-signal",
        trigger: Trigger::HasComponent(&["stCommonSignals"]),
        candidates: Candidates::Prefixed(&["fb", "qx"]),
    },
    // stBunker[N].fbStateHatch.qxSignal
    StructuralRule {
        name: "bunker",
        trigger: Trigger::HasComponent(&["stBunker", "Bunker"]),
        candidates: Candidates::Prefixed(&["fb", "cmd", "qx", "r", "x"]),
    },
    // stDumper.cmdStartConveyor.ixSignal
    StructuralRule {
        name: "conveyor-dumper",
        trigger: Trigger::HasComponent(&["stDumper", "stConveyor", "Dumper", "Conveyor"]),
        candidates: Candidates::AnyComponent,
    },
];
