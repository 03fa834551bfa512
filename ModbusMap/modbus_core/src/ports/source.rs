use crate::domain::RegisterMap;

/// 寄存器表来源端口
/// 说明：解析本身不会失败，无法识别的输入得到空或部分结果，由上层判定是否可用。
pub trait RegisterMapSource {
    /// 解析完整源文本为段表 + 寄存器记录（描述字段留空）
    fn parse(&self, text: &str) -> RegisterMap;
    /// 来源格式标识，用于日志/诊断
    fn source_kind(&self) -> &'static str;
}
