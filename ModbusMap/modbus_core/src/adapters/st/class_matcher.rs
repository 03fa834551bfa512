use crate::domain::RegisterClass;

use super::config::StSourceConfig;

/// 缓冲区标识符是否属于给定类别（按命名约定，区分大小写）。
/// 两个标记都不包含的标识符不属于任何类别。
pub fn matches_class(buffer: &str, class: RegisterClass, config: &StSourceConfig) -> bool {
    let marker = config.buffer_marker_for(class);
    !marker.is_empty() && buffer.contains(marker)
}
