//! 按类别标记切分源文件分区。
//!
//! 分区从 `// === <marker>` 所在行的下一行开始，到下一个 `// ===` 注释、
//! 结束标记（默认 `END_FUNCTION`）或文件末尾为止，取最先出现者。

use super::scan::skip_ws;

const SEPARATOR: &str = "===";

/// 返回类别分区文本；找不到标记或分区为空时返回 None
pub fn extract_region<'a>(text: &'a str, markers: &[String], end_marker: &str) -> Option<&'a str> {
    let start = markers
        .iter()
        .filter(|m| !m.is_empty())
        .find_map(|marker| marker_line_end(text, marker))?;
    let body = &text[start..];
    let region = &body[..region_end(body, end_marker)];
    if region.trim().is_empty() {
        return None;
    }
    Some(region)
}

/// 找到首个 `//\s*===\s*<marker>`，返回该行之后的字节偏移
fn marker_line_end(text: &str, marker: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = text[from..].find("//") {
        let comment_at = from + pos;
        let after = skip_ws(&text[comment_at + 2..]);
        if let Some(rest) = after.strip_prefix(SEPARATOR) {
            if skip_ws(rest).starts_with(marker) {
                let line_end = text[comment_at..].find('\n')?;
                return Some(comment_at + line_end + 1);
            }
        }
        from = comment_at + 2;
    }
    None
}

fn region_end(body: &str, end_marker: &str) -> usize {
    let next_separator = separator_offset(body);
    let end_of_routine = if end_marker.is_empty() {
        None
    } else {
        body.find(end_marker)
    };
    [next_separator, end_of_routine]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(body.len())
}

fn separator_offset(body: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = body[from..].find("//") {
        let comment_at = from + pos;
        if skip_ws(&body[comment_at + 2..]).starts_with(SEPARATOR) {
            return Some(comment_at);
        }
        from = comment_at + 2;
    }
    None
}
