//! 行内扫描工具：逐字符游标，替代正则匹配。

/// 跳过前导空白
pub(crate) fn skip_ws(text: &str) -> &str {
    text.trim_start()
}

/// 至少跳过一个空白字符；没有空白时返回 None（对应 `\s+`）
pub(crate) fn skip_ws1(text: &str) -> Option<&str> {
    let rest = text.trim_start();
    if rest.len() == text.len() {
        None
    } else {
        Some(rest)
    }
}

/// 读取连续 ASCII 数字，返回 (数字串, 剩余文本)
pub(crate) fn take_digits(text: &str) -> Option<(&str, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some(text.split_at(end))
}

/// 读取 `\d+` 并转换为 u32；超出 u32 视为不匹配
pub(crate) fn take_u32(text: &str) -> Option<(u32, &str)> {
    let (digits, rest) = take_digits(text)?;
    digits.parse::<u32>().ok().map(|value| (value, rest))
}

/// 读取标识符 `\w+`（字母、数字、下划线）
pub(crate) fn take_ident(text: &str) -> Option<(&str, &str)> {
    let end = text
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some(text.split_at(end))
}

/// 读取 `(<start>-<end>)`，返回区间与剩余文本
pub(crate) fn take_range(text: &str) -> Option<((u32, u32), &str)> {
    let rest = text.strip_prefix('(')?;
    let (start, rest) = take_u32(rest)?;
    let rest = rest.strip_prefix('-')?;
    let (end, rest) = take_u32(rest)?;
    let rest = rest.strip_prefix(')')?;
    Some(((start, end), rest))
}

/// 去掉行首 `//` 及其后的空白；要求至少一个空白（对应 `//\s+`）
pub(crate) fn comment_body(line: &str) -> Option<&str> {
    let rest = skip_ws(line).strip_prefix("//")?;
    skip_ws1(rest)
}

/// 在 `text` 中查找 `name\s*<op>`，返回 op 之后的文本。
/// 名称后不是期望的运算符时继续向后查找下一次出现。
pub(crate) fn find_binding<'a>(text: &'a str, name: &str, ops: &[&str]) -> Option<&'a str> {
    let mut from = 0;
    while let Some(pos) = text[from..].find(name) {
        let after = &text[from + pos + name.len()..];
        let trimmed = skip_ws(after);
        if let Some(op) = ops.iter().find(|op| trimmed.starts_with(**op)) {
            return Some(&trimmed[op.len()..]);
        }
        from += pos + name.len();
    }
    None
}

/// 在 `text` 中查找 `name\s*:=\s*\d+`，返回数值串与剩余文本
pub(crate) fn find_int_binding<'a>(text: &'a str, name: &str) -> Option<(&'a str, &'a str)> {
    let mut from = 0;
    while let Some(rest) = find_binding(&text[from..], name, &[":="]) {
        if let Some(found) = take_digits(skip_ws(rest)) {
            return Some(found);
        }
        from = text.len() - rest.len();
    }
    None
}
