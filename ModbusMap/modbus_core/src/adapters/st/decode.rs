use std::borrow::Cow;

use encoding_rs::WINDOWS_1251;
use log::warn;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 源文件字节 → 文本。
/// 优先按 UTF-8（去掉 BOM）；非法 UTF-8 时按 Windows-1251 解码（西里尔字母工程导出常见）。
pub fn decode_source(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(err) => {
            warn!(
                "source is not valid UTF-8 (at byte {}), decoding as windows-1251",
                err.valid_up_to()
            );
            let (cow, _, _) = WINDOWS_1251.decode(bytes);
            cow
        }
    }
}
