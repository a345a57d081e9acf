//! 通用工具函数

/// 将字符串转换为标题格式（每个单词首字母大写，其余小写）
///
/// 空白和连字符都视为单词边界并原样保留，
/// `"acme  CORP"` → `"Acme  Corp"`，`"green-leaf"` → `"Green-Leaf"`
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for ch in input.chars() {
        if ch.is_whitespace() || ch == '-' {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}
