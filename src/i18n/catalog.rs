//! String lookup with language fallback and font-size aware markup.

use super::Language;

const SIZE_TAG_OPEN: &str = "<size=";

/// Resolve `key` against the current language, then the fallback language.
///
/// Missing keys resolve to `default` when given, otherwise to the key
/// itself. The result is passed through [`apply_font_size`].
pub fn lookup(
    current: &Language,
    fallback: Option<&Language>,
    key: &str,
    font_size_hint: i32,
    default: Option<&str>,
) -> String {
    let raw = current
        .get(key)
        .or_else(|| fallback.and_then(|lang| lang.get(key)))
        .or(default)
        .unwrap_or(key);

    apply_font_size(raw, font_size_hint)
}

/// Rewrite relative `<size=NN%>` tags into absolute `<size=N>` tags for
/// the given font size.
///
/// A non-positive hint means no single font size applies and the text is
/// returned unchanged. Absolute sizes are rounded and never below 1.
pub fn apply_font_size(text: &str, font_size_hint: i32) -> String {
    if font_size_hint <= 0 || !text.contains(SIZE_TAG_OPEN) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(SIZE_TAG_OPEN) {
        out.push_str(&rest[..start]);
        let tag = &rest[start..];

        let Some(end) = tag.find('>') else {
            out.push_str(tag);
            return out;
        };

        let value = &tag[SIZE_TAG_OPEN.len()..end];
        match value.strip_suffix('%').and_then(|pct| pct.trim().parse::<f32>().ok()) {
            Some(percent) => {
                let size = (font_size_hint as f32 * percent / 100.0).round().max(1.0) as i32;
                out.push_str(&format!("{SIZE_TAG_OPEN}{size}>"));
            }
            None => out.push_str(&tag[..=end]),
        }

        rest = &tag[end + 1..];
    }

    out.push_str(rest);
    out
}
