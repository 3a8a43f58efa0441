//! Character-by-character reveal for the about text.

pub const CHAR_CLASS: &str = "about-char";
/// Opacity every character starts at before the scroll tween lifts it to 1.
pub const START_OPACITY: f64 = 0.1;

/// Wrap each visible character of `html` in its own span, leaving tags and
/// whitespace as they are.
pub fn split_chars(html: &str) -> String {
    let mut out = String::with_capacity(html.len() * 8);
    let mut in_tag = false;
    for c in html.chars() {
        if c == '<' {
            in_tag = true;
        }
        if !in_tag && !c.is_whitespace() {
            out.push_str("<span class=\"");
            out.push_str(CHAR_CLASS);
            out.push_str("\" style=\"opacity: ");
            out.push_str(&START_OPACITY.to_string());
            out.push_str(";\">");
            out.push(c);
            out.push_str("</span>");
        } else {
            out.push(c);
        }
        if c == '>' {
            in_tag = false;
        }
    }
    out
}
