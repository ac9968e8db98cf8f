//! Escape processing for fully resolved values

/// Turn a resolved value into its final form.
///
/// `{{` and `}}` collapse to single braces first, then `\n`, `\t` and `\\`
/// become newline, tab and backslash. Any other backslash pair is kept as is.
pub fn unescape(value: &str) -> String {
    let braces = value.replace("{{", "{").replace("}}", "}");
    let mut out = String::with_capacity(braces.len());
    let mut chars = braces.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
