//! String literal unescaping.

/// Unescape the body of a string literal (without the surrounding quotes).
///
/// Returns the byte offset (within `content`) of the first invalid escape
/// on failure.
pub(crate) fn unescape_string(content: &str) -> Result<String, usize> {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.char_indices();
    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '"')) => out.push('"'),
            Some((_, '\\')) => out.push('\\'),
            Some((_, 'n')) => out.push('\n'),
            Some((_, 't')) => out.push('\t'),
            Some((_, 'r')) => out.push('\r'),
            _ => return Err(offset),
        }
    }
    Ok(out)
}
