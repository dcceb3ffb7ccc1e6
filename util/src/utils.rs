/// Formats a count with thousands separators, like "1,234,567".
pub fn prettyprint_usize(x: usize) -> String {
    let digits = x.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The file name, without its directory. Falls back to the whole input if there's no file name.
pub fn file_name<I: AsRef<str>>(path: I) -> String {
    std::path::Path::new(path.as_ref())
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_else(|| path.as_ref())
        .to_string()
}

/// The file name without its directory or extension. Falls back to the whole input if there's no
/// file stem.
pub fn basename<I: AsRef<str>>(path: I) -> String {
    std::path::Path::new(path.as_ref())
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_else(|| path.as_ref())
        .to_string()
}
