//! Line format of the settings file: one `key=value` pair per line, no escaping.

/// Separator between a key and its value.
pub const DELIMITER: char = '=';

/// Parse one line of the settings file.
///
/// A line is accepted only when it contains exactly one delimiter. Anything else
/// (no delimiter, or a value that itself contains `=`) is ambiguous and rejected.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(DELIMITER)?;
    if value.contains(DELIMITER) {
        return None;
    }
    Some((key, value))
}

/// Render one entry as a newline-terminated line.
pub fn format_line(key: &str, value: &str) -> String {
    format!("{}{}{}\n", key, DELIMITER, value)
}

/// Whether an entry survives a write followed by a read.
pub fn round_trips(key: &str, value: &str) -> bool {
    let unsafe_char = |c: char| c == DELIMITER || c == '\n' || c == '\r';
    !key.contains(unsafe_char) && !value.contains(unsafe_char)
}
