use regex::Regex;

lazy_static::lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref OUTSIDE_ALLOW_LIST: Regex = Regex::new(r"[^A-Za-z0-9_]").unwrap();
}

/// Separator that replaces every run of whitespace in a player name.
pub const WHITESPACE_SEPARATOR: &str = "_";

/// Reduce a user-entered name to a bare command-line token.
///
/// Surrounding whitespace is trimmed, inner whitespace runs become a single
/// `_`, and everything outside `[A-Za-z0-9_]` is dropped. The result never
/// contains quotes, shell operators, whitespace or a leading `-`.
pub fn sanitize_identity(input: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(input.trim(), WHITESPACE_SEPARATOR);
    OUTSIDE_ALLOW_LIST.replace_all(&collapsed, "").into_owned()
}
