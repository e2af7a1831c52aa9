use regex::Regex;
use std::sync::LazyLock;

static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[._\s-]+").unwrap_or_else(|e| panic!("invalid separator pattern: {e}"))
});

/// Turn a raw title fragment into display form.
///
/// Every run of `.`, `_`, `-` or whitespace becomes a single space and the
/// result is trimmed.
///
/// ```
/// use scenescape_parser::normalize_title;
///
/// assert_eq!(normalize_title("The.Big_Short-"), "The Big Short");
/// assert_eq!(normalize_title("  Show..Name  "), "Show Name");
/// ```
pub fn normalize_title(raw: &str) -> String {
    SEPARATOR_RUN.replace_all(raw, " ").trim().to_string()
}

/// Normalize and reject titles that end up empty.
pub(crate) fn non_empty_title(raw: &str) -> Option<String> {
    let title = normalize_title(raw);
    (!title.is_empty()).then_some(title)
}
