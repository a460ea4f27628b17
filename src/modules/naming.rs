// Name helpers shared by tab and folder operations.

use std::collections::HashSet;

/// Returns `candidate` if no sibling uses it, otherwise the first free
/// `"<candidate> (n)"` for n = 1, 2, ...
///
/// Terminates after at most `existing.len() + 1` attempts since each
/// taken name can block at most one suffix.
pub fn unique_name<S: AsRef<str>>(candidate: &str, existing: &[S]) -> String {
    let taken: HashSet<&str> = existing.iter().map(AsRef::as_ref).collect();

    if !taken.contains(candidate) {
        return candidate.to_string();
    }

    let mut n = 1;
    loop {
        let name = format!("{} ({})", candidate, n);
        if !taken.contains(name.as_str()) {
            return name;
        }
        n += 1;
    }
}

/// Trimmed `name`, or `fallback` when it is blank.
pub fn name_or_default<'a>(name: Option<&'a str>, fallback: &'a str) -> &'a str {
    match name.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => fallback,
    }
}

/// Strips a trailing `" (n)"` or `" n"` counter so duplicates derive their
/// name from the base rather than stacking suffixes.
pub fn strip_numeric_suffix(name: &str) -> &str {
    if let Some(inner) = name.strip_suffix(')') {
        if let Some(pos) = inner.rfind(" (") {
            let digits = &inner[pos + 2..];
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return &name[..pos];
            }
        }
    }

    let trimmed = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if trimmed.len() < name.len() {
        if let Some(base) = trimmed.strip_suffix(' ') {
            if !base.is_empty() {
                return base;
            }
        }
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_unique_name_untaken() {
        assert_eq!(unique_name("Query", &["Other"]), "Query");
    }

    #[test]
    fn test_unique_name_appends_counter() {
        assert_eq!(unique_name("Query", &["Query"]), "Query (1)");
        assert_eq!(unique_name("Query", &["Query", "Query (1)"]), "Query (2)");
    }

    #[test]
    fn test_unique_name_fills_gaps() {
        let existing = ["Query", "Query (2)"];
        assert_eq!(unique_name("Query", &existing), "Query (1)");
    }

    #[test]
    fn test_unique_name_bounded_by_sibling_count() {
        let existing: Vec<String> = std::iter::once("Q".to_string())
            .chain((1..50).map(|n| format!("Q ({})", n)))
            .collect();

        let name = unique_name("Q", &existing);
        assert_eq!(name, "Q (50)");
        assert!(!existing.contains(&name));
    }

    #[rstest]
    #[case(Some("Report"), "Report")]
    #[case(Some("  Report  "), "Report")]
    #[case(Some(""), "New query")]
    #[case(Some("   "), "New query")]
    #[case(None, "New query")]
    fn test_name_or_default(#[case] input: Option<&str>, #[case] expected: &str) {
        assert_eq!(name_or_default(input, "New query"), expected);
    }

    #[rstest]
    #[case("Query (3)", "Query")]
    #[case("Query 12", "Query")]
    #[case("Query", "Query")]
    #[case("Query (x)", "Query (x)")]
    #[case("Query12", "Query12")]
    #[case("2024", "2024")]
    #[case(" 7", " 7")]
    fn test_strip_numeric_suffix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_numeric_suffix(input), expected);
    }
}
