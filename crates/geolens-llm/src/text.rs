//! Small text helpers shared by the prompt operations.

/// Returns at most the first `max_chars` characters of `s`.
///
/// Character-based, not byte-based, so multi-byte content never splits
/// mid-codepoint. Prompt budgets here are contract, not optimization:
/// classification results are sensitive to which prefix is sent.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Strips surrounding double or single quotes and whitespace.
pub(crate) fn strip_quotes(s: &str) -> &str {
    s.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn truncate_exact_boundary() {
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello!", 5), "hello");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        // Four 3-byte characters; byte truncation at 3 would split the second.
        let s = "日本語です";
        assert_eq!(truncate_chars(s, 3), "日本語");
    }

    #[test]
    fn strip_double_quotes() {
        assert_eq!(strip_quotes("\"Real Estate\""), "Real Estate");
    }

    #[test]
    fn strip_single_quotes_and_whitespace() {
        assert_eq!(strip_quotes("  'SaaS Analytics'  "), "SaaS Analytics");
    }

    #[test]
    fn interior_quotes_preserved() {
        assert_eq!(strip_quotes("\"it's retail\""), "it's retail");
    }
}
